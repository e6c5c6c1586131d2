// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ENV_DB_PATH, RetryPolicy};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Wealthclip", "wealthclip"));

pub fn db_path() -> Result<PathBuf> {
    if let Ok(p) = std::env::var(ENV_DB_PATH) {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p));
        }
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("wealthclip.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn = open_with_retry(&path, &RetryPolicy::default())?;
    init_schema(&mut conn)?;
    Ok(conn)
}

/// Open the database, retrying with exponential backoff. Applies to the
/// initial connection only; everything after the open runs unretried.
pub fn open_with_retry(path: &Path, policy: &RetryPolicy) -> Result<Connection> {
    let mut attempt = 0;
    loop {
        match Connection::open(path) {
            Ok(conn) => return Ok(conn),
            Err(_) if attempt + 1 < policy.max_attempts => {
                std::thread::sleep(policy.delay_for(attempt));
                attempt += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!(
                        "Open DB at {} ({} attempts)",
                        path.display(),
                        policy.max_attempts
                    )
                });
            }
        }
    }
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS linked_accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        external_id TEXT NOT NULL UNIQUE,
        access_token TEXT NOT NULL,
        name TEXT NOT NULL,
        type TEXT NOT NULL,
        institution TEXT NOT NULL,
        last_synced_at TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        external_id TEXT NOT NULL UNIQUE,
        account_id INTEGER NOT NULL,
        date TEXT NOT NULL,
        amount TEXT NOT NULL,
        category TEXT,
        merchant TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(account_id) REFERENCES linked_accounts(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    CREATE INDEX IF NOT EXISTS idx_transactions_account ON transactions(account_id);

    CREATE TABLE IF NOT EXISTS expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT ''
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);

    CREATE TABLE IF NOT EXISTS investments(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        asset TEXT NOT NULL,
        current_value TEXT NOT NULL,
        initial_value TEXT NOT NULL,
        purchase_date TEXT
    );

    CREATE TABLE IF NOT EXISTS financial_goals(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        target TEXT NOT NULL,
        current TEXT NOT NULL,
        deadline TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

/// Seed the starter rows the dashboard ships with. Each table is only
/// populated when empty, so running this repeatedly changes nothing.
pub fn seed_demo_data(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;

    let expense_count: i64 = tx.query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))?;
    if expense_count == 0 {
        tx.execute_batch(
            r#"
            INSERT INTO expenses(date, category, amount, description)
            VALUES ('2023-01-01', 'Food', '50', 'Groceries'),
                   ('2023-01-02', 'Transport', '30', 'Bus fare');
            "#,
        )?;
    }

    let investment_count: i64 =
        tx.query_row("SELECT COUNT(*) FROM investments", [], |r| r.get(0))?;
    if investment_count == 0 {
        tx.execute_batch(
            r#"
            INSERT INTO investments(asset, current_value, initial_value)
            VALUES ('Stocks', '10000', '9000'),
                   ('Bonds', '5000', '5100');
            "#,
        )?;
    }

    let goal_count: i64 = tx.query_row("SELECT COUNT(*) FROM financial_goals", [], |r| r.get(0))?;
    if goal_count == 0 {
        tx.execute_batch(
            r#"
            INSERT INTO financial_goals(name, target, current, deadline)
            VALUES ('Emergency Fund', '10000', '7500', '2024-12-31'),
                   ('House Down Payment', '50000', '15000', '2025-12-31');
            "#,
        )?;
    }

    tx.commit()?;
    Ok(())
}
