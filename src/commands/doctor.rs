// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::utils::pretty_table;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Transactions whose account no longer exists
    let mut stmt = conn.prepare(
        "SELECT t.external_id FROM transactions t
         LEFT JOIN linked_accounts a ON t.account_id=a.id
         WHERE a.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let ext: String = r.get(0)?;
        rows.push(vec!["orphaned_transaction".into(), ext]);
    }

    // 2) Stored amounts that no longer parse as decimals
    for (table, column) in [
        ("expenses", "amount"),
        ("transactions", "amount"),
        ("investments", "current_value"),
        ("investments", "initial_value"),
        ("financial_goals", "target"),
        ("financial_goals", "current"),
    ] {
        let sql = format!("SELECT id, {} FROM {}", column, table);
        let mut stmt = conn.prepare(&sql)?;
        let mut cur = stmt.query([])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            let raw: String = r.get(1)?;
            if Decimal::from_str_exact(&raw).is_err() {
                rows.push(vec![
                    "malformed_amount".into(),
                    format!("{}.{} id={} '{}'", table, column, id, raw),
                ]);
            }
        }
    }

    // 3) Linked accounts that have never completed a sync
    let mut stmt =
        conn.prepare("SELECT external_id FROM linked_accounts WHERE last_synced_at IS NULL")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let ext: String = r.get(0)?;
        rows.push(vec!["never_synced".into(), ext]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
