// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;
use wealthclip::{cli, commands::exporter, db};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn export_transactions_streams_pretty_json() {
    let conn = setup();
    conn.execute(
        "INSERT INTO linked_accounts(external_id, access_token, name, type, institution)
         VALUES ('acct-1', 'secret', 'Checking', 'depository', 'First Bank')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transactions(external_id, account_id, date, amount, category, merchant)
         VALUES ('tx-1', 1, '2025-07-02', '-12.34', 'Food', 'Corner Shop')",
        [],
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "wealthclip",
        "export",
        "transactions",
        "--format",
        "json",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "date": "2025-07-02",
                "account": "Checking",
                "merchant": "Corner Shop",
                "amount": "-12.34",
                "category": "Food",
                "external_id": "tx-1"
            }
        ])
    );
}

#[test]
fn export_expenses_writes_csv_rows() {
    let conn = setup();
    conn.execute(
        "INSERT INTO expenses(date, category, amount, description)
         VALUES ('2025-07-01', 'Food', '50', 'Groceries')",
        [],
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("expenses.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "wealthclip",
        "export",
        "expenses",
        "--format",
        "csv",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("date,category,amount,description"));
    assert_eq!(lines.next(), Some("2025-07-01,Food,50,Groceries"));
}

#[test]
fn export_rejects_unknown_format() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "wealthclip",
        "export",
        "transactions",
        "--format",
        "xml",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(exporter::handle(&conn, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}
