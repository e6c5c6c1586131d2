// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::ledger;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let limit = sub.get_one::<usize>("limit").copied();
    let transactions = ledger::transactions(conn, limit)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &transactions)? {
        let rows = transactions
            .into_iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.merchant,
                    format!("{:.2}", t.amount),
                    t.category.unwrap_or_else(|| ledger::UNCATEGORIZED.into()),
                    t.external_id,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Merchant", "Amount", "Category", "External Id"],
                rows
            )
        );
    }
    Ok(())
}
