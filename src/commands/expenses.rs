// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use crate::{entry, ledger};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().parse()?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.as_str())
        .unwrap_or_default();

    let expense = entry::add_expense(conn, date, category, amount, description)?;
    println!(
        "Recorded {} {} on {} ({})",
        expense.category, expense.amount, expense.date, expense.description
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let expenses = ledger::expenses(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &expenses)? {
        let rows = expenses
            .into_iter()
            .map(|e| {
                vec![
                    e.date.to_string(),
                    e.category.to_string(),
                    format!("{:.2}", e.amount),
                    e.description,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Category", "Amount", "Description"], rows)
        );
    }
    Ok(())
}
