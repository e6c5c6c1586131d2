// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

use crate::ledger;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("by-category", sub)) => by_category(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let total_expenses = ledger::total_expenses(conn)?;
    let portfolio_value = ledger::portfolio_value(conn)?;
    let portfolio_return = ledger::portfolio_return(conn)?;
    let net_worth = portfolio_value - total_expenses;

    let payload = json!({
        "total_expenses": total_expenses,
        "portfolio_value": portfolio_value,
        "portfolio_return_pct": portfolio_return,
        "net_worth": net_worth,
    });
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payload)? {
        let rows = vec![
            vec!["Total Expenses".into(), format!("{:.2}", total_expenses)],
            vec!["Portfolio Value".into(), format!("{:.2}", portfolio_value)],
            vec!["Portfolio Return".into(), format!("{}%", portfolio_return)],
            vec!["Net Worth".into(), format!("{:.2}", net_worth)],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}

fn by_category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let by_category = ledger::expenses_by_category(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &by_category)? {
        let mut items: Vec<_> = by_category.into_iter().collect();
        items.sort_by(|a, b| b.1.cmp(&a.1));
        let rows = items
            .into_iter()
            .map(|(category, amount)| vec![category, format!("{:.2}", amount)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}
