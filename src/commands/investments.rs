// Copyright (c) AlphaVelocity.
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
    let investments = ledger::investments(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &investments)? {
        let rows = investments
            .into_iter()
            .map(|i| {
                vec![
                    i.asset,
                    format!("{:.2}", i.current_value),
                    format!("{:.2}", i.initial_value),
                    format!("{}%", i.return_pct),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Asset", "Current", "Initial", "Return"], rows)
        );
    }
    Ok(())
}
