// Copyright (c) AlphaVelocity.
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
    let name = sub.get_one::<String>("name").unwrap();
    let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
    let current = parse_decimal(sub.get_one::<String>("current").unwrap())?;
    let deadline = parse_date(sub.get_one::<String>("deadline").unwrap())?;

    let goal = entry::add_goal(conn, name, target, current, deadline)?;
    println!(
        "Recorded goal '{}': {} of {} by {}",
        goal.name, goal.current, goal.target, goal.deadline
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let goals = ledger::goals(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &goals)? {
        let rows = goals
            .into_iter()
            .map(|g| {
                vec![
                    g.name,
                    format!("{:.2}", g.target),
                    format!("{:.2}", g.current),
                    g.deadline.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Target", "Current", "Deadline"], rows)
        );
    }
    Ok(())
}
