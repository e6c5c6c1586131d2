// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::aggregator::HttpAggregator;
use crate::models::AccountMetadata;
use crate::utils::{maybe_print_json, pretty_table};
use crate::{ledger, link};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("link", sub)) => issue_link_token(sub)?,
        Some(("exchange", sub)) => exchange(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let accounts = ledger::linked_accounts(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
        let rows = accounts
            .into_iter()
            .map(|a| {
                vec![
                    a.external_id,
                    a.name,
                    a.r#type,
                    a.institution,
                    a.last_synced_at.unwrap_or_else(|| "never".into()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["External Id", "Name", "Type", "Institution", "Last Synced"], rows)
        );
    }
    Ok(())
}

fn issue_link_token(sub: &clap::ArgMatches) -> Result<()> {
    let user_id = sub.get_one::<String>("user").unwrap();
    let api = HttpAggregator::from_env()?;
    let token = link::create_link_token(&api, user_id)?;
    println!("{}", token);
    Ok(())
}

fn exchange(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let public_token = sub.get_one::<String>("public-token").unwrap();
    let raw = sub.get_one::<String>("metadata").unwrap();
    let metadata: Vec<AccountMetadata> =
        serde_json::from_str(raw).context("Invalid account metadata JSON")?;

    let api = HttpAggregator::from_env()?;
    let linked = link::exchange_and_link(conn, &api, public_token, &metadata)?;

    let rows = linked
        .into_iter()
        .map(|a| vec![a.external_id, a.name, a.r#type, a.institution])
        .collect();
    println!(
        "{}",
        pretty_table(&["External Id", "Name", "Type", "Institution"], rows)
    );
    Ok(())
}
