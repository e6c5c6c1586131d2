// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::aggregator::HttpAggregator;
use crate::config::DEFAULT_LOOKBACK_DAYS;
use crate::utils::pretty_table;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let days = m
        .get_one::<i64>("days")
        .copied()
        .unwrap_or(DEFAULT_LOOKBACK_DAYS);

    let api = HttpAggregator::from_env()?;
    let report = crate::sync::sync_transactions(conn, &api, days)?;

    println!(
        "Synced {} account(s): {} new transaction(s), {} failure(s)",
        report.accounts_attempted,
        report.transactions_inserted,
        report.accounts_failed()
    );
    if report.is_partial() {
        let rows = report
            .failures
            .iter()
            .map(|f| vec![f.external_id.clone(), f.error.clone()])
            .collect();
        println!("{}", pretty_table(&["Account", "Error"], rows));
    }
    Ok(())
}
