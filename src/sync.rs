// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate, Utc};
use rusqlite::{Connection, params};

use crate::aggregator::{AggregationService, RemoteTransaction};
use crate::error::{Error, Result};
use crate::models::{AccountSyncFailure, SyncReport};

/// Rolling fetch window ending at `end`, inclusive on both sides.
pub fn sync_window(end: NaiveDate, lookback_days: i64) -> (NaiveDate, NaiveDate) {
    (end - Duration::days(lookback_days), end)
}

/// Sync every linked account against the aggregation service.
///
/// Each account gets its own transaction scope: fetched rows are inserted
/// keyed on `external_id` (already-seen ids are skipped), `last_synced_at` is
/// stamped even when nothing new arrived, and the scope commits. A fetch or
/// insert failure rolls back that account alone and is recorded in the
/// report; the run continues with the next account.
pub fn sync_transactions(
    conn: &mut Connection,
    api: &dyn AggregationService,
    lookback_days: i64,
) -> Result<SyncReport> {
    if lookback_days <= 0 {
        return Err(Error::Validation(
            "lookback_days must be positive".into(),
        ));
    }

    let accounts = {
        let mut stmt =
            conn.prepare("SELECT id, external_id, access_token FROM linked_accounts ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
            ))
        })?;
        let mut accounts = Vec::new();
        for row in rows {
            accounts.push(row?);
        }
        accounts
    };

    let (start, end) = sync_window(Utc::now().date_naive(), lookback_days);

    let mut report = SyncReport::default();
    for (account_id, external_id, access_token) in accounts {
        report.accounts_attempted += 1;

        let remote = match api.transactions(&access_token, start, end) {
            Ok(remote) => remote,
            Err(e) => {
                report.failures.push(AccountSyncFailure {
                    external_id,
                    error: e.to_string(),
                });
                continue;
            }
        };

        match ingest_account(conn, account_id, &remote) {
            Ok(inserted) => report.transactions_inserted += inserted,
            Err(e) => {
                report.failures.push(AccountSyncFailure {
                    external_id,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

/// Insert one account's fetched transactions and stamp its sync time, all in
/// one transaction. Returns how many rows were actually new.
fn ingest_account(
    conn: &mut Connection,
    account_id: i64,
    remote: &[RemoteTransaction],
) -> Result<usize> {
    let tx = conn.transaction()?;
    let mut inserted = 0usize;
    {
        let mut insert = tx.prepare_cached(
            "INSERT OR IGNORE INTO transactions(external_id, account_id, date, amount, category, merchant)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for t in remote {
            inserted += insert.execute(params![
                t.id,
                account_id,
                t.date.to_string(),
                t.amount.to_string(),
                t.first_category(),
                t.merchant_text(),
            ])?;
        }
    }
    tx.execute(
        "UPDATE linked_accounts SET last_synced_at=?1 WHERE id=?2",
        params![Utc::now().to_rfc3339(), account_id],
    )?;
    tx.commit()?;
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_spans_lookback_days() {
        let end = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
        let (start, window_end) = sync_window(end, 30);
        assert_eq!(window_end, end);
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 7, 7).unwrap());
    }
}
