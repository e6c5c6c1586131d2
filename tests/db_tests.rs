// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Duration;

use tempfile::tempdir;
use wealthclip::config::RetryPolicy;
use wealthclip::db;

#[test]
fn open_with_retry_creates_and_reopens_the_database() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wealthclip.sqlite");
    let policy = RetryPolicy {
        max_attempts: 2,
        base_delay: Duration::from_millis(1),
        multiplier: 2,
    };

    let mut conn = db::open_with_retry(&path, &policy).unwrap();
    db::init_schema(&mut conn).unwrap();
    drop(conn);

    // Second open sees the schema already in place
    let conn = db::open_with_retry(&path, &policy).unwrap();
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='transactions'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn init_schema_is_safe_to_run_twice() {
    let mut conn = rusqlite::Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    db::init_schema(&mut conn).unwrap();
}
