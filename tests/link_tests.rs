// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use wealthclip::aggregator::{AggregationService, RemoteTransaction};
use wealthclip::error::{Error, Result};
use wealthclip::models::AccountMetadata;
use wealthclip::{db, link};

/// Happy-path service double: tokens are derived from their inputs so tests
/// can assert exact pass-through.
struct StubService;

impl AggregationService for StubService {
    fn create_link_token(&self, user_id: &str) -> Result<String> {
        Ok(format!("link-{}", user_id))
    }

    fn exchange_public_token(&self, public_token: &str) -> Result<String> {
        Ok(format!("access-{}", public_token))
    }

    fn transactions(
        &self,
        _access_token: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<RemoteTransaction>> {
        Ok(Vec::new())
    }
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn meta(external_id: &str) -> AccountMetadata {
    AccountMetadata {
        external_id: external_id.to_string(),
        name: Some("Everyday Checking".to_string()),
        r#type: Some("depository".to_string()),
        institution: Some("First Bank".to_string()),
    }
}

#[test]
fn link_token_passes_through_unchanged() {
    let token = link::create_link_token(&StubService, "user-1").unwrap();
    assert_eq!(token, "link-user-1");
}

#[test]
fn link_token_requires_a_user_id() {
    let err = link::create_link_token(&StubService, "  ").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn exchange_links_every_account_under_one_token() {
    let mut conn = setup();
    let linked = link::exchange_and_link(
        &mut conn,
        &StubService,
        "pub-1",
        &[meta("acct-1"), meta("acct-2")],
    )
    .unwrap();

    assert_eq!(linked.len(), 2);
    assert_eq!(linked[0].external_id, "acct-1");
    assert_eq!(linked[1].external_id, "acct-2");

    let tokens: Vec<String> = {
        let mut stmt = conn
            .prepare("SELECT access_token FROM linked_accounts ORDER BY id")
            .unwrap();
        let rows = stmt
            .query_map([], |r| r.get::<_, String>(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        rows
    };
    assert_eq!(tokens, vec!["access-pub-1", "access-pub-1"]);
}

#[test]
fn exchange_applies_metadata_defaults() {
    let mut conn = setup();
    let bare = AccountMetadata {
        external_id: "acct-9".to_string(),
        name: None,
        r#type: None,
        institution: None,
    };
    let linked = link::exchange_and_link(&mut conn, &StubService, "pub-1", &[bare]).unwrap();

    assert_eq!(linked[0].name, "acct-9");
    assert_eq!(linked[0].r#type, "unknown");
    assert_eq!(linked[0].institution, "");
    assert_eq!(linked[0].last_synced_at, None);
}

#[test]
fn exchange_rejects_an_empty_public_token() {
    let mut conn = setup();
    let err =
        link::exchange_and_link(&mut conn, &StubService, "", &[meta("acct-1")]).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM linked_accounts", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn exchange_rejects_empty_metadata() {
    let mut conn = setup();
    let err = link::exchange_and_link(&mut conn, &StubService, "pub-1", &[]).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn a_failed_batch_persists_nothing() {
    let mut conn = setup();
    link::exchange_and_link(&mut conn, &StubService, "pub-1", &[meta("acct-1")]).unwrap();

    // acct-1 already exists, so the second entry violates the UNIQUE
    // constraint and the whole batch must roll back.
    let err = link::exchange_and_link(
        &mut conn,
        &StubService,
        "pub-2",
        &[meta("acct-2"), meta("acct-1")],
    )
    .unwrap_err();
    assert!(matches!(err, Error::Persistence(_)));
    assert!(err.to_string().contains("acct-1"));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM linked_accounts", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}
