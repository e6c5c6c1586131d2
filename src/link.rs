// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, params};

use crate::aggregator::AggregationService;
use crate::error::{Error, Result};
use crate::models::{AccountMetadata, LinkedAccount};

/// Request a short-lived link token for `user_id`. The token is handed to the
/// client-side widget unchanged; no state is written here.
pub fn create_link_token(api: &dyn AggregationService, user_id: &str) -> Result<String> {
    if user_id.trim().is_empty() {
        return Err(Error::Validation("user_id must be non-empty".into()));
    }
    api.create_link_token(user_id)
}

/// Exchange a public token for a durable access token and persist one linked
/// account per metadata entry, all sharing that token.
///
/// The inserts run in a single transaction: if any entry fails, the whole
/// batch rolls back and the error names the offending account. The exchanged
/// token stays valid upstream, so the caller can simply relink.
pub fn exchange_and_link(
    conn: &mut Connection,
    api: &dyn AggregationService,
    public_token: &str,
    metadata: &[AccountMetadata],
) -> Result<Vec<LinkedAccount>> {
    if public_token.trim().is_empty() {
        return Err(Error::Validation("public_token must be non-empty".into()));
    }
    if metadata.is_empty() {
        return Err(Error::Validation(
            "at least one account metadata entry is required".into(),
        ));
    }
    for meta in metadata {
        if meta.external_id.trim().is_empty() {
            return Err(Error::Validation(
                "account metadata entry is missing its external id".into(),
            ));
        }
    }

    let access_token = api.exchange_public_token(public_token)?;

    let tx = conn.transaction()?;
    let mut linked = Vec::with_capacity(metadata.len());
    for meta in metadata {
        let name = meta.name.clone().unwrap_or_else(|| meta.external_id.clone());
        let r#type = meta.r#type.clone().unwrap_or_else(|| "unknown".to_string());
        let institution = meta.institution.clone().unwrap_or_default();
        tx.execute(
            "INSERT INTO linked_accounts(external_id, access_token, name, type, institution)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![meta.external_id, access_token, name, r#type, institution],
        )
        .map_err(|e| {
            Error::Persistence(format!(
                "linking account '{}' failed, no accounts were persisted: {}",
                meta.external_id, e
            ))
        })?;
        linked.push(LinkedAccount {
            id: tx.last_insert_rowid(),
            external_id: meta.external_id.clone(),
            name,
            r#type,
            institution,
            last_synced_at: None,
        });
    }
    tx.commit()?;

    Ok(linked)
}
