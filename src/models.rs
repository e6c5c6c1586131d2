// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A bank account linked through the aggregation service. The durable access
/// token backing it lives only in the `linked_accounts` table and is never
/// part of this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedAccount {
    pub id: i64,
    pub external_id: String,
    pub name: String,
    pub r#type: String,
    pub institution: String,
    pub last_synced_at: Option<String>,
}

/// Account descriptor handed back by the link widget alongside a public token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountMetadata {
    pub external_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub r#type: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
}

/// A transaction ingested from the aggregation service. `external_id` is the
/// dedup key; rows are append-only once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub external_id: String,
    pub account_id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: Option<String>,
    pub merchant: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Bills,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Bills,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Food" => Ok(Category::Food),
            "Transport" => Ok(Category::Transport),
            "Shopping" => Ok(Category::Shopping),
            "Entertainment" => Ok(Category::Entertainment),
            "Bills" => Ok(Category::Bills),
            other => Err(Error::Validation(format!(
                "Unknown expense category '{}' (expected one of Food, Transport, Shopping, Entertainment, Bills)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub category: Category,
    pub amount: Decimal,
    pub description: String,
}

/// An investment holding with its derived return. The percentage is
/// recomputed on every read so external value updates are never stale.
#[derive(Debug, Clone, Serialize)]
pub struct Investment {
    pub asset: String,
    pub current_value: Decimal,
    pub initial_value: Decimal,
    pub return_pct: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialGoal {
    pub id: i64,
    pub name: String,
    pub target: Decimal,
    pub current: Decimal,
    pub deadline: NaiveDate,
}

/// One account that could not be synced. The run keeps going; these are
/// collected instead of aborting.
#[derive(Debug, Clone, Serialize)]
pub struct AccountSyncFailure {
    pub external_id: String,
    pub error: String,
}

/// Outcome of a full sync pass over every linked account.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub accounts_attempted: usize,
    pub transactions_inserted: usize,
    pub failures: Vec<AccountSyncFailure>,
}

impl SyncReport {
    pub fn accounts_failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn category_round_trips_through_str() {
        for cat in Category::ALL {
            assert_eq!(Category::from_str(cat.as_str()).unwrap(), cat);
        }
    }

    #[test]
    fn category_rejects_unknown_names() {
        let err = Category::from_str("Groceries").unwrap_err();
        assert!(err.to_string().contains("Unknown expense category"));
    }
}
