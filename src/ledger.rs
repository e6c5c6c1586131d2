// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{Category, Expense, FinancialGoal, Investment, LinkedAccount, Transaction};

/// Bucket label for synced transactions the service left uncategorized.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Sum of manual expenses and synced transactions, rounded for display.
/// Empty tables contribute zero.
pub fn total_expenses(conn: &Connection) -> Result<Decimal> {
    let mut total = sum_column(conn, "SELECT amount FROM expenses", "expense amount")?;
    total += sum_column(
        conn,
        "SELECT amount FROM transactions",
        "transaction amount",
    )?;
    Ok(total.round_dp(2))
}

/// Expenses grouped by category across both sources. Manual categories merge
/// with synced ones by name; NULL transaction categories land in the
/// `Uncategorized` bucket.
pub fn expenses_by_category(conn: &Connection) -> Result<BTreeMap<String, Decimal>> {
    let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();

    let mut stmt = conn.prepare("SELECT category, amount FROM expenses")?;
    let mut rows = stmt.query([])?;
    while let Some(r) = rows.next()? {
        let category: String = r.get(0)?;
        let amount = decimal_field(&r.get::<_, String>(1)?, "expense amount")?;
        *by_category.entry(category).or_insert(Decimal::ZERO) += amount;
    }

    let mut stmt = conn.prepare("SELECT category, amount FROM transactions")?;
    let mut rows = stmt.query([])?;
    while let Some(r) = rows.next()? {
        let category: Option<String> = r.get(0)?;
        let amount = decimal_field(&r.get::<_, String>(1)?, "transaction amount")?;
        let key = category.unwrap_or_else(|| UNCATEGORIZED.to_string());
        *by_category.entry(key).or_insert(Decimal::ZERO) += amount;
    }

    for amount in by_category.values_mut() {
        *amount = amount.round_dp(2);
    }
    Ok(by_category)
}

pub fn portfolio_value(conn: &Connection) -> Result<Decimal> {
    let total = sum_column(
        conn,
        "SELECT current_value FROM investments",
        "investment value",
    )?;
    Ok(total.round_dp(2))
}

/// Overall return as a percentage of the initial stake. Zero when nothing has
/// been invested yet; never an error, never NaN.
pub fn portfolio_return(conn: &Connection) -> Result<Decimal> {
    let current = sum_column(
        conn,
        "SELECT current_value FROM investments",
        "investment value",
    )?;
    let initial = sum_column(
        conn,
        "SELECT initial_value FROM investments",
        "investment value",
    )?;
    Ok(return_pct(current, initial))
}

pub fn goals(conn: &Connection) -> Result<Vec<FinancialGoal>> {
    let mut stmt =
        conn.prepare("SELECT id, name, target, current, deadline FROM financial_goals ORDER BY id")?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(FinancialGoal {
            id: r.get(0)?,
            name: r.get(1)?,
            target: decimal_field(&r.get::<_, String>(2)?, "goal target")?,
            current: decimal_field(&r.get::<_, String>(3)?, "goal progress")?,
            deadline: date_field(&r.get::<_, String>(4)?)?,
        });
    }
    Ok(out)
}

/// Manual expense rows, newest first.
pub fn expenses(conn: &Connection) -> Result<Vec<Expense>> {
    let mut stmt = conn
        .prepare("SELECT id, date, category, amount, description FROM expenses ORDER BY date DESC, id DESC")?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let category: String = r.get(2)?;
        out.push(Expense {
            id: r.get(0)?,
            date: date_field(&r.get::<_, String>(1)?)?,
            category: Category::from_str(&category)
                .map_err(|_| Error::Persistence(format!("Invalid stored category '{}'", category)))?,
            amount: decimal_field(&r.get::<_, String>(3)?, "expense amount")?,
            description: r.get(4)?,
        });
    }
    Ok(out)
}

/// Investments with their return recomputed on the way out.
pub fn investments(conn: &Connection) -> Result<Vec<Investment>> {
    let mut stmt =
        conn.prepare("SELECT asset, current_value, initial_value FROM investments ORDER BY id")?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let current = decimal_field(&r.get::<_, String>(1)?, "investment value")?;
        let initial = decimal_field(&r.get::<_, String>(2)?, "investment value")?;
        out.push(Investment {
            asset: r.get(0)?,
            current_value: current,
            initial_value: initial,
            return_pct: return_pct(current, initial),
        });
    }
    Ok(out)
}

/// Synced bank transactions, newest first.
pub fn transactions(conn: &Connection, limit: Option<usize>) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT id, external_id, account_id, date, amount, category, merchant
         FROM transactions ORDER BY date DESC, id DESC",
    );
    if let Some(limit) = limit {
        sql.push_str(&format!(" LIMIT {}", limit));
    }
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(Transaction {
            id: r.get(0)?,
            external_id: r.get(1)?,
            account_id: r.get(2)?,
            date: date_field(&r.get::<_, String>(3)?)?,
            amount: decimal_field(&r.get::<_, String>(4)?, "transaction amount")?,
            category: r.get(5)?,
            merchant: r.get(6)?,
        });
    }
    Ok(out)
}

/// All linked accounts. The access token column is deliberately not selected.
pub fn linked_accounts(conn: &Connection) -> Result<Vec<LinkedAccount>> {
    let mut stmt = conn.prepare(
        "SELECT id, external_id, name, type, institution, last_synced_at
         FROM linked_accounts ORDER BY id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(LinkedAccount {
            id: r.get(0)?,
            external_id: r.get(1)?,
            name: r.get(2)?,
            r#type: r.get(3)?,
            institution: r.get(4)?,
            last_synced_at: r.get(5)?,
        });
    }
    Ok(out)
}

fn return_pct(current: Decimal, initial: Decimal) -> Decimal {
    if initial.is_zero() {
        return Decimal::ZERO;
    }
    ((current - initial) / initial * Decimal::from(100)).round_dp(2)
}

fn sum_column(conn: &Connection, sql: &str, what: &str) -> Result<Decimal> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([])?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        total += decimal_field(&r.get::<_, String>(0)?, what)?;
    }
    Ok(total)
}

fn decimal_field(s: &str, what: &str) -> Result<Decimal> {
    Decimal::from_str_exact(s)
        .map_err(|_| Error::Persistence(format!("Invalid stored {} '{}'", what, s)))
}

fn date_field(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| Error::Persistence(format!("Invalid stored date '{}'", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_pct_guards_zero_initial() {
        assert_eq!(return_pct(Decimal::from(100), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn return_pct_rounds_to_two_places() {
        let pct = return_pct(Decimal::from(10000), Decimal::from(9000));
        assert_eq!(pct.to_string(), "11.11");
    }
}
