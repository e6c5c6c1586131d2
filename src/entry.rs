// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{Category, Expense, FinancialGoal};

/// Record a user-entered expense. Amounts are magnitudes, never negative.
pub fn add_expense(
    conn: &Connection,
    date: NaiveDate,
    category: Category,
    amount: Decimal,
    description: &str,
) -> Result<Expense> {
    if amount.is_sign_negative() {
        return Err(Error::Validation(format!(
            "Expense amount must be >= 0, got {}",
            amount
        )));
    }
    conn.execute(
        "INSERT INTO expenses(date, category, amount, description) VALUES (?1, ?2, ?3, ?4)",
        params![
            date.to_string(),
            category.as_str(),
            amount.to_string(),
            description
        ],
    )?;
    Ok(Expense {
        id: conn.last_insert_rowid(),
        date,
        category,
        amount,
        description: description.to_string(),
    })
}

/// Record a savings goal. Goal names are not unique; two goals may share one.
pub fn add_goal(
    conn: &Connection,
    name: &str,
    target: Decimal,
    current: Decimal,
    deadline: NaiveDate,
) -> Result<FinancialGoal> {
    if name.trim().is_empty() {
        return Err(Error::Validation("Goal name must be non-empty".into()));
    }
    if target.is_sign_negative() || current.is_sign_negative() {
        return Err(Error::Validation(format!(
            "Goal amounts must be >= 0, got target {} and current {}",
            target, current
        )));
    }
    conn.execute(
        "INSERT INTO financial_goals(name, target, current, deadline) VALUES (?1, ?2, ?3, ?4)",
        params![
            name,
            target.to_string(),
            current.to_string(),
            deadline.to_string()
        ],
    )?;
    Ok(FinancialGoal {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        target,
        current,
        deadline,
    })
}
