// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use wealthclip::error::Error;
use wealthclip::models::Category;
use wealthclip::{db, entry, ledger};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn added_expense_comes_back_through_the_ledger() {
    let conn = setup();
    let expense = entry::add_expense(
        &conn,
        date(2025, 7, 1),
        Category::Food,
        Decimal::from(50),
        "Groceries",
    )
    .unwrap();
    assert_eq!(expense.category, Category::Food);

    let listed = ledger::expenses(&conn).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].amount, Decimal::from(50));
    assert_eq!(listed[0].description, "Groceries");
}

#[test]
fn negative_expense_amounts_are_rejected_without_persisting() {
    let conn = setup();
    let err = entry::add_expense(
        &conn,
        date(2025, 7, 1),
        Category::Food,
        Decimal::from(-5),
        "x",
    )
    .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn expense_listing_is_newest_first() {
    let conn = setup();
    for (day, amount) in [(1, 10), (3, 30), (2, 20)] {
        entry::add_expense(
            &conn,
            date(2025, 7, day),
            Category::Bills,
            Decimal::from(amount),
            "",
        )
        .unwrap();
    }
    let listed = ledger::expenses(&conn).unwrap();
    let days: Vec<u32> = listed.iter().map(|e| {
        use chrono::Datelike;
        e.date.day()
    }).collect();
    assert_eq!(days, vec![3, 2, 1]);
}

#[test]
fn goal_round_trips_with_all_four_fields() {
    let conn = setup();
    entry::add_goal(
        &conn,
        "Car",
        Decimal::from(20000),
        Decimal::from(1000),
        date(2026, 6, 30),
    )
    .unwrap();

    let goals = ledger::goals(&conn).unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].name, "Car");
    assert_eq!(goals[0].target, Decimal::from(20000));
    assert_eq!(goals[0].current, Decimal::from(1000));
    assert_eq!(goals[0].deadline, date(2026, 6, 30));
}

#[test]
fn goal_names_need_not_be_unique() {
    let conn = setup();
    for _ in 0..2 {
        entry::add_goal(
            &conn,
            "Vacation",
            Decimal::from(3000),
            Decimal::ZERO,
            date(2026, 1, 1),
        )
        .unwrap();
    }
    assert_eq!(ledger::goals(&conn).unwrap().len(), 2);
}

#[test]
fn goal_validation_rejects_bad_input() {
    let conn = setup();
    let err = entry::add_goal(
        &conn,
        "  ",
        Decimal::from(100),
        Decimal::ZERO,
        date(2026, 1, 1),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = entry::add_goal(
        &conn,
        "Car",
        Decimal::from(-1),
        Decimal::ZERO,
        date(2026, 1, 1),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM financial_goals", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}
