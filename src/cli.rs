// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Command, arg, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print as pretty JSON"))
        .arg(arg!(--jsonl "Print as JSON lines"))
}

pub fn build_cli() -> Command {
    Command::new("wealthclip")
        .version(crate_version!())
        .about("Personal finance core: linked bank accounts, synced transactions, expenses, goals")
        .subcommand(
            Command::new("init")
                .about("Initialize the database")
                .arg(arg!(--demo "Seed starter expenses, investments, and goals")),
        )
        .subcommand(
            Command::new("account")
                .about("Linked bank accounts")
                .subcommand(json_flags(Command::new("list").about("List linked accounts")))
                .subcommand(
                    Command::new("link")
                        .about("Request a link token for the account-linking widget")
                        .arg(arg!(--user <USER_ID> "User to issue the link token for")),
                )
                .subcommand(
                    Command::new("exchange")
                        .about("Exchange a public token and persist the linked accounts")
                        .arg(arg!(--"public-token" <TOKEN> "Public token returned by the widget"))
                        .arg(arg!(--metadata <JSON> "Account metadata as a JSON array")),
                ),
        )
        .subcommand(
            Command::new("sync")
                .about("Fetch and ingest transactions for every linked account")
                .arg(
                    arg!(--days <DAYS> "Rolling lookback window in days")
                        .required(false)
                        .value_parser(clap::value_parser!(i64)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Synced bank transactions")
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List synced transactions, newest first")
                        .arg(
                            arg!(--limit <N>)
                                .required(false)
                                .value_parser(clap::value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("expense")
                .about("Manually entered expenses")
                .subcommand(
                    Command::new("add")
                        .about("Record an expense")
                        .arg(arg!(--date <DATE> "Date as YYYY-MM-DD"))
                        .arg(arg!(--category <CATEGORY> "Food|Transport|Shopping|Entertainment|Bills"))
                        .arg(arg!(--amount <AMOUNT>))
                        .arg(arg!(--description <TEXT>).required(false)),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List expenses, newest first"),
                )),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Record a goal")
                        .arg(arg!(--name <NAME>))
                        .arg(arg!(--target <AMOUNT>))
                        .arg(arg!(--current <AMOUNT>))
                        .arg(arg!(--deadline <DATE> "Date as YYYY-MM-DD")),
                )
                .subcommand(json_flags(Command::new("list").about("List goals"))),
        )
        .subcommand(
            Command::new("investment")
                .about("Investment portfolio")
                .subcommand(json_flags(
                    Command::new("list").about("List investments with derived returns"),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Ledger aggregates")
                .subcommand(json_flags(
                    Command::new("summary").about("Total expenses, portfolio value and return"),
                ))
                .subcommand(json_flags(
                    Command::new("by-category").about("Expenses grouped by category"),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export rows to a file")
                .subcommand(
                    Command::new("expenses")
                        .arg(arg!(--format <FORMAT> "csv or json"))
                        .arg(arg!(--out <PATH>)),
                )
                .subcommand(
                    Command::new("transactions")
                        .arg(arg!(--format <FORMAT> "csv or json"))
                        .arg(arg!(--out <PATH>)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for integrity issues"))
}
