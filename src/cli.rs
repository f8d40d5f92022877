// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .help("Calendar month YYYY-MM (default: current month)")
}

fn category_arg(required: bool) -> Arg {
    Arg::new("category")
        .long("category")
        .short('c')
        .required(required)
        .help("food, transport, entertainment, utilities, shopping, healthcare, income or other")
}

pub fn build_cli() -> Command {
    Command::new("financeflow")
        .about("Expense tracking, category budgets and spending insights")
        .version(clap::crate_version!())
        .arg(
            Arg::new("user")
                .long("user")
                .short('u')
                .global(true)
                .help("Ledger owner (default from settings)"),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the SQLite database"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Settings file (TOML)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging"),
        )
        .subcommand(Command::new("init").about("Create the database and seed default budgets"))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("amount").long("amount").short('a').required(true))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .short('d')
                                .required(true),
                        )
                        .arg(category_arg(false).default_value("other"))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD (default: today)"),
                        ),
                )
                .subcommand(
                    Command::new("quick")
                        .about("Record a transaction from free text, e.g. \"Spent $25 on lunch yesterday\"")
                        .arg(Arg::new("text").required(true).num_args(1..))
                        .arg(
                            Arg::new("dry_run")
                                .long("dry-run")
                                .action(ArgAction::SetTrue)
                                .help("Show what would be recorded"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(month_arg())
                        .arg(category_arg(false))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Change fields of a transaction")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("amount").long("amount").short('a'))
                        .arg(Arg::new("description").long("description").short('d'))
                        .arg(category_arg(false))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Category budgets")
                .subcommand(json_flags(
                    Command::new("list").about("Budgets with this month's progress"),
                ))
                .subcommand(
                    Command::new("set")
                        .about("Change a category's monthly limit")
                        .arg(Arg::new("category").required(true))
                        .arg(Arg::new("limit").required(true)),
                )
                .subcommand(
                    Command::new("scale-jpy")
                        .about("Rescale default-sized budgets for Japanese Yen"),
                ),
        )
        .subcommand(
            Command::new("recurring")
                .about("Recurring templates")
                .subcommand(
                    Command::new("add")
                        .about("Add a recurring template")
                        .arg(Arg::new("amount").long("amount").short('a').required(true))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .short('d')
                                .required(true),
                        )
                        .arg(category_arg(false).default_value("other"))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .short('f')
                                .default_value("monthly")
                                .value_parser(["daily", "weekly", "monthly", "yearly"]),
                        )
                        .arg(Arg::new("next_date").long("next-date").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .short('t')
                                .default_value("expense")
                                .value_parser(["expense", "income"]),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("Templates and their monthly impact"),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a template")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Spending analytics")
                .subcommand(json_flags(
                    Command::new("summary").about("Month total and count").arg(month_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("by-category")
                        .about("Spend per category")
                        .arg(month_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("averages")
                        .about("Average transaction per category")
                        .arg(month_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("trend").about("Monthly totals").arg(
                        Arg::new("months")
                            .long("months")
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(json_flags(
                    Command::new("insights").about("Budget warnings and trend notices"),
                )),
        )
        .subcommand(
            Command::new("import")
                .about("Import data")
                .subcommand(
                    Command::new("csv")
                        .about("Import transactions from date,description,category,amount CSV")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("csv")
                        .about("Export transactions as CSV")
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("backup")
                        .about("Export the whole ledger as JSON")
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("currency")
                .about("Display currency")
                .subcommand(Command::new("show").about("Current currency"))
                .subcommand(Command::new("list").about("Supported currencies"))
                .subcommand(
                    Command::new("set")
                        .about("Change the display currency")
                        .arg(Arg::new("code").required(true)),
                ),
        )
        .subcommand(
            Command::new("clear")
                .about("Delete all transactions and recurring templates")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm"),
                ),
        )
}
