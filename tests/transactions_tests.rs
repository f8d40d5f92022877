// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use financeflow::models::{NewTransaction, UserId};
use financeflow::registry::{Category, Currency};
use financeflow::session::{LedgerSession, Mutation};
use financeflow::store::SqliteStore;
use financeflow::{cli, commands::transactions};
use rust_decimal::Decimal;

fn setup(store: &SqliteStore) -> LedgerSession<'_> {
    let mut session = LedgerSession::open(store, UserId::new("alice")).unwrap();
    let rows = [
        ("2025-01-01", Category::Food),
        ("2025-01-02", Category::Transport),
        ("2025-01-03", Category::Food),
        ("2025-02-01", Category::Food),
    ];
    for (date, category) in rows {
        session
            .execute(Mutation::AddTransaction(NewTransaction::new(
                Decimal::from(10),
                "P",
                category,
                NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            )))
            .unwrap();
    }
    session
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["financeflow", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_limit_respected() {
    let store = SqliteStore::open_in_memory().unwrap();
    let session = setup(&store);
    let rows = transactions::query_rows(&session, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-02-01");
    assert_eq!(rows[1].date, "2025-01-03");
}

#[test]
fn list_filters_by_month_and_category() {
    let store = SqliteStore::open_in_memory().unwrap();
    let session = setup(&store);
    let rows = transactions::query_rows(
        &session,
        &list_matches(&["--month", "2025-01", "--category", "food"]),
    )
    .unwrap();
    let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-01-03", "2025-01-01"]);
    assert!(rows.iter().all(|r| r.category == "food"));
}

#[test]
fn list_rejects_unknown_category() {
    let store = SqliteStore::open_in_memory().unwrap();
    let session = setup(&store);
    assert!(transactions::query_rows(&session, &list_matches(&["--category", "pets"])).is_err());
}

#[test]
fn amounts_use_the_session_currency() {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut session = setup(&store);
    session
        .execute(Mutation::SetCurrency(Currency::Eur))
        .unwrap();
    let rows = transactions::query_rows(&session, &list_matches(&["--limit", "1"])).unwrap();
    assert_eq!(rows[0].amount, "10,00 €");
}

fn run(session: &mut LedgerSession<'_>, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["financeflow", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(session, tx_m)
}

#[test]
fn handle_adds_edits_and_removes() {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut session = LedgerSession::open(&store, UserId::new("bob"))
        .unwrap()
        .with_today(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());

    run(
        &mut session,
        &["add", "-a", "12.50", "-d", "Lunch", "-c", "food"],
    )
    .unwrap();
    run(&mut session, &["quick", "Uber", "home", "$18", "yesterday"]).unwrap();
    run(&mut session, &["quick", "--dry-run", "coffee", "4"]).unwrap();
    assert!(run(&mut session, &["quick", "just", "words"]).is_err());

    let txs = session.snapshot().transactions.clone();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].date.to_string(), "2025-03-10");
    assert_eq!(txs[1].category, Category::Transport);
    assert_eq!(txs[1].amount, Decimal::from(18));
    assert_eq!(txs[1].date.to_string(), "2025-03-09");

    let id = txs[0].id.clone();
    run(&mut session, &["edit", id.as_str(), "--amount", "15"]).unwrap();
    assert!(run(&mut session, &["edit", id.as_str()]).is_err());
    session.reload().unwrap();
    let edited = session
        .snapshot()
        .transactions
        .iter()
        .find(|t| t.id == id)
        .unwrap()
        .amount;
    assert_eq!(edited, Decimal::from(15));

    run(&mut session, &["rm", id.as_str()]).unwrap();
    assert!(run(&mut session, &["rm", id.as_str()]).is_err());
    session.reload().unwrap();
    assert_eq!(session.snapshot().transactions.len(), 1);
}
