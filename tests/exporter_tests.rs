// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use financeflow::interchange::{Backup, read_transactions_csv, transactions_to_csv_string};
use financeflow::models::{Budget, NewTransaction, Transaction, UserId};
use financeflow::registry::{Category, Currency};
use financeflow::session::{LedgerSession, Mutation};
use financeflow::store::MemoryStore;
use financeflow::{cli, commands::exporter};
use rust_decimal::Decimal;
use std::str::FromStr;
use tempfile::tempdir;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(id: &str, amount: &str, description: &str, category: Category, date: &str) -> Transaction {
    Transaction {
        id: id.into(),
        amount: Decimal::from_str(amount).unwrap(),
        description: description.into(),
        category,
        date: d(date),
        recurring_source_id: None,
    }
}

#[test]
fn csv_is_sorted_with_two_decimals() {
    let txs = vec![
        tx("b", "80", "Dinner, with friends", Category::Food, "2025-02-04"),
        tx("a", "45.2", "Groceries", Category::Food, "2025-02-03"),
        tx("c", "3", "Say \"hi\"", Category::Other, "2025-02-05"),
    ];
    let csv = transactions_to_csv_string(&txs).unwrap();
    assert_eq!(
        csv,
        "Date,Description,Category,Amount\n\
         2025-02-03,Groceries,food,45.20\n\
         2025-02-04,\"Dinner, with friends\",food,80.00\n\
         2025-02-05,\"Say \"\"hi\"\"\",other,3.00\n"
    );
}

#[test]
fn exported_csv_reads_back() {
    let txs = vec![
        tx("a", "12.5", "Coffee, large", Category::Food, "2025-02-03"),
        tx("b", "30", "Bus pass", Category::Transport, "2025-02-04"),
    ];
    let csv = transactions_to_csv_string(&txs).unwrap();
    let batch = read_transactions_csv(csv.as_bytes());
    assert_eq!(batch.skipped, 0);
    let descriptions: Vec<&str> = batch
        .transactions
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["Coffee, large", "Bus pass"]);
}

#[test]
fn backup_has_collections_and_timestamp_only() {
    let txs = vec![tx("a", "10", "Lunch", Category::Food, "2025-02-03")];
    let budgets = vec![Budget {
        id: "b1".into(),
        category: Category::Food,
        limit: Decimal::from(500),
    }];
    let backup = Backup {
        exported: Utc.with_ymd_and_hms(2025, 2, 10, 8, 0, 0).unwrap(),
        expenses: &txs,
        budgets: &budgets,
        recurring: &[],
        currency: Currency::Eur,
    };
    let value: serde_json::Value = serde_json::from_str(&backup.to_json().unwrap()).unwrap();
    let obj = value.as_object().unwrap();
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(
        keys,
        vec!["budgets", "currency", "expenses", "exported", "recurring"]
    );
    assert_eq!(value["currency"], "EUR");
    assert_eq!(value["expenses"][0]["date"], "2025-02-03");
    assert_eq!(value["expenses"][0]["category"], "food");
    assert_eq!(value["budgets"][0]["category"], "food");
    assert!(value["recurring"].as_array().unwrap().is_empty());
}

#[test]
fn export_commands_write_files() {
    let store = MemoryStore::new();
    let mut session = LedgerSession::open(&store, UserId::new("bob")).unwrap();
    session
        .execute(Mutation::AddTransaction(NewTransaction::new(
            Decimal::from_str("12.34").unwrap(),
            "Corner Shop",
            Category::Shopping,
            d("2025-01-02"),
        )))
        .unwrap();

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("export.csv");
    let csv_str = csv_path.to_string_lossy().to_string();
    let matches =
        cli::build_cli().get_matches_from(["financeflow", "export", "csv", "--out", csv_str.as_str()]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&session, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }
    let contents = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(
        contents,
        "Date,Description,Category,Amount\n2025-01-02,Corner Shop,shopping,12.34\n"
    );

    let json_path = dir.path().join("backup.json");
    let json_str = json_path.to_string_lossy().to_string();
    let matches = cli::build_cli().get_matches_from([
        "financeflow",
        "export",
        "backup",
        "--out",
        json_str.as_str(),
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&session, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }
    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed["expenses"][0]["description"], "Corner Shop");
    assert_eq!(parsed["currency"], "USD");
}
