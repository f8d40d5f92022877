// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use financeflow::Error;
use financeflow::budget::default_budget_seeds;
use financeflow::models::{
    Frequency, NewRecurring, NewTransaction, RecurringKind, RecurringPatch, TransactionPatch,
    UserId, UserPreferences,
};
use financeflow::registry::{Category, Currency};
use financeflow::store::{LedgerStore, MemoryStore, SqliteStore, seed_budgets};
use rust_decimal::Decimal;
use std::str::FromStr;
use tempfile::tempdir;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn new_tx(amount: &str, description: &str, date: &str) -> NewTransaction {
    NewTransaction::new(dec(amount), description, Category::Food, d(date))
}

fn new_recurring() -> NewRecurring {
    NewRecurring {
        amount: dec("15.99"),
        description: "Streaming".into(),
        category: Category::Entertainment,
        frequency: Frequency::Monthly,
        next_date: d("2025-03-01"),
        kind: RecurringKind::Expense,
    }
}

fn transactions_contract(store: &dyn LedgerStore) {
    let alice = UserId::new("alice");
    let bob = UserId::new("bob");

    let created = store
        .create_transaction(&alice, &new_tx("12.345", "  Lunch  ", "2025-02-03"))
        .unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.description, "Lunch");
    store
        .create_transaction(&alice, &new_tx("5", "Coffee", "2025-02-04"))
        .unwrap();

    let listed = store.list_transactions(&alice).unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().any(|t| t.id == created.id && t.amount == dec("12.345")));
    assert!(store.list_transactions(&bob).unwrap().is_empty());

    let patch = TransactionPatch {
        amount: Some(dec("20")),
        category: Some(Category::Shopping),
        ..Default::default()
    };
    let updated = store.update_transaction(&alice, &created.id, &patch).unwrap();
    assert_eq!(updated.amount, dec("20"));
    assert_eq!(updated.category, Category::Shopping);
    assert_eq!(updated.description, "Lunch");

    // Scoped per user
    let err = store.update_transaction(&bob, &created.id, &patch).unwrap_err();
    assert!(err.is_not_found());
    assert!(store.delete_transaction(&bob, &created.id).unwrap_err().is_not_found());

    store.delete_transaction(&alice, &created.id).unwrap();
    assert!(store.delete_transaction(&alice, &created.id).unwrap_err().is_not_found());
    assert_eq!(store.list_transactions(&alice).unwrap().len(), 1);
}

fn budgets_contract(store: &dyn LedgerStore) {
    let user = UserId::new("carol");
    let created = seed_budgets(store, &user, &default_budget_seeds()).unwrap();
    assert_eq!(created.len(), 6);
    // Seeding again creates nothing
    assert!(seed_budgets(store, &user, &default_budget_seeds()).unwrap().is_empty());

    let err = store
        .create_budget(&user, Category::Food, Decimal::from(10))
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateBudget(Category::Food)));

    let food = store
        .list_budgets(&user)
        .unwrap()
        .into_iter()
        .find(|b| b.category == Category::Food)
        .unwrap();
    let updated = store.update_budget(&user, &food.id, dec("250.50")).unwrap();
    assert_eq!(updated.limit, dec("250.50"));
    assert_eq!(updated.category, Category::Food);
    assert!(store
        .update_budget(&user, "missing", Decimal::ONE)
        .unwrap_err()
        .is_not_found());
}

fn recurring_contract(store: &dyn LedgerStore) {
    let user = UserId::new("dave");
    let template = store.create_recurring(&user, &new_recurring()).unwrap();
    assert_eq!(store.list_recurring(&user).unwrap(), vec![template.clone()]);

    let patch = RecurringPatch {
        frequency: Some(Frequency::Yearly),
        kind: Some(RecurringKind::Income),
        ..Default::default()
    };
    let updated = store.update_recurring(&user, &template.id, &patch).unwrap();
    assert_eq!(updated.frequency, Frequency::Yearly);
    assert_eq!(updated.kind, RecurringKind::Income);
    assert_eq!(updated.amount, dec("15.99"));

    store.delete_recurring(&user, &template.id).unwrap();
    assert!(store.list_recurring(&user).unwrap().is_empty());
    assert!(store.delete_recurring(&user, &template.id).unwrap_err().is_not_found());
}

fn preferences_contract(store: &dyn LedgerStore) {
    let user = UserId::new("erin");
    assert_eq!(store.preferences(&user).unwrap().currency, Currency::Usd);
    let prefs = UserPreferences {
        currency: Currency::Jpy,
    };
    store.set_preferences(&user, &prefs).unwrap();
    assert_eq!(store.preferences(&user).unwrap(), prefs);
    store
        .set_preferences(&user, &UserPreferences { currency: Currency::Eur })
        .unwrap();
    assert_eq!(store.preferences(&user).unwrap().currency, Currency::Eur);
}

#[test]
fn memory_store_contract() {
    let store = MemoryStore::new();
    transactions_contract(&store);
    budgets_contract(&store);
    recurring_contract(&store);
    preferences_contract(&store);
}

#[test]
fn sqlite_store_contract() {
    let store = SqliteStore::open_in_memory().unwrap();
    transactions_contract(&store);
    budgets_contract(&store);
    recurring_contract(&store);
    preferences_contract(&store);
}

#[test]
fn sqlite_lists_newest_first_and_budgets_in_registry_order() {
    let store = SqliteStore::open_in_memory().unwrap();
    let user = UserId::new("frank");
    for (amount, date) in [("1", "2025-01-05"), ("2", "2025-03-01"), ("3", "2025-02-10")] {
        store
            .create_transaction(&user, &new_tx(amount, "x", date))
            .unwrap();
    }
    let dates: Vec<String> = store
        .list_transactions(&user)
        .unwrap()
        .iter()
        .map(|t| t.date.to_string())
        .collect();
    assert_eq!(dates, vec!["2025-03-01", "2025-02-10", "2025-01-05"]);

    store
        .create_budget(&user, Category::Healthcare, Decimal::ONE)
        .unwrap();
    store.create_budget(&user, Category::Food, Decimal::ONE).unwrap();
    let cats: Vec<Category> = store
        .list_budgets(&user)
        .unwrap()
        .iter()
        .map(|b| b.category)
        .collect();
    assert_eq!(cats, vec![Category::Food, Category::Healthcare]);
}

#[test]
fn sqlite_store_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");
    let user = UserId::new("gina");
    {
        let store = SqliteStore::open(&path).unwrap();
        store
            .create_transaction(&user, &new_tx("9.99", "Book", "2025-02-01"))
            .unwrap();
        store
            .set_preferences(&user, &UserPreferences { currency: Currency::Gbp })
            .unwrap();
    }
    let store = SqliteStore::open(&path).unwrap();
    let txs = store.list_transactions(&user).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].amount, dec("9.99"));
    assert_eq!(store.preferences(&user).unwrap().currency, Currency::Gbp);
}
