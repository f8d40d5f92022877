// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence contract for a user's ledger.
//!
//! Every call is scoped to one [`UserId`] and is atomic on its own. Nothing
//! here spans several entities; callers that need to touch many records (for
//! example clearing a ledger) issue one call per record.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{
    Budget, NewRecurring, NewTransaction, RecurringPatch, RecurringTemplate, Transaction,
    TransactionPatch, UserId, UserPreferences,
};
use crate::registry::Category;

pub trait LedgerStore {
    fn list_transactions(&self, user: &UserId) -> Result<Vec<Transaction>>;
    fn create_transaction(&self, user: &UserId, new: &NewTransaction) -> Result<Transaction>;
    /// Fails with [`Error::NotFound`] when `id` is not one of `user`'s transactions.
    fn update_transaction(
        &self,
        user: &UserId,
        id: &str,
        patch: &TransactionPatch,
    ) -> Result<Transaction>;
    fn delete_transaction(&self, user: &UserId, id: &str) -> Result<()>;

    fn list_budgets(&self, user: &UserId) -> Result<Vec<Budget>>;
    /// Fails with [`Error::DuplicateBudget`] when `category` already has one.
    fn create_budget(&self, user: &UserId, category: Category, limit: Decimal) -> Result<Budget>;
    fn update_budget(&self, user: &UserId, id: &str, limit: Decimal) -> Result<Budget>;

    fn list_recurring(&self, user: &UserId) -> Result<Vec<RecurringTemplate>>;
    fn create_recurring(&self, user: &UserId, new: &NewRecurring) -> Result<RecurringTemplate>;
    fn update_recurring(
        &self,
        user: &UserId,
        id: &str,
        patch: &RecurringPatch,
    ) -> Result<RecurringTemplate>;
    fn delete_recurring(&self, user: &UserId, id: &str) -> Result<()>;

    /// Stored preferences, or the defaults when the user has none yet.
    fn preferences(&self, user: &UserId) -> Result<UserPreferences>;
    fn set_preferences(&self, user: &UserId, prefs: &UserPreferences) -> Result<UserPreferences>;
}

/// Create the missing budgets of a new ledger from `seeds`. Categories that
/// already have a budget are left alone, so seeding twice is harmless.
pub fn seed_budgets(
    store: &dyn LedgerStore,
    user: &UserId,
    seeds: &BTreeMap<Category, Decimal>,
) -> Result<Vec<Budget>> {
    let existing = store.list_budgets(user)?;
    let mut created = Vec::new();
    for (category, limit) in seeds {
        if existing.iter().any(|b| b.category == *category) {
            continue;
        }
        match store.create_budget(user, *category, *limit) {
            Ok(budget) => created.push(budget),
            Err(Error::DuplicateBudget(_)) => {}
            Err(e) => return Err(e),
        }
    }
    if !created.is_empty() {
        tracing::info!(user = %user, count = created.len(), "seeded default budgets");
    }
    Ok(created)
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
