// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use rust_decimal::Decimal;

use super::{LedgerStore, new_id};
use crate::error::{Error, Result};
use crate::models::{
    Budget, NewRecurring, NewTransaction, RecurringPatch, RecurringTemplate, Transaction,
    TransactionPatch, UserId, UserPreferences,
};
use crate::registry::Category;

#[derive(Debug, Default)]
struct UserLedger {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    recurring: Vec<RecurringTemplate>,
    preferences: Option<UserPreferences>,
}

/// Process-local store, one collection set per user. Nothing is written to
/// disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<UserId, UserLedger>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserId, UserLedger>>> {
        self.users
            .lock()
            .map_err(|_| Error::Store("memory store lock poisoned".into()))
    }

    fn with_user<T>(&self, user: &UserId, f: impl FnOnce(&mut UserLedger) -> Result<T>) -> Result<T> {
        let mut users = self.lock()?;
        f(users.entry(user.clone()).or_default())
    }
}

impl LedgerStore for MemoryStore {
    fn list_transactions(&self, user: &UserId) -> Result<Vec<Transaction>> {
        self.with_user(user, |l| Ok(l.transactions.clone()))
    }

    fn create_transaction(&self, user: &UserId, new: &NewTransaction) -> Result<Transaction> {
        self.with_user(user, |l| {
            let tx = new.clone().into_transaction(new_id());
            l.transactions.push(tx.clone());
            Ok(tx)
        })
    }

    fn update_transaction(
        &self,
        user: &UserId,
        id: &str,
        patch: &TransactionPatch,
    ) -> Result<Transaction> {
        self.with_user(user, |l| {
            let tx = l
                .transactions
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| Error::not_found("transaction", id))?;
            tx.apply(patch);
            Ok(tx.clone())
        })
    }

    fn delete_transaction(&self, user: &UserId, id: &str) -> Result<()> {
        self.with_user(user, |l| {
            let before = l.transactions.len();
            l.transactions.retain(|t| t.id != id);
            if l.transactions.len() == before {
                return Err(Error::not_found("transaction", id));
            }
            Ok(())
        })
    }

    fn list_budgets(&self, user: &UserId) -> Result<Vec<Budget>> {
        self.with_user(user, |l| Ok(l.budgets.clone()))
    }

    fn create_budget(&self, user: &UserId, category: Category, limit: Decimal) -> Result<Budget> {
        self.with_user(user, |l| {
            if l.budgets.iter().any(|b| b.category == category) {
                return Err(Error::DuplicateBudget(category));
            }
            let budget = Budget {
                id: new_id(),
                category,
                limit,
            };
            l.budgets.push(budget.clone());
            Ok(budget)
        })
    }

    fn update_budget(&self, user: &UserId, id: &str, limit: Decimal) -> Result<Budget> {
        self.with_user(user, |l| {
            let budget = l
                .budgets
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or_else(|| Error::not_found("budget", id))?;
            budget.limit = limit;
            Ok(budget.clone())
        })
    }

    fn list_recurring(&self, user: &UserId) -> Result<Vec<RecurringTemplate>> {
        self.with_user(user, |l| Ok(l.recurring.clone()))
    }

    fn create_recurring(&self, user: &UserId, new: &NewRecurring) -> Result<RecurringTemplate> {
        self.with_user(user, |l| {
            let template = new.clone().into_template(new_id());
            l.recurring.push(template.clone());
            Ok(template)
        })
    }

    fn update_recurring(
        &self,
        user: &UserId,
        id: &str,
        patch: &RecurringPatch,
    ) -> Result<RecurringTemplate> {
        self.with_user(user, |l| {
            let template = l
                .recurring
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| Error::not_found("recurring template", id))?;
            template.apply(patch);
            Ok(template.clone())
        })
    }

    fn delete_recurring(&self, user: &UserId, id: &str) -> Result<()> {
        self.with_user(user, |l| {
            let before = l.recurring.len();
            l.recurring.retain(|r| r.id != id);
            if l.recurring.len() == before {
                return Err(Error::not_found("recurring template", id));
            }
            Ok(())
        })
    }

    fn preferences(&self, user: &UserId) -> Result<UserPreferences> {
        self.with_user(user, |l| Ok(l.preferences.unwrap_or_default()))
    }

    fn set_preferences(&self, user: &UserId, prefs: &UserPreferences) -> Result<UserPreferences> {
        self.with_user(user, |l| {
            l.preferences = Some(*prefs);
            Ok(*prefs)
        })
    }
}
