// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! A user's working copy of their ledger.
//!
//! Mutations are commands. Updates and deletes land in the local snapshot
//! first and are then forwarded to the store; a store failure is logged and
//! counted, never retried, and the snapshot may differ from the store until
//! the next [`LedgerSession::reload`]. Creates need an id from the store, so
//! they are written first and appended once the store answers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::budget::{self, BudgetStatus, Insight};
use crate::error::{Error, Result};
use crate::ledger::{self, TrendPoint};
use crate::models::{
    Budget, NewRecurring, NewTransaction, RecurringTemplate, Transaction, TransactionPatch,
    UserId, UserPreferences, validate_limit,
};
use crate::registry::Currency;
use crate::store::LedgerStore;
use crate::utils;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LedgerSnapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub recurring: Vec<RecurringTemplate>,
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AddTransaction(NewTransaction),
    UpdateTransaction { id: String, patch: TransactionPatch },
    DeleteTransaction(String),
    UpdateBudget { id: String, limit: Decimal },
    AddRecurring(NewRecurring),
    DeleteRecurring(String),
    SetCurrency(Currency),
    ClearAll,
}

/// What a mutation did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Id handed out by the store for creates.
    pub created_id: Option<String>,
    /// Store calls that failed after the snapshot was already updated.
    pub store_failures: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub failed: usize,
}

pub struct LedgerSession<'a> {
    store: &'a dyn LedgerStore,
    user: UserId,
    today: NaiveDate,
    snapshot: LedgerSnapshot,
}

impl<'a> LedgerSession<'a> {
    /// Load `user`'s ledger from `store`.
    pub fn open(store: &'a dyn LedgerStore, user: UserId) -> Result<Self> {
        let mut session = LedgerSession {
            store,
            user,
            today: utils::today(),
            snapshot: LedgerSnapshot::default(),
        };
        session.reload()?;
        Ok(session)
    }

    /// Pin the date used for "current month" views.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn snapshot(&self) -> &LedgerSnapshot {
        &self.snapshot
    }

    pub fn currency(&self) -> Currency {
        self.snapshot.currency
    }

    pub fn store(&self) -> &'a dyn LedgerStore {
        self.store
    }

    /// Replace the snapshot with what the store currently holds.
    pub fn reload(&mut self) -> Result<()> {
        self.snapshot = LedgerSnapshot {
            transactions: self.store.list_transactions(&self.user)?,
            budgets: self.store.list_budgets(&self.user)?,
            recurring: self.store.list_recurring(&self.user)?,
            currency: self.store.preferences(&self.user)?.currency,
        };
        tracing::debug!(
            user = %self.user,
            transactions = self.snapshot.transactions.len(),
            budgets = self.snapshot.budgets.len(),
            recurring = self.snapshot.recurring.len(),
            "ledger loaded"
        );
        Ok(())
    }

    pub fn execute(&mut self, mutation: Mutation) -> Result<Outcome> {
        match mutation {
            Mutation::AddTransaction(new) => {
                new.validate()?;
                let tx = self.store.create_transaction(&self.user, &new)?;
                let id = tx.id.clone();
                self.snapshot.transactions.push(tx);
                Ok(Outcome {
                    created_id: Some(id),
                    store_failures: 0,
                })
            }
            Mutation::UpdateTransaction { id, patch } => {
                patch.validate()?;
                let local = self
                    .snapshot
                    .transactions
                    .iter_mut()
                    .find(|t| t.id == id)
                    .ok_or_else(|| Error::not_found("transaction", id.as_str()))?;
                local.apply(&patch);
                let res = self.store.update_transaction(&self.user, &id, &patch);
                Ok(self.settle("update transaction", &id, res))
            }
            Mutation::DeleteTransaction(id) => {
                self.snapshot.transactions.retain(|t| t.id != id);
                let res = self.store.delete_transaction(&self.user, &id);
                Ok(self.settle("delete transaction", &id, res))
            }
            Mutation::UpdateBudget { id, limit } => {
                validate_limit(limit)?;
                let local = self
                    .snapshot
                    .budgets
                    .iter_mut()
                    .find(|b| b.id == id)
                    .ok_or_else(|| Error::not_found("budget", id.as_str()))?;
                local.limit = limit;
                let res = self.store.update_budget(&self.user, &id, limit);
                Ok(self.settle("update budget", &id, res))
            }
            Mutation::AddRecurring(new) => {
                new.validate()?;
                let template = self.store.create_recurring(&self.user, &new)?;
                let id = template.id.clone();
                self.snapshot.recurring.push(template);
                Ok(Outcome {
                    created_id: Some(id),
                    store_failures: 0,
                })
            }
            Mutation::DeleteRecurring(id) => {
                self.snapshot.recurring.retain(|r| r.id != id);
                let res = self.store.delete_recurring(&self.user, &id);
                Ok(self.settle("delete recurring", &id, res))
            }
            Mutation::SetCurrency(currency) => {
                self.snapshot.currency = currency;
                let res = self
                    .store
                    .set_preferences(&self.user, &UserPreferences { currency });
                Ok(self.settle("set currency", currency.code(), res))
            }
            Mutation::ClearAll => Ok(self.clear_all()),
        }
    }

    // One delete per record, none awaited as a group; partial completion is
    // acceptable and shows up in the failure count.
    fn clear_all(&mut self) -> Outcome {
        let transactions = std::mem::take(&mut self.snapshot.transactions);
        let recurring = std::mem::take(&mut self.snapshot.recurring);
        self.snapshot.currency = Currency::default();

        let mut outcome = Outcome::default();
        for t in &transactions {
            let res = self.store.delete_transaction(&self.user, &t.id);
            outcome.store_failures += self.settle("delete transaction", &t.id, res).store_failures;
        }
        for r in &recurring {
            let res = self.store.delete_recurring(&self.user, &r.id);
            outcome.store_failures += self.settle("delete recurring", &r.id, res).store_failures;
        }
        let prefs = UserPreferences {
            currency: self.snapshot.currency,
        };
        let res = self.store.set_preferences(&self.user, &prefs);
        outcome.store_failures += self.settle("reset currency", "-", res).store_failures;

        tracing::info!(
            user = %self.user,
            transactions = transactions.len(),
            recurring = recurring.len(),
            failures = outcome.store_failures,
            "ledger cleared"
        );
        outcome
    }

    fn settle<T>(&self, op: &str, id: &str, res: Result<T>) -> Outcome {
        match res {
            Ok(_) => Outcome::default(),
            Err(err) => {
                tracing::warn!(user = %self.user, op, id, error = %err, "store call failed; local view kept");
                Outcome {
                    created_id: None,
                    store_failures: 1,
                }
            }
        }
    }

    /// Create every row independently. Rows the store rejects are counted
    /// and skipped.
    pub fn import(&mut self, rows: Vec<NewTransaction>) -> ImportReport {
        let mut report = ImportReport::default();
        for row in rows {
            match self.execute(Mutation::AddTransaction(row)) {
                Ok(_) => report.imported += 1,
                Err(err) => {
                    tracing::warn!(user = %self.user, error = %err, "import row rejected");
                    report.failed += 1;
                }
            }
        }
        tracing::info!(
            user = %self.user,
            imported = report.imported,
            failed = report.failed,
            "import finished"
        );
        report
    }

    pub fn month_transactions(&self) -> Vec<Transaction> {
        ledger::filter_by_month(&self.snapshot.transactions, self.today)
    }

    pub fn trend(&self, months: usize) -> Vec<TrendPoint> {
        ledger::monthly_trend(&self.snapshot.transactions, months, self.today)
    }

    pub fn insights(&self) -> Vec<Insight> {
        budget::evaluate(&self.snapshot.budgets, &self.snapshot.transactions, self.today)
    }

    pub fn budget_statuses(&self) -> Vec<BudgetStatus> {
        let month = self.month_transactions();
        self.snapshot
            .budgets
            .iter()
            .map(|b| budget::budget_status(b, &month))
            .collect()
    }
}
