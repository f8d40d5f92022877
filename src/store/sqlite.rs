// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use super::{LedgerStore, new_id};
use crate::db::init_schema;
use crate::error::{Error, Result};
use crate::models::{
    Budget, NewRecurring, NewTransaction, RecurringPatch, RecurringTemplate, Transaction,
    TransactionPatch, UserId, UserPreferences,
};
use crate::registry::Category;
use crate::utils::{parse_date, parse_decimal};

/// SQLite-backed store. Amounts are kept as decimal text so no precision is
/// lost on the way through the database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(SqliteStore { conn })
    }

    pub fn open(path: &Path) -> Result<Self> {
        Self::new(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn find_transaction(&self, user: &UserId, id: &str) -> Result<Transaction> {
        let raw = self
            .conn
            .query_row(
                "SELECT id, amount, description, category, date, recurring_source_id
                 FROM transactions WHERE user_id=?1 AND id=?2",
                params![user.as_str(), id],
                RawTransaction::from_row,
            )
            .optional()?;
        raw.ok_or_else(|| Error::not_found("transaction", id))?
            .into_model()
    }

    fn find_recurring(&self, user: &UserId, id: &str) -> Result<RecurringTemplate> {
        let raw = self
            .conn
            .query_row(
                "SELECT id, amount, description, category, frequency, next_date, kind
                 FROM recurring WHERE user_id=?1 AND id=?2",
                params![user.as_str(), id],
                RawRecurring::from_row,
            )
            .optional()?;
        raw.ok_or_else(|| Error::not_found("recurring template", id))?
            .into_model()
    }
}

struct RawTransaction {
    id: String,
    amount: String,
    description: String,
    category: String,
    date: String,
    recurring_source_id: Option<String>,
}

impl RawTransaction {
    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(RawTransaction {
            id: r.get(0)?,
            amount: r.get(1)?,
            description: r.get(2)?,
            category: r.get(3)?,
            date: r.get(4)?,
            recurring_source_id: r.get(5)?,
        })
    }

    fn into_model(self) -> Result<Transaction> {
        Ok(Transaction {
            amount: parse_decimal(&self.amount)?,
            category: self.category.parse()?,
            date: parse_date(&self.date)?,
            id: self.id,
            description: self.description,
            recurring_source_id: self.recurring_source_id,
        })
    }
}

struct RawRecurring {
    id: String,
    amount: String,
    description: String,
    category: String,
    frequency: String,
    next_date: String,
    kind: String,
}

impl RawRecurring {
    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(RawRecurring {
            id: r.get(0)?,
            amount: r.get(1)?,
            description: r.get(2)?,
            category: r.get(3)?,
            frequency: r.get(4)?,
            next_date: r.get(5)?,
            kind: r.get(6)?,
        })
    }

    fn into_model(self) -> Result<RecurringTemplate> {
        Ok(RecurringTemplate {
            amount: parse_decimal(&self.amount)?,
            category: self.category.parse()?,
            frequency: self.frequency.parse()?,
            next_date: parse_date(&self.next_date)?,
            kind: self.kind.parse()?,
            id: self.id,
            description: self.description,
        })
    }
}

impl LedgerStore for SqliteStore {
    fn list_transactions(&self, user: &UserId) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, description, category, date, recurring_source_id
             FROM transactions WHERE user_id=?1 ORDER BY date DESC, created_at DESC",
        )?;
        let rows = stmt.query_map(params![user.as_str()], RawTransaction::from_row)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?.into_model()?);
        }
        Ok(data)
    }

    fn create_transaction(&self, user: &UserId, new: &NewTransaction) -> Result<Transaction> {
        let tx = new.clone().into_transaction(new_id());
        self.conn.execute(
            "INSERT INTO transactions(id, user_id, amount, description, category, date, recurring_source_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                tx.id,
                user.as_str(),
                tx.amount.to_string(),
                tx.description,
                tx.category.as_str(),
                tx.date.to_string(),
                tx.recurring_source_id
            ],
        )?;
        tracing::debug!(user = %user, id = %tx.id, "transaction created");
        Ok(tx)
    }

    fn update_transaction(
        &self,
        user: &UserId,
        id: &str,
        patch: &TransactionPatch,
    ) -> Result<Transaction> {
        let mut tx = self.find_transaction(user, id)?;
        tx.apply(patch);
        self.conn.execute(
            "UPDATE transactions SET amount=?1, description=?2, category=?3, date=?4
             WHERE user_id=?5 AND id=?6",
            params![
                tx.amount.to_string(),
                tx.description,
                tx.category.as_str(),
                tx.date.to_string(),
                user.as_str(),
                id
            ],
        )?;
        Ok(tx)
    }

    fn delete_transaction(&self, user: &UserId, id: &str) -> Result<()> {
        let n = self.conn.execute(
            "DELETE FROM transactions WHERE user_id=?1 AND id=?2",
            params![user.as_str(), id],
        )?;
        if n == 0 {
            return Err(Error::not_found("transaction", id));
        }
        Ok(())
    }

    fn list_budgets(&self, user: &UserId) -> Result<Vec<Budget>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, category, limit_amount FROM budgets WHERE user_id=?1")?;
        let rows = stmt.query_map(params![user.as_str()], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
            ))
        })?;
        let mut data = Vec::new();
        for row in rows {
            let (id, category, limit) = row?;
            data.push(Budget {
                id,
                category: category.parse()?,
                limit: parse_decimal(&limit)?,
            });
        }
        // Registry order, not the order rows happen to come back in
        data.sort_by_key(|b| b.category);
        Ok(data)
    }

    fn create_budget(&self, user: &UserId, category: Category, limit: Decimal) -> Result<Budget> {
        let exists: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM budgets WHERE user_id=?1 AND category=?2",
                params![user.as_str(), category.as_str()],
                |r| r.get(0),
            )
            .optional()?;
        if exists.is_some() {
            return Err(Error::DuplicateBudget(category));
        }
        let budget = Budget {
            id: new_id(),
            category,
            limit,
        };
        self.conn.execute(
            "INSERT INTO budgets(id, user_id, category, limit_amount) VALUES (?1,?2,?3,?4)",
            params![budget.id, user.as_str(), category.as_str(), limit.to_string()],
        )?;
        Ok(budget)
    }

    fn update_budget(&self, user: &UserId, id: &str, limit: Decimal) -> Result<Budget> {
        let n = self.conn.execute(
            "UPDATE budgets SET limit_amount=?1 WHERE user_id=?2 AND id=?3",
            params![limit.to_string(), user.as_str(), id],
        )?;
        if n == 0 {
            return Err(Error::not_found("budget", id));
        }
        let category: String = self.conn.query_row(
            "SELECT category FROM budgets WHERE user_id=?1 AND id=?2",
            params![user.as_str(), id],
            |r| r.get(0),
        )?;
        Ok(Budget {
            id: id.to_string(),
            category: category.parse()?,
            limit,
        })
    }

    fn list_recurring(&self, user: &UserId) -> Result<Vec<RecurringTemplate>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, description, category, frequency, next_date, kind
             FROM recurring WHERE user_id=?1 ORDER BY next_date, created_at",
        )?;
        let rows = stmt.query_map(params![user.as_str()], RawRecurring::from_row)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?.into_model()?);
        }
        Ok(data)
    }

    fn create_recurring(&self, user: &UserId, new: &NewRecurring) -> Result<RecurringTemplate> {
        let template = new.clone().into_template(new_id());
        self.conn.execute(
            "INSERT INTO recurring(id, user_id, amount, description, category, frequency, next_date, kind)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8)",
            params![
                template.id,
                user.as_str(),
                template.amount.to_string(),
                template.description,
                template.category.as_str(),
                template.frequency.as_str(),
                template.next_date.to_string(),
                template.kind.as_str()
            ],
        )?;
        Ok(template)
    }

    fn update_recurring(
        &self,
        user: &UserId,
        id: &str,
        patch: &RecurringPatch,
    ) -> Result<RecurringTemplate> {
        let mut template = self.find_recurring(user, id)?;
        template.apply(patch);
        self.conn.execute(
            "UPDATE recurring SET amount=?1, description=?2, category=?3, frequency=?4, next_date=?5, kind=?6
             WHERE user_id=?7 AND id=?8",
            params![
                template.amount.to_string(),
                template.description,
                template.category.as_str(),
                template.frequency.as_str(),
                template.next_date.to_string(),
                template.kind.as_str(),
                user.as_str(),
                id
            ],
        )?;
        Ok(template)
    }

    fn delete_recurring(&self, user: &UserId, id: &str) -> Result<()> {
        let n = self.conn.execute(
            "DELETE FROM recurring WHERE user_id=?1 AND id=?2",
            params![user.as_str(), id],
        )?;
        if n == 0 {
            return Err(Error::not_found("recurring template", id));
        }
        Ok(())
    }

    fn preferences(&self, user: &UserId) -> Result<UserPreferences> {
        let v: Option<String> = self
            .conn
            .query_row(
                "SELECT currency FROM preferences WHERE user_id=?1",
                params![user.as_str()],
                |r| r.get(0),
            )
            .optional()?;
        match v {
            Some(code) => Ok(UserPreferences {
                currency: code.parse()?,
            }),
            None => Ok(UserPreferences::default()),
        }
    }

    fn set_preferences(&self, user: &UserId, prefs: &UserPreferences) -> Result<UserPreferences> {
        self.conn.execute(
            "INSERT INTO preferences(user_id, currency) VALUES(?1, ?2)
             ON CONFLICT(user_id) DO UPDATE SET currency=excluded.currency",
            params![user.as_str(), prefs.currency.code()],
        )?;
        Ok(*prefs)
    }
}
