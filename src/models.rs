// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::registry::{Category, Currency};

/// Owner of a ledger. Every store call is scoped by one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_source_id: Option<String>,
}

impl Transaction {
    pub fn apply(&mut self, patch: &TransactionPatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(ref description) = patch.description {
            self.description = description.trim().to_string();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}

/// A transaction that has not been given an id by a store yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub amount: Decimal,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_source_id: Option<String>,
}

impl NewTransaction {
    pub fn new(
        amount: Decimal,
        description: impl Into<String>,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        NewTransaction {
            amount,
            description: description.into(),
            category,
            date,
            recurring_source_id: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)?;
        validate_description(&self.description)
    }

    pub fn into_transaction(self, id: String) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            description: self.description.trim().to_string(),
            category: self.category,
            date: self.date,
            recurring_source_id: self.recurring_source_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionPatch {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.date.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        if let Some(ref description) = self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub category: Category,
    pub limit: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(Error::InvalidData(format!("Unknown frequency '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringKind {
    Expense,
    Income,
}

impl RecurringKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurringKind::Expense => "expense",
            RecurringKind::Income => "income",
        }
    }
}

impl fmt::Display for RecurringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurringKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(RecurringKind::Expense),
            "income" => Ok(RecurringKind::Income),
            other => Err(Error::InvalidData(format!("Unknown recurring type '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTemplate {
    pub id: String,
    pub amount: Decimal,
    pub description: String,
    pub category: Category,
    pub frequency: Frequency,
    pub next_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: RecurringKind,
}

impl RecurringTemplate {
    pub fn apply(&mut self, patch: &RecurringPatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(ref description) = patch.description {
            self.description = description.trim().to_string();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
        if let Some(next_date) = patch.next_date {
            self.next_date = next_date;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecurring {
    pub amount: Decimal,
    pub description: String,
    pub category: Category,
    pub frequency: Frequency,
    pub next_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: RecurringKind,
}

impl NewRecurring {
    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)?;
        validate_description(&self.description)
    }

    pub fn into_template(self, id: String) -> RecurringTemplate {
        RecurringTemplate {
            id,
            amount: self.amount,
            description: self.description.trim().to_string(),
            category: self.category,
            frequency: self.frequency,
            next_date: self.next_date,
            kind: self.kind,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecurringPatch {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub frequency: Option<Frequency>,
    pub next_date: Option<NaiveDate>,
    pub kind: Option<RecurringKind>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub currency: Currency,
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::Validation(format!(
            "amount must be greater than zero (got {})",
            amount
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(Error::Validation("description must not be empty".into()));
    }
    Ok(())
}

pub fn validate_limit(limit: Decimal) -> Result<()> {
    if limit < Decimal::ZERO {
        return Err(Error::Validation(format!(
            "budget limit must not be negative (got {})",
            limit
        )));
    }
    Ok(())
}
