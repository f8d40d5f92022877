// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Heuristic quick-entry parser: pulls an amount, a category and a date out of
//! text such as `"Spent $25 on lunch yesterday"`.
//!
//! Parsing never fails. Anything that cannot be recognised falls back to a
//! default (`None` amount, [`Category::Other`], today's date) and the caller
//! decides whether the result is complete enough to save.

use chrono::{Days, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::NewTransaction;
use crate::registry::Category;

// A number with optional comma thousands separators and at most two decimals.
const NUMBER: &str = r"[0-9][0-9,]*(?:\.[0-9]{1,2})?";

/// Amount patterns, tried in order. The first one that matches wins.
static AMOUNT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        format!(r"\$\s?({NUMBER})"),
        format!(r"(?i)(?:spent|paid|cost|was|for)\s+\$?({NUMBER})"),
        format!(r"(?i)({NUMBER})\s*(?:dollars|usd|bucks)"),
        format!(r"(?i)({NUMBER})\s*(?:euros?|eur)"),
        format!(r"(?i)({NUMBER})\s*(?:pounds?|gbp)"),
        format!(r"(?i)({NUMBER})\s*(?:yen|jpy)"),
        format!(r"^\s*({NUMBER})\s"),
        format!(r"({NUMBER})"),
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Trigger words per category, scanned in this order. `Other` has none and is
/// the fallback.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &[
            "food", "lunch", "dinner", "breakfast", "coffee", "restaurant", "ramen", "pizza",
            "grocery", "groceries", "eat", "meal", "snack", "cafe", "drink", "beer", "wine",
        ],
    ),
    (
        Category::Transport,
        &[
            "uber", "lyft", "taxi", "bus", "train", "subway", "gas", "fuel", "parking", "toll",
            "flight", "travel", "ride",
        ],
    ),
    (
        Category::Entertainment,
        &[
            "movie",
            "game",
            "concert",
            "netflix",
            "spotify",
            "subscription",
            "ticket",
            "show",
            "museum",
            "book",
        ],
    ),
    (
        Category::Utilities,
        &[
            "electricity",
            "electric",
            "water",
            "internet",
            "wifi",
            "phone",
            "bill",
            "rent",
            "insurance",
            "utility",
        ],
    ),
    (
        Category::Shopping,
        &[
            "amazon", "clothes", "clothing", "shoes", "shirt", "purchase", "bought", "store",
            "shop", "online",
        ],
    ),
    (
        Category::Healthcare,
        &[
            "doctor", "hospital", "pharmacy", "medicine", "medical", "dentist", "health", "gym",
            "fitness",
        ],
    ),
    (
        Category::Income,
        &[
            "salary",
            "income",
            "earned",
            "received",
            "freelance",
            "payment received",
            "paycheck",
        ],
    ),
    (Category::Other, &[]),
];

/// Relative date phrases, checked in order.
const RELATIVE_DAYS: &[(&str, u64)] = &[("yesterday", 1), ("last week", 7)];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickEntry {
    pub amount: Option<Decimal>,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
}

impl QuickEntry {
    /// Whether the entry can be saved as is.
    pub fn is_complete(&self) -> bool {
        matches!(self.amount, Some(a) if a > Decimal::ZERO) && !self.description.is_empty()
    }

    pub fn into_new_transaction(self) -> Result<NewTransaction> {
        let amount = self
            .amount
            .ok_or_else(|| Error::Validation("no amount found in the entry".into()))?;
        let tx = NewTransaction::new(amount, self.description, self.category, self.date);
        tx.validate()?;
        Ok(tx)
    }
}

pub fn parse_quick_entry(text: &str, today: NaiveDate) -> QuickEntry {
    let lower = text.to_lowercase();
    QuickEntry {
        amount: extract_amount(text),
        category: infer_category(&lower),
        description: text.trim().to_string(),
        date: infer_date(&lower, today),
    }
}

pub fn extract_amount(text: &str) -> Option<Decimal> {
    // The first pattern that matches decides, even if its number is unusable.
    let caps = AMOUNT_PATTERNS.iter().find_map(|re| re.captures(text))?;
    let raw = caps.get(1)?.as_str().replace(',', "");
    raw.parse::<Decimal>().ok()
}

/// First category in declared order with a keyword contained in `lower`.
pub fn infer_category(lower: &str) -> Category {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

fn infer_date(lower: &str, today: NaiveDate) -> NaiveDate {
    RELATIVE_DAYS
        .iter()
        .find(|(phrase, _)| lower.contains(phrase))
        .and_then(|(_, back)| today.checked_sub_days(Days::new(*back)))
        .unwrap_or(today)
}
