// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over a list of transactions.
//!
//! Everything here is a pure function of its inputs. Amounts are summed as
//! given: zero or negative amounts are not rejected, that is the job of the
//! entry points that create transactions.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::Transaction;
use crate::registry::Category;
use crate::utils::month_start;

/// Transactions dated in the same calendar year and month as `reference`.
pub fn filter_by_month(transactions: &[Transaction], reference: NaiveDate) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.date.year() == reference.year() && t.date.month() == reference.month())
        .cloned()
        .collect()
}

pub fn total(transactions: &[Transaction]) -> Decimal {
    transactions.iter().map(|t| t.amount).sum()
}

/// Totals per category. Categories without transactions have no entry.
pub fn sum_by_category(transactions: &[Transaction]) -> BTreeMap<Category, Decimal> {
    let mut totals = BTreeMap::new();
    for t in transactions {
        *totals.entry(t.category).or_insert(Decimal::ZERO) += t.amount;
    }
    totals
}

pub fn category_spend(category: Category, transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.category == category)
        .map(|t| t.amount)
        .sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: NaiveDate,
    pub label: String,
    pub total: Decimal,
}

/// One point per calendar month for the `month_count` months ending with the
/// month of `today`, oldest first.
pub fn monthly_trend(
    transactions: &[Transaction],
    month_count: usize,
    today: NaiveDate,
) -> Vec<TrendPoint> {
    let current = month_start(today);
    (0..month_count)
        .rev()
        .map(|back| {
            let month = u32::try_from(back)
                .ok()
                .and_then(|back| current.checked_sub_months(Months::new(back)))
                .unwrap_or(NaiveDate::MIN);
            TrendPoint {
                month,
                label: month.format("%b").to_string(),
                total: total(&filter_by_month(transactions, month)),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub label: &'static str,
    pub color: &'static str,
    pub total: Decimal,
}

/// Categories with a positive total, largest first.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let mut shares: Vec<CategoryShare> = sum_by_category(transactions)
        .into_iter()
        .filter(|(_, amount)| *amount > Decimal::ZERO)
        .map(|(category, total)| CategoryShare {
            category,
            label: category.label(),
            color: category.color(),
            total,
        })
        .collect();
    shares.sort_by(|a, b| b.total.cmp(&a.total));
    shares
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAverage {
    pub category: Category,
    pub count: usize,
    pub average: Decimal,
}

pub fn average_by_category(transactions: &[Transaction]) -> Vec<CategoryAverage> {
    let mut acc: BTreeMap<Category, (Decimal, usize)> = BTreeMap::new();
    for t in transactions {
        let entry = acc.entry(t.category).or_insert((Decimal::ZERO, 0));
        entry.0 += t.amount;
        entry.1 += 1;
    }
    acc.into_iter()
        .map(|(category, (sum, count))| CategoryAverage {
            category,
            count,
            average: (sum / Decimal::from(count))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub month: NaiveDate,
    pub total: Decimal,
    pub count: usize,
}

impl MonthSummary {
    pub fn for_month(transactions: &[Transaction], reference: NaiveDate) -> Self {
        let in_month = filter_by_month(transactions, reference);
        MonthSummary {
            month: month_start(reference),
            total: total(&in_month),
            count: in_month.len(),
        }
    }
}
