// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget evaluation: how much of each category limit the current month has
//! consumed, and the insight messages derived from it.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::ledger::{category_spend, filter_by_month, monthly_trend, total};
use crate::models::{Budget, Transaction};
use crate::registry::{Category, Currency, format_money};
use crate::utils::{days_in_month, round_half_up};

/// Trend window used when comparing against the previous month.
pub const TREND_MONTHS: usize = 6;

/// Limit every spending category is seeded with at account creation.
pub const DEFAULT_LIMIT: i64 = 500;

/// `spent / limit`, or zero for a zero limit.
pub fn budget_fraction(spent: Decimal, limit: Decimal) -> Decimal {
    if limit.is_zero() {
        return Decimal::ZERO;
    }
    spent / limit
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    OverBudget {
        category: Category,
        overage: Decimal,
    },
    ForecastWarning {
        category: Category,
        days_until_over: i64,
    },
    NearBudget {
        category: Category,
        percent: i64,
        days_remaining: u32,
    },
    SpendingUp {
        percent: i64,
    },
    SpendingDown {
        percent: i64,
    },
    GetStarted,
}

impl Insight {
    pub fn severity(&self) -> Severity {
        match self {
            Insight::OverBudget { .. } | Insight::ForecastWarning { .. } => Severity::Warning,
            Insight::NearBudget { .. } | Insight::SpendingUp { .. } | Insight::GetStarted => {
                Severity::Info
            }
            Insight::SpendingDown { .. } => Severity::Success,
        }
    }

    pub fn message(&self, currency: Currency) -> String {
        match self {
            Insight::OverBudget { category, overage } => format!(
                "You've exceeded your {} budget by {}.",
                category,
                format_money(*overage, currency)
            ),
            Insight::ForecastWarning {
                category,
                days_until_over,
            } => format!(
                "At your current rate, you will exceed your {} budget in {} day{}.",
                category,
                days_until_over,
                if *days_until_over == 1 { "" } else { "s" }
            ),
            Insight::NearBudget {
                category,
                percent,
                days_remaining,
            } => format!(
                "Your {} budget is {}% spent with {} days remaining.",
                category, percent, days_remaining
            ),
            Insight::SpendingUp { percent } => {
                format!("Spending is up {}% compared to last month.", percent)
            }
            Insight::SpendingDown { percent } => {
                format!("Spending is down {}% compared to last month.", percent)
            }
            Insight::GetStarted => {
                "Start adding expenses to see personalized insights and forecasts.".to_string()
            }
        }
    }
}

/// Classify one budget against what has been spent so far this month.
///
/// Precedence: over budget, then an early-month projection once more than half
/// the limit is gone, then the near-budget notice above 80%.
pub fn classify(
    budget: &Budget,
    spent: Decimal,
    day_of_month: u32,
    days_in_month: u32,
) -> Option<Insight> {
    let fraction = budget_fraction(spent, budget.limit);
    let half = Decimal::new(5, 1);
    let day = Decimal::from(day_of_month);
    let month_days = Decimal::from(days_in_month);

    if fraction >= Decimal::ONE {
        return Some(Insight::OverBudget {
            category: budget.category,
            overage: spent - budget.limit,
        });
    }

    if fraction > half && day < month_days * half {
        return forecast_days_until_over(spent, budget.limit, day_of_month, days_in_month).map(
            |days_until_over| Insight::ForecastWarning {
                category: budget.category,
                days_until_over,
            },
        );
    }

    if fraction > Decimal::new(8, 1) {
        return Some(Insight::NearBudget {
            category: budget.category,
            percent: round_half_up(fraction * Decimal::ONE_HUNDRED),
            days_remaining: days_in_month.saturating_sub(day_of_month),
        });
    }

    None
}

/// Linear burn-rate projection: `spent / day_of_month` per day across the
/// whole month. Returns the rounded number of days left before the limit is
/// crossed when the projection ends above `limit`.
///
/// This is the bare projection; [`classify`] only consults it when more than
/// half the limit is spent before mid-month.
pub fn forecast_days_until_over(
    spent: Decimal,
    limit: Decimal,
    day_of_month: u32,
    days_in_month: u32,
) -> Option<i64> {
    if day_of_month == 0 || spent <= Decimal::ZERO {
        return None;
    }
    let daily_rate = spent / Decimal::from(day_of_month);
    let projected = daily_rate * Decimal::from(days_in_month);
    if projected > limit {
        Some(round_half_up((limit - spent) / daily_rate))
    } else {
        None
    }
}

/// Month-over-month comparison. Silent unless both months have spending and
/// the change is above +20% or below -10%.
pub fn trend_insight(current_total: Decimal, previous_total: Decimal) -> Option<Insight> {
    if current_total <= Decimal::ZERO || previous_total <= Decimal::ZERO {
        return None;
    }
    let change = (current_total - previous_total) / previous_total * Decimal::ONE_HUNDRED;
    if change > Decimal::from(20) {
        Some(Insight::SpendingUp {
            percent: round_half_up(change),
        })
    } else if change < Decimal::from(-10) {
        Some(Insight::SpendingDown {
            percent: round_half_up(change).abs(),
        })
    } else {
        None
    }
}

/// All insights for the month containing `today`: per-budget messages in
/// budget order, then the trend message, then the empty-state fallback.
pub fn evaluate(budgets: &[Budget], transactions: &[Transaction], today: NaiveDate) -> Vec<Insight> {
    let month = filter_by_month(transactions, today);
    let month_total = total(&month);
    let day_of_month = today.day();
    let month_days = days_in_month(today);

    let mut insights: Vec<Insight> = budgets
        .iter()
        .filter_map(|b| classify(b, category_spend(b.category, &month), day_of_month, month_days))
        .collect();

    let trend = monthly_trend(transactions, TREND_MONTHS, today);
    if month_total > Decimal::ZERO && trend.len() >= 2 {
        let previous = trend[trend.len() - 2].total;
        if let Some(insight) = trend_insight(month_total, previous) {
            insights.push(insight);
        }
    }

    if insights.is_empty() && month_total.is_zero() {
        insights.push(Insight::GetStarted);
    }
    insights
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetState {
    Ok,
    Almost,
    Over,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub id: String,
    pub category: Category,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percent: i64,
    pub state: BudgetState,
}

/// Progress of one budget given the month's transactions.
pub fn budget_status(budget: &Budget, month_transactions: &[Transaction]) -> BudgetStatus {
    let spent = category_spend(budget.category, month_transactions);
    let percent_exact = budget_fraction(spent, budget.limit) * Decimal::ONE_HUNDRED;
    let state = if percent_exact > Decimal::ONE_HUNDRED {
        BudgetState::Over
    } else if percent_exact > Decimal::from(80) {
        BudgetState::Almost
    } else {
        BudgetState::Ok
    };
    BudgetStatus {
        id: budget.id.clone(),
        category: budget.category,
        limit: budget.limit,
        spent,
        remaining: budget.limit - spent,
        percent: round_half_up(percent_exact),
        state,
    }
}

/// Limits seeded for a new ledger: every spending category at the default.
pub fn default_budget_seeds() -> BTreeMap<Category, Decimal> {
    [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Shopping,
        Category::Healthcare,
    ]
    .into_iter()
    .map(|c| (c, Decimal::from(DEFAULT_LIMIT)))
    .collect()
}

fn jpy_limit(category: Category) -> Option<Decimal> {
    let yen = match category {
        Category::Food => 50_000,
        Category::Transport => 15_000,
        Category::Entertainment => 20_000,
        Category::Utilities => 25_000,
        Category::Shopping => 30_000,
        Category::Healthcare => 10_000,
        Category::Income | Category::Other => return None,
    };
    Some(Decimal::from(yen))
}

/// Budgets still sitting at the dollar-sized default after switching to yen,
/// paired with a yen-sized replacement limit.
pub fn jpy_rescale_plan(budgets: &[Budget], currency: Currency) -> Vec<(String, Decimal)> {
    if currency != Currency::Jpy {
        return Vec::new();
    }
    let default_limit = Decimal::from(DEFAULT_LIMIT);
    budgets
        .iter()
        .filter(|b| b.limit == default_limit)
        .filter_map(|b| jpy_limit(b.category).map(|limit| (b.id.clone(), limit)))
        .collect()
}
