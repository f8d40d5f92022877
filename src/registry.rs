// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Static registry of expense categories and supported currencies.
//!
//! Categories are declared in a fixed order. That order is used for keyword
//! matching in the quick-entry parser and for the ordering of aggregated maps.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Utilities,
    Shopping,
    Healthcare,
    Income,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Shopping,
        Category::Healthcare,
        Category::Income,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Utilities => "utilities",
            Category::Shopping => "shopping",
            Category::Healthcare => "healthcare",
            Category::Income => "income",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food & Dining",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Shopping => "Shopping",
            Category::Healthcare => "Healthcare",
            Category::Income => "Income",
            Category::Other => "Other",
        }
    }

    /// Display colour as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Food => "#10b981",
            Category::Transport => "#3b82f6",
            Category::Entertainment => "#f59e0b",
            Category::Utilities => "#ef4444",
            Category::Shopping => "#8b5cf6",
            Category::Healthcare => "#ec4899",
            Category::Income => "#06b6d4",
            Category::Other => "#6b7280",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidData(format!("Unknown category '{}'", wanted)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Aud,
    Cad,
    Chf,
    Cny,
    Inr,
    Brl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Prefix,
    PrefixSpaced,
    SuffixSpaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grouping {
    Thousands,
    // 12,34,567: last group of three, then pairs
    Indian,
}

#[derive(Debug, Clone, Copy)]
struct NumberStyle {
    placement: Placement,
    decimal: char,
    group: &'static str,
    grouping: Grouping,
    fraction_digits: u32,
}

impl Currency {
    pub const ALL: [Currency; 10] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Aud,
        Currency::Cad,
        Currency::Chf,
        Currency::Cny,
        Currency::Inr,
        Currency::Brl,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
            Currency::Chf => "CHF",
            Currency::Cny => "CNY",
            Currency::Inr => "INR",
            Currency::Brl => "BRL",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
            Currency::Jpy => "Japanese Yen",
            Currency::Aud => "Australian Dollar",
            Currency::Cad => "Canadian Dollar",
            Currency::Chf => "Swiss Franc",
            Currency::Cny => "Chinese Yuan",
            Currency::Inr => "Indian Rupee",
            Currency::Brl => "Brazilian Real",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "\u{20AC}",
            Currency::Gbp => "\u{00A3}",
            Currency::Jpy => "\u{00A5}",
            Currency::Aud => "A$",
            Currency::Cad => "C$",
            Currency::Chf => "CHF",
            Currency::Cny => "\u{00A5}",
            Currency::Inr => "\u{20B9}",
            Currency::Brl => "R$",
        }
    }

    pub fn locale(&self) -> &'static str {
        match self {
            Currency::Usd => "en-US",
            Currency::Eur => "de-DE",
            Currency::Gbp => "en-GB",
            Currency::Jpy => "ja-JP",
            Currency::Aud => "en-AU",
            Currency::Cad => "en-CA",
            Currency::Chf => "de-CH",
            Currency::Cny => "zh-CN",
            Currency::Inr => "en-IN",
            Currency::Brl => "pt-BR",
        }
    }

    /// Symbol as printed in the currency's home locale. Australian and
    /// Canadian locales print their own dollar as a bare `$`.
    fn local_symbol(&self) -> &'static str {
        match self {
            Currency::Aud | Currency::Cad => "$",
            Currency::Jpy => "\u{FFE5}",
            other => other.symbol(),
        }
    }

    fn number_style(&self) -> NumberStyle {
        let western = NumberStyle {
            placement: Placement::Prefix,
            decimal: '.',
            group: ",",
            grouping: Grouping::Thousands,
            fraction_digits: 2,
        };
        match self {
            Currency::Eur => NumberStyle {
                placement: Placement::SuffixSpaced,
                decimal: ',',
                group: ".",
                ..western
            },
            Currency::Jpy => NumberStyle {
                fraction_digits: 0,
                ..western
            },
            Currency::Chf => NumberStyle {
                placement: Placement::PrefixSpaced,
                group: "\u{2019}",
                ..western
            },
            Currency::Inr => NumberStyle {
                grouping: Grouping::Indian,
                ..western
            },
            Currency::Brl => NumberStyle {
                placement: Placement::PrefixSpaced,
                decimal: ',',
                group: ".",
                ..western
            },
            _ => western,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidData(format!("Unsupported currency '{}'", wanted)))
    }
}

/// Format an amount the way the currency's home locale prints it,
/// e.g. `$1,234.50`, `1.234,50 €` or `₹1,23,456.00`.
pub fn format_money(amount: Decimal, currency: Currency) -> String {
    let style = currency.number_style();
    let rounded =
        amount.round_dp_with_strategy(style.fraction_digits, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.*}", style.fraction_digits as usize, rounded.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut body = group_digits(int_part, style.group, style.grouping);
    if let Some(frac) = frac_part {
        body.push(style.decimal);
        body.push_str(frac);
    }

    let sign = if negative { "-" } else { "" };
    let symbol = currency.local_symbol();
    match style.placement {
        Placement::Prefix => format!("{}{}{}", sign, symbol, body),
        Placement::PrefixSpaced => format!("{}{} {}", sign, symbol, body),
        Placement::SuffixSpaced => format!("{}{} {}", sign, body, symbol),
    }
}

fn group_digits(int_part: &str, sep: &str, grouping: Grouping) -> String {
    let digits: Vec<char> = int_part.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut end = digits.len();
    let mut size = 3;
    while end > 0 {
        let start = end.saturating_sub(size);
        groups.push(digits[start..end].iter().collect());
        end = start;
        if grouping == Grouping::Indian {
            size = 2;
        }
    }
    groups.reverse();
    groups.join(sep)
}
