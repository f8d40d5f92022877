// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use financeflow::parser::{extract_amount, infer_category, parse_quick_entry};
use financeflow::registry::Category;
use rust_decimal::Decimal;
use std::str::FromStr;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn dollar_amount_food_yesterday() {
    let e = parse_quick_entry("Spent $25 on lunch at the cafe yesterday", today());
    assert_eq!(e.amount, Some(dec("25")));
    assert_eq!(e.category, Category::Food);
    // Crosses the month boundary
    assert_eq!(e.date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    assert_eq!(e.description, "Spent $25 on lunch at the cafe yesterday");
    assert!(e.is_complete());
}

#[test]
fn bare_number_at_start() {
    let e = parse_quick_entry("45.50 groceries", today());
    assert_eq!(e.amount, Some(dec("45.50")));
    assert_eq!(e.category, Category::Food);
    assert_eq!(e.date, today());
}

#[test]
fn trailing_number_falls_back() {
    let e = parse_quick_entry("Netflix subscription 14.99", today());
    assert_eq!(e.amount, Some(dec("14.99")));
    assert_eq!(e.category, Category::Entertainment);
}

#[test]
fn keyword_without_amount() {
    let e = parse_quick_entry("train ticket", today());
    assert_eq!(e.amount, None);
    assert_eq!(e.category, Category::Transport);
    assert!(!e.is_complete());
    assert!(e.into_new_transaction().is_err());
}

#[test]
fn no_signal_takes_all_defaults() {
    let e = parse_quick_entry("random text with no signal", today());
    assert_eq!(e.amount, None);
    assert_eq!(e.category, Category::Other);
    assert_eq!(e.date, today());
}

#[test]
fn last_week_goes_back_seven_days() {
    let e = parse_quick_entry("paid 30 for parking last week", today());
    assert_eq!(e.amount, Some(dec("30")));
    assert_eq!(e.category, Category::Transport);
    assert_eq!(e.date, NaiveDate::from_ymd_opt(2025, 2, 22).unwrap());
}

#[test]
fn yesterday_wins_over_last_week() {
    let e = parse_quick_entry("yesterday I realised last week's bill was 20", today());
    assert_eq!(e.date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
}

#[test]
fn description_is_trimmed_only() {
    let e = parse_quick_entry("   coffee 4.50  ", today());
    assert_eq!(e.description, "coffee 4.50");
}

#[test]
fn earlier_patterns_take_precedence() {
    // A verb-led number beats a number at the start
    assert_eq!(extract_amount("2 tickets cost 30"), Some(dec("30")));
    assert_eq!(extract_amount("2 tickets, 30 total"), Some(dec("2")));
    // A dollar sign beats everything else
    assert_eq!(extract_amount("paid 10 plus $3 tip"), Some(dec("3")));
    // A currency word beats the fallback
    assert_eq!(extract_amount("room 12 was nice, 80 euros"), Some(dec("80")));
}

#[test]
fn oversized_first_match_yields_no_amount() {
    // The dollar pattern matches first; a later number is not consulted
    assert_eq!(extract_amount("$100000000000000000000000000000 for 5"), None);
}

#[test]
fn thousands_separators_are_stripped() {
    assert_eq!(extract_amount("Rent $1,250.00"), Some(dec("1250.00")));
    assert_eq!(extract_amount("salary 3,000 dollars"), Some(dec("3000")));
}

#[test]
fn currency_word_does_not_change_amount() {
    assert_eq!(extract_amount("ramen 1200 yen"), Some(dec("1200")));
    assert_eq!(extract_amount("book 12 pounds"), Some(dec("12")));
    assert_eq!(extract_amount("gift 15 bucks"), Some(dec("15")));
}

#[test]
fn categories_scan_in_declared_order() {
    // "coffee" (food) and "uber" (transport) both match; food is earlier
    assert_eq!(infer_category("uber to get coffee"), Category::Food);
    assert_eq!(infer_category("monthly internet bill"), Category::Utilities);
    assert_eq!(infer_category("dentist visit"), Category::Healthcare);
    assert_eq!(infer_category("freelance gig"), Category::Income);
    assert_eq!(infer_category("new shoes"), Category::Shopping);
    assert_eq!(infer_category("misc"), Category::Other);
}

#[test]
fn complete_entry_becomes_transaction() {
    let e = parse_quick_entry("Dinner 32.10", today());
    let new = e.into_new_transaction().unwrap();
    assert_eq!(new.amount, dec("32.10"));
    assert_eq!(new.category, Category::Food);
    assert_eq!(new.date, today());
}
