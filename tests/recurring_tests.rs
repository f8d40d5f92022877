// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use financeflow::models::{Frequency, RecurringKind, RecurringTemplate};
use financeflow::recurring::total_monthly_impact;
use financeflow::registry::Category;
use rust_decimal::Decimal;

fn template(amount: i64, frequency: Frequency, kind: RecurringKind) -> RecurringTemplate {
    RecurringTemplate {
        id: format!("{}-{}", frequency, amount),
        amount: Decimal::from(amount),
        description: "t".into(),
        category: Category::Utilities,
        frequency,
        next_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        kind,
    }
}

#[test]
fn multipliers_per_frequency() {
    assert_eq!(Frequency::Daily.monthly_multiplier(), Decimal::from(30));
    assert_eq!(Frequency::Weekly.monthly_multiplier(), Decimal::new(43, 1));
    assert_eq!(Frequency::Monthly.monthly_multiplier(), Decimal::ONE);
    assert_eq!(
        template(120, Frequency::Yearly, RecurringKind::Expense).monthly_impact(),
        Decimal::from(10)
    );
}

#[test]
fn total_adds_every_template() {
    let templates = vec![
        template(2, Frequency::Daily, RecurringKind::Expense),
        template(10, Frequency::Weekly, RecurringKind::Expense),
        template(1000, Frequency::Monthly, RecurringKind::Income),
    ];
    // 60 + 43 + 1000
    assert_eq!(total_monthly_impact(&templates), Decimal::from(1103));
    assert_eq!(total_monthly_impact(&[]), Decimal::ZERO);
}

#[test]
fn frequency_and_kind_parse() {
    assert_eq!("Weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
    assert!("fortnightly".parse::<Frequency>().is_err());
    assert_eq!("income".parse::<RecurringKind>().unwrap(), RecurringKind::Income);
}

#[test]
fn template_serializes_kind_as_type() {
    let value = serde_json::to_value(template(5, Frequency::Monthly, RecurringKind::Income)).unwrap();
    assert_eq!(value["type"], "income");
    assert_eq!(value["frequency"], "monthly");
    assert_eq!(value["nextDate"], "2025-04-01");
}
