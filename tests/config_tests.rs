// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use financeflow::config::Settings;
use financeflow::registry::{Category, Currency};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn defaults_without_a_file() {
    let settings = Settings::default();
    assert_eq!(settings.user, "local");
    assert_eq!(settings.log_level, "info");
    assert_eq!(settings.trend_months, 6);
    assert_eq!(settings.default_currency, Currency::Usd);
    assert_eq!(settings.default_budgets.len(), 6);
    assert!(settings.database.is_none());
}

#[test]
fn file_values_override_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("financeflow.toml");
    std::fs::write(
        &path,
        r#"
user = "alice"
database = "/tmp/alice.sqlite"
trend_months = 12
default_currency = "EUR"

[default_budgets]
food = 300
transport = 80
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(path.as_path())).unwrap();
    assert_eq!(settings.user, "alice");
    assert_eq!(settings.database, Some(PathBuf::from("/tmp/alice.sqlite")));
    assert_eq!(settings.trend_months, 12);
    assert_eq!(settings.default_currency, Currency::Eur);
    assert_eq!(settings.log_level, "info");
    assert_eq!(settings.default_budgets.len(), 2);
    assert_eq!(
        settings.default_budgets.get(&Category::Food),
        Some(&Decimal::from(300))
    );
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(Settings::load(Some(dir.path().join("absent.toml").as_path())).is_err());
}
