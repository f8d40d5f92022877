// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Application settings.
//!
//! Sources, later ones winning: built-in defaults, `financeflow.toml` in the
//! platform config directory (or the file passed with `--config`), then
//! `FINANCEFLOW_*` environment variables, e.g. `FINANCEFLOW_USER=alice`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use directories::ProjectDirs;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::budget::{TREND_MONTHS, default_budget_seeds};
use crate::db::APP;
use crate::error::Result;
use crate::registry::{Category, Currency};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// SQLite file. Defaults to the platform data directory.
    pub database: Option<PathBuf>,
    /// Ledger owner used when `--user` is not given.
    pub user: String,
    pub log_level: String,
    pub trend_months: usize,
    /// Currency `init` applies to a ledger that has no transactions yet.
    pub default_currency: Currency,
    /// Limits created for a user's first session.
    pub default_budgets: BTreeMap<Category, Decimal>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database: None,
            user: "local".to_string(),
            log_level: "info".to_string(),
            trend_months: TREND_MONTHS,
            default_currency: Currency::default(),
            default_budgets: default_budget_seeds(),
        }
    }
}

impl Settings {
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        match explicit {
            Some(path) => builder = builder.add_source(File::from(path).required(true)),
            None => {
                if let Some(path) = default_config_path() {
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }
        let settings = builder
            .add_source(Environment::with_prefix("FINANCEFLOW"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP.0, APP.1, APP.2).map(|p| p.config_dir().join("financeflow.toml"))
}
