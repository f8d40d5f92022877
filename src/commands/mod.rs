// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod exporter;
pub mod importer;
pub mod recurring;
pub mod reports;
pub mod settings;
pub mod transactions;

use anyhow::{Context, Result};

/// Value of a `required(true)` argument.
pub(crate) fn required<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    m.get_one::<String>(name)
        .with_context(|| format!("missing argument '{}'", name))
}

/// Tell the user when the store rejected changes the session already shows.
pub(crate) fn report_failures(failures: usize) {
    if failures > 0 {
        eprintln!(
            "Warning: {} change(s) could not be saved and will be lost on the next run",
            failures
        );
    }
}
