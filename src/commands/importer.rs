// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs::File;

use anyhow::{Context, Result};

use super::required;
use crate::interchange::read_transactions_csv;
use crate::session::{ImportReport, LedgerSession};

pub fn handle(session: &mut LedgerSession<'_>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("csv", sub)) => import_csv(session, sub).map(|_| ()),
        _ => Ok(()),
    }
}

/// Import a transaction CSV. Unparseable rows are skipped; the returned
/// report counts them together with rows the store rejected.
pub fn import_csv(session: &mut LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<ImportReport> {
    let path = required(sub, "path")?.trim();
    let file = File::open(path).with_context(|| format!("Open CSV {}", path))?;
    let batch = read_transactions_csv(file);
    let mut report = session.import(batch.transactions);
    report.failed += batch.skipped;
    println!(
        "Imported {} transaction(s) from {} ({} skipped)",
        report.imported, path, report.failed
    );
    Ok(report)
}
