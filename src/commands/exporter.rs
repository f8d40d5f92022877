// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::Utc;

use super::required;
use crate::interchange::{Backup, write_transactions_csv};
use crate::session::LedgerSession;

pub fn handle(session: &LedgerSession<'_>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("csv", sub)) => export_csv(session, sub),
        Some(("backup", sub)) => export_backup(session, sub),
        _ => Ok(()),
    }
}

fn export_csv(session: &LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let out = required(sub, "out")?.trim();
    let transactions = &session.snapshot().transactions;
    let file = File::create(out).with_context(|| format!("Create {}", out))?;
    write_transactions_csv(transactions, file)?;
    println!("Exported {} transaction(s) to {}", transactions.len(), out);
    Ok(())
}

fn export_backup(session: &LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let out = required(sub, "out")?.trim();
    let snapshot = session.snapshot();
    let backup = Backup {
        exported: Utc::now(),
        expenses: &snapshot.transactions,
        budgets: &snapshot.budgets,
        recurring: &snapshot.recurring,
        currency: snapshot.currency,
    };
    let mut file = File::create(out).with_context(|| format!("Create {}", out))?;
    file.write_all(backup.to_json()?.as_bytes())?;
    println!("Backup written to {}", out);
    Ok(())
}
