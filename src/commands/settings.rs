// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use super::{report_failures, required};
use crate::budget::jpy_rescale_plan;
use crate::registry::{Currency, format_money};
use crate::session::{LedgerSession, Mutation};
use crate::utils::pretty_table;

pub fn handle_currency(session: &mut LedgerSession<'_>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let c = session.currency();
            println!("{} ({}) e.g. {}", c.label(), c.code(), sample(c));
        }
        Some(("list", _)) => {
            let rows = Currency::ALL
                .iter()
                .map(|c| vec![c.code().to_string(), c.label().to_string(), sample(*c)])
                .collect();
            println!("{}", pretty_table(&["Code", "Currency", "Example"], rows));
        }
        Some(("set", sub)) => {
            let currency: Currency = required(sub, "code")?.parse()?;
            let outcome = session.execute(Mutation::SetCurrency(currency))?;
            report_failures(outcome.store_failures);
            println!("Currency set to {}", currency.label());
            if !jpy_rescale_plan(&session.snapshot().budgets, currency).is_empty() {
                println!("Budgets still use dollar-sized limits; run `budget scale-jpy` to rescale them");
            }
        }
        _ => {}
    }
    Ok(())
}

fn sample(currency: Currency) -> String {
    format_money(rust_decimal::Decimal::new(123_450, 2), currency)
}

pub fn handle_clear(session: &mut LedgerSession<'_>, m: &clap::ArgMatches) -> Result<()> {
    if !m.get_flag("yes") {
        bail!("This deletes every transaction and recurring template; pass --yes to confirm");
    }
    let transactions = session.snapshot().transactions.len();
    let recurring = session.snapshot().recurring.len();
    let outcome = session.execute(Mutation::ClearAll)?;
    report_failures(outcome.store_failures);
    println!(
        "Cleared {} transaction(s) and {} recurring template(s); currency reset to {}",
        transactions,
        recurring,
        session.currency().code()
    );
    Ok(())
}
