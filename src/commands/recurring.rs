// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use serde::Serialize;

use super::{report_failures, required};
use crate::models::NewRecurring;
use crate::recurring::total_monthly_impact;
use crate::registry::format_money;
use crate::session::{LedgerSession, Mutation};
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(session: &mut LedgerSession<'_>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(session: &mut LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let new = NewRecurring {
        amount: parse_decimal(required(sub, "amount")?)?,
        description: required(sub, "description")?.clone(),
        category: required(sub, "category")?.parse()?,
        frequency: required(sub, "frequency")?.parse()?,
        next_date: parse_date(required(sub, "next_date")?)?,
        kind: required(sub, "type")?.parse()?,
    };
    let summary = format!(
        "{} {} every {} from {}",
        new.kind,
        format_money(new.amount, session.currency()),
        new.frequency,
        new.next_date
    );
    let outcome = session.execute(Mutation::AddRecurring(new))?;
    println!("Added {} [{}]", summary, outcome.created_id.unwrap_or_default());
    Ok(())
}

#[derive(Serialize)]
struct RecurringRow {
    id: String,
    description: String,
    category: String,
    frequency: String,
    kind: String,
    next_date: String,
    amount: String,
    monthly: String,
}

fn list(session: &mut LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let currency = session.currency();
    let templates = &session.snapshot().recurring;
    let data: Vec<RecurringRow> = templates
        .iter()
        .map(|r| RecurringRow {
            id: r.id.clone(),
            description: r.description.clone(),
            category: r.category.to_string(),
            frequency: r.frequency.to_string(),
            kind: r.kind.to_string(),
            next_date: r.next_date.to_string(),
            amount: format_money(r.amount, currency),
            monthly: format_money(r.monthly_impact(), currency),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.description.clone(),
                    r.category.clone(),
                    r.kind.clone(),
                    r.frequency.clone(),
                    r.next_date.clone(),
                    r.amount.clone(),
                    r.monthly.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Description",
                    "Category",
                    "Type",
                    "Every",
                    "Next",
                    "Amount",
                    "Per month",
                    "Id",
                ],
                rows,
            )
        );
        println!(
            "Monthly impact: {}",
            format_money(total_monthly_impact(templates), currency)
        );
    }
    Ok(())
}

fn remove(session: &mut LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?.trim().to_string();
    if !session.snapshot().recurring.iter().any(|r| r.id == id) {
        bail!("Recurring template '{}' not found", id);
    }
    let outcome = session.execute(Mutation::DeleteRecurring(id.clone()))?;
    report_failures(outcome.store_failures);
    println!("Deleted {}", id);
    Ok(())
}
