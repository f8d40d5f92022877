// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use serde::Serialize;

use super::{report_failures, required};
use crate::ledger::filter_by_month;
use crate::models::{NewTransaction, TransactionPatch};
use crate::parser::parse_quick_entry;
use crate::registry::{Category, format_money};
use crate::session::{LedgerSession, Mutation};
use crate::utils::{maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table};

pub fn handle(session: &mut LedgerSession<'_>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("quick", sub)) => quick(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(session: &mut LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(required(sub, "amount")?)?;
    let description = required(sub, "description")?;
    let category: Category = required(sub, "category")?.parse()?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => session.today(),
    };
    let new = NewTransaction::new(amount, description.as_str(), category, date);
    let outcome = session.execute(Mutation::AddTransaction(new))?;
    println!(
        "Recorded {} '{}' ({}) on {} [{}]",
        format_money(amount, session.currency()),
        description.trim(),
        category,
        date,
        outcome.created_id.unwrap_or_default()
    );
    Ok(())
}

fn quick(session: &mut LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let text = sub
        .get_many::<String>("text")
        .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    let entry = parse_quick_entry(&text, session.today());

    let amount = entry
        .amount
        .map(|a| format_money(a, session.currency()))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{}",
        pretty_table(
            &["Amount", "Category", "Date", "Description"],
            vec![vec![
                amount,
                entry.category.label().to_string(),
                entry.date.to_string(),
                entry.description.clone(),
            ]],
        )
    );

    if sub.get_flag("dry_run") {
        return Ok(());
    }
    if !entry.is_complete() {
        bail!("Could not find an amount in '{}'", text);
    }
    let outcome = session.execute(Mutation::AddTransaction(entry.into_new_transaction()?))?;
    println!("Saved [{}]", outcome.created_id.unwrap_or_default());
    Ok(())
}

fn list(session: &mut LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(session, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Category", "Amount", "Id"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub category: String,
    pub amount: String,
}

/// Transactions matching the `list` filters, newest first.
pub fn query_rows(
    session: &LedgerSession<'_>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let mut data = match sub.get_one::<String>("month") {
        Some(month) => filter_by_month(&session.snapshot().transactions, parse_month(month)?),
        None => session.snapshot().transactions.clone(),
    };
    if let Some(cat) = sub.get_one::<String>("category") {
        let category: Category = cat.parse()?;
        data.retain(|t| t.category == category);
    }
    data.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }

    let currency = session.currency();
    Ok(data
        .into_iter()
        .map(|t| TransactionRow {
            date: t.date.to_string(),
            category: t.category.to_string(),
            amount: format_money(t.amount, currency),
            description: t.description,
            id: t.id,
        })
        .collect())
}

fn edit(session: &mut LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?.trim().to_string();
    let patch = TransactionPatch {
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        description: sub.get_one::<String>("description").cloned(),
        category: sub
            .get_one::<String>("category")
            .map(|s| s.parse::<Category>())
            .transpose()?,
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
    };
    if patch.is_empty() {
        bail!("Nothing to change; pass --amount, --description, --category or --date");
    }
    let outcome = session.execute(Mutation::UpdateTransaction {
        id: id.clone(),
        patch,
    })?;
    report_failures(outcome.store_failures);
    println!("Updated {}", id);
    Ok(())
}

fn remove(session: &mut LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?.trim().to_string();
    if !session.snapshot().transactions.iter().any(|t| t.id == id) {
        bail!("Transaction '{}' not found", id);
    }
    let outcome = session.execute(Mutation::DeleteTransaction(id.clone()))?;
    report_failures(outcome.store_failures);
    println!("Deleted {}", id);
    Ok(())
}
