// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::budget::Severity;
use crate::ledger::{MonthSummary, average_by_category, category_breakdown, filter_by_month};
use crate::registry::format_money;
use crate::session::LedgerSession;
use crate::utils::{maybe_print_json, parse_month, pretty_table};

pub fn handle(
    session: &LedgerSession<'_>,
    m: &clap::ArgMatches,
    trend_months: usize,
) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(session, sub)?,
        Some(("by-category", sub)) => by_category(session, sub)?,
        Some(("averages", sub)) => averages(session, sub)?,
        Some(("trend", sub)) => trend(session, sub, trend_months)?,
        Some(("insights", sub)) => insights(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn selected_month(session: &LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("month") {
        Some(m) => Ok(parse_month(m)?),
        None => Ok(session.today()),
    }
}

fn summary(session: &LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let month = selected_month(session, sub)?;
    let data = MonthSummary::for_month(&session.snapshot().transactions, month);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!(
            "{}",
            pretty_table(
                &["Month", "Transactions", "Total"],
                vec![vec![
                    data.month.format("%Y-%m").to_string(),
                    data.count.to_string(),
                    format_money(data.total, session.currency()),
                ]],
            )
        );
    }
    Ok(())
}

fn by_category(session: &LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let month = selected_month(session, sub)?;
    let data = category_breakdown(&filter_by_month(&session.snapshot().transactions, month));
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let currency = session.currency();
        let rows = data
            .iter()
            .map(|s| vec![s.label.to_string(), format_money(s.total, currency)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn averages(session: &LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let month = selected_month(session, sub)?;
    let data = average_by_category(&filter_by_month(&session.snapshot().transactions, month));
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let currency = session.currency();
        let rows = data
            .iter()
            .map(|a| {
                vec![
                    a.category.label().to_string(),
                    a.count.to_string(),
                    format_money(a.average, currency),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Count", "Average"], rows));
    }
    Ok(())
}

fn trend(session: &LedgerSession<'_>, sub: &clap::ArgMatches, default_months: usize) -> Result<()> {
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&default_months);
    let data = session.trend(months);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let currency = session.currency();
        let rows = data
            .iter()
            .map(|p| {
                vec![
                    p.month.format("%Y-%m").to_string(),
                    p.label.clone(),
                    format_money(p.total, currency),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "", "Total"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct InsightRow {
    severity: Severity,
    message: String,
}

fn insights(session: &LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let currency = session.currency();
    let data: Vec<InsightRow> = session
        .insights()
        .iter()
        .map(|i| InsightRow {
            severity: i.severity(),
            message: i.message(currency),
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                let tag = match r.severity {
                    Severity::Warning => "warning",
                    Severity::Info => "info",
                    Severity::Success => "success",
                };
                vec![tag.to_string(), r.message.clone()]
            })
            .collect();
        println!("{}", pretty_table(&["", "Insight"], rows));
    }
    Ok(())
}
