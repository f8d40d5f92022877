// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use super::{report_failures, required};
use crate::budget::{BudgetState, jpy_rescale_plan};
use crate::models::validate_limit;
use crate::registry::{Category, format_money};
use crate::session::{LedgerSession, Mutation};
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};

pub fn handle(session: &mut LedgerSession<'_>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(session, sub)?,
        Some(("set", sub)) => set(session, sub)?,
        Some(("scale-jpy", _)) => scale_jpy(session)?,
        _ => {}
    }
    Ok(())
}

fn list(session: &mut LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = session.budget_statuses();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let currency = session.currency();
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|s| {
                let state = match s.state {
                    BudgetState::Ok => "ok",
                    BudgetState::Almost => "almost",
                    BudgetState::Over => "OVER",
                };
                vec![
                    s.category.label().to_string(),
                    format_money(s.limit, currency),
                    format_money(s.spent, currency),
                    format_money(s.remaining, currency),
                    format!("{}%", s.percent),
                    state.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Limit", "Spent", "Remaining", "Used", "State"],
                rows,
            )
        );
    }
    Ok(())
}

fn set(session: &mut LedgerSession<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let category: Category = required(sub, "category")?.parse()?;
    let limit = parse_decimal(required(sub, "limit")?)?;
    validate_limit(limit)?;

    let existing = session
        .snapshot()
        .budgets
        .iter()
        .find(|b| b.category == category)
        .map(|b| b.id.clone());
    match existing {
        Some(id) => {
            let outcome = session.execute(Mutation::UpdateBudget { id, limit })?;
            report_failures(outcome.store_failures);
        }
        None => {
            let user = session.user().clone();
            session
                .store()
                .create_budget(&user, category, limit)
                .with_context(|| format!("Create budget for {}", category))?;
            session.reload()?;
        }
    }
    println!(
        "Budget for {} set to {}",
        category.label(),
        format_money(limit, session.currency())
    );
    Ok(())
}

fn scale_jpy(session: &mut LedgerSession<'_>) -> Result<()> {
    let plan = jpy_rescale_plan(&session.snapshot().budgets, session.currency());
    if plan.is_empty() {
        println!("No budgets to rescale");
        return Ok(());
    }
    let mut failures = 0;
    for (id, limit) in &plan {
        let outcome = session.execute(Mutation::UpdateBudget {
            id: id.clone(),
            limit: *limit,
        })?;
        failures += outcome.store_failures;
    }
    report_failures(failures);
    println!("Rescaled {} budget(s) for Japanese Yen", plan.len());
    Ok(())
}
