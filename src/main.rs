// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use financeflow::config::Settings;
use financeflow::models::UserId;
use financeflow::session::{LedgerSession, Mutation};
use financeflow::store::{SqliteStore, seed_budgets};
use financeflow::{cli, commands, db};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();

    let settings = Settings::load(matches.get_one::<String>("config").map(Path::new))?;

    // RUST_LOG wins over --verbose, which wins over the configured level
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if matches.get_flag("verbose") {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(&settings.log_level)
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let path = match (matches.get_one::<String>("db"), &settings.database) {
        (Some(p), _) => PathBuf::from(p),
        (None, Some(p)) => p.clone(),
        (None, None) => db::db_path()?,
    };
    let store = SqliteStore::new(db::open_or_init(&path)?)?;
    let user = UserId::new(
        matches
            .get_one::<String>("user")
            .cloned()
            .unwrap_or_else(|| settings.user.clone()),
    );
    seed_budgets(&store, &user, &settings.default_budgets)?;
    let mut session = LedgerSession::open(&store, user)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            if session.snapshot().transactions.is_empty()
                && session.currency() != settings.default_currency
            {
                session.execute(Mutation::SetCurrency(settings.default_currency))?;
            }
            println!(
                "Database initialized at {} for user '{}'",
                path.display(),
                session.user()
            );
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut session, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut session, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(&mut session, sub)?,
        Some(("report", sub)) => commands::reports::handle(&session, sub, settings.trend_months)?,
        Some(("import", sub)) => commands::importer::handle(&mut session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&session, sub)?,
        Some(("currency", sub)) => commands::settings::handle_currency(&mut session, sub)?,
        Some(("clear", sub)) => commands::settings::handle_clear(&mut session, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
