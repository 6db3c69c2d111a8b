//! Expense tracker CLI entry point.
//!
//! # Responsibility
//! - Parse arguments, bootstrap logging and the store, dispatch commands.
//! - Decide process exit status per the configured failure policy.
//!
//! # Invariants
//! - Domain failures are reported on stdout as `Error: <message>`.
//! - Without `--strict-exit` the process exits 0 even on failure, so existing
//!   scripts keep working.

mod cli;
mod commands;
mod error;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use clap::Parser;
use log::{error, info};
use spendlog_core::db::open_db;
use spendlog_core::{default_log_level, init_logging, ExpenseService, SqliteExpenseRepository};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            // A broken log setup must not block the actual command.
            eprintln!("warning: {err}");
        }
    }

    let Cli {
        db,
        strict_exit,
        command,
        ..
    } = cli;

    match run(&db, command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=command_failed module=cli error={err}");
            println!("Error: {err}");
            if strict_exit {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

fn run(db: &Path, command: Command) -> Result<(), CliError> {
    info!(
        "event=command_start module=cli command={} db={}",
        command.name(),
        db.display()
    );

    let conn = open_db(db)?;
    let repo = SqliteExpenseRepository::new(&conn);
    let service = ExpenseService::new(repo);

    commands::run_command(&service, command)
}
