//! `db-backup` — data-only dumps of a linked database project.
//!
//! # Overview
//!
//! A thin wrapper around a database-platform CLI (`supabase` by default).
//! It checks that the working directory is linked to a remote project, dumps
//! the row data of the `public` schema into `./backups/backup_<timestamp>.sql`
//! and tells the operator how to restore it.
//!
//! # Usage
//!
//! ```text
//! db-backup                 # take one backup
//! db-backup init            # scaffold db-backup.toml
//! db-backup --print-config  # show resolved config without running anything
//! db-backup -v              # debug logging of every spawned command
//! ```
//!
//! Exit code is 0 on success and 1 on any failure.
//!
//! # Module layout
//!
//! | Module             | Responsibility                               |
//! |--------------------|----------------------------------------------|
//! | [`cli`]            | Argument types parsed by clap                |
//! | [`config`]         | Layered TOML config                          |
//! | [`descriptor`]     | Timestamped output file naming               |
//! | [`error`]          | `BackupError` and exit codes                 |
//! | [`link`]           | Linked-project detection                     |
//! | [`runner`]         | Argument construction for the platform CLI   |
//! | [`ui`]             | Spinner, captured execution, final report    |
//! | [`commands::init`] | `db-backup init`                             |
//! | [`commands::run`]  | The backup pipeline                          |

mod cli;
mod commands;
mod config;
mod descriptor;
mod error;
mod link;
mod runner;
mod ui;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Subcommand};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match dispatch(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(backup_err) = err.downcast_ref::<error::BackupError>() {
                ui::print_error(backup_err);
                ExitCode::from(backup_err.exit_code())
            } else {
                eprintln!("Error: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn dispatch(cli: &Cli) -> Result<()> {
    match &cli.command {
        // ── db-backup init ────────────────────────────────────────────────────
        Some(Subcommand::Init) => commands::init::run(&cli.config),

        // ── db-backup ─────────────────────────────────────────────────────────
        None => {
            let global = config::global_config_path();
            let cfg = config::load_merged(global.as_deref(), &cli.config)?;

            if cli.print_config {
                print!(
                    "{}",
                    toml::to_string_pretty(&cfg).context("serialising config")?
                );
                return Ok(());
            }

            let report = commands::run::run(&cfg, &ui::SystemShell, &chrono::Local::now())?;
            ui::print_report(&report, &cfg.restore);
            Ok(())
        },
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
