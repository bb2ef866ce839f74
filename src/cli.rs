//! Command-line interface definition.
//!
//! All argument parsing lives here so the rest of the codebase can stay
//! agnostic to `clap`.  A bare `db-backup` with no arguments takes a backup.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(
    name    = "db-backup",
    about   = "Data-only dump of the linked database project into ./backups",
    version,
    help_template = "\
{before-help}{name} {version}
{about}

{usage-heading} {usage}

{all-args}{after-help}"
)]
pub struct Cli {
    /// Path to the configuration file.
    ///
    /// Optional; built-in defaults are used when it does not exist.
    #[arg(short, long, default_value = "db-backup.toml")]
    pub config: PathBuf,

    /// Subcommand to run.  Omit to take a backup.
    #[command(subcommand)]
    pub command: Option<Subcommand>,

    /// Print the resolved configuration as TOML and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Log every spawned command and detection decision to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
pub enum Subcommand {
    /// Write a commented starter config to the `--config` path.
    ///
    /// Exits with an error if the file already exists.
    Init,
}
