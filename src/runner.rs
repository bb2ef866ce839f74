//! Command argument construction helpers.
//!
//! This module only *builds* the argument lists handed to the platform CLI.
//! Execution lives in [`crate::ui`] so the spinner can own the terminal while
//! a command runs, and every function here stays pure and testable without
//! the CLI installed.

use std::path::Path;

use crate::config::Config;

// ─── Base command ─────────────────────────────────────────────────────────────

/// The program every platform invocation starts with.
///
/// Callers append the subcommand and flags before passing the `Vec` to
/// [`crate::ui::run_stage`].
pub fn tool_base(cfg: &Config) -> Vec<String> {
    vec![cfg.tool.program.clone()]
}

// ─── Subcommands ──────────────────────────────────────────────────────────────

/// `<tool> projects list --output json`
pub fn build_projects_list_args(cfg: &Config) -> Vec<String> {
    let mut cmd = tool_base(cfg);
    cmd.extend([
        "projects".into(),
        "list".into(),
        "--output".into(),
        "json".into(),
    ]);
    cmd
}

/// `<tool> db dump --linked [--data-only] --schema <a,b> -f <file>`
pub fn build_dump_args(cfg: &Config, file: &Path) -> Vec<String> {
    let mut cmd = tool_base(cfg);
    cmd.extend(["db".into(), "dump".into(), "--linked".into()]);
    if cfg.backup.data_only {
        cmd.push("--data-only".into());
    }
    cmd.extend([
        "--schema".into(),
        cfg.backup.schemas.join(","),
        "-f".into(),
        file.to_string_lossy().into_owned(),
    ]);
    cmd
}

// ─── Tests ────────────────────────────────────────────────────────────────────
