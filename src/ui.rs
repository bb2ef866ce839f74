//! Terminal UI and captured command execution.
//!
//! While the platform CLI runs the user only sees a spinner and a short
//! label; its stdout and stderr are captured.  If the command fails, the
//! captured streams are replayed verbatim so the tool's own diagnostics reach
//! the terminal or CI log unmodified.
//!
//! Process spawning sits behind the [`Shell`] trait so the backup pipeline can
//! be driven by a fake in tests.

use std::{
    fmt::Write as _,
    process::{Command, Stdio},
    time::Duration,
};

use console::style;
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};

use crate::{commands::run::BackupReport, config::RestoreConfig, error::BackupError};

// ─── Icons ───────────────────────────────────────────────────────────────────

static SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

fn icon_ok() -> console::StyledObject<&'static str> {
    style("✓").green().bold()
}
fn icon_err() -> console::StyledObject<&'static str> {
    style("✗").red().bold()
}

// ─── Command execution ────────────────────────────────────────────────────────

/// Exit status and captured output of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Runs an argument vector (`[program, args…]`) to completion.
pub trait Shell {
    fn run(&self, args: &[String]) -> Result<CommandOutput, BackupError>;
}

/// [`Shell`] backed by real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShell;

impl Shell for SystemShell {
    fn run(&self, args: &[String]) -> Result<CommandOutput, BackupError> {
        let (prog, rest) = args.split_first().ok_or(BackupError::EmptyCommand)?;
        log::debug!("spawning: {}", args.join(" "));

        let output = Command::new(prog)
            .args(rest)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| BackupError::Spawn {
                program: prog.clone(),
                source,
            })?;

        log::debug!("`{prog}` exited with {:?}", output.status.code());
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

// ─── Spinner ──────────────────────────────────────────────────────────────────

fn make_spinner(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let spinner_style = ProgressStyle::with_template("  {spinner:.cyan}  {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_CHARS);
    pb.set_style(spinner_style);
    pb.set_message(format!("{}", style(label).dim()));
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Run `args` through `shell` behind a spinner labelled `label`.
///
/// Blocks until the command exits.  The spinner is cleared before returning.
pub fn run_stage(
    shell: &dyn Shell,
    label: &str,
    args: &[String],
) -> Result<CommandOutput, BackupError> {
    let spinner = make_spinner(label);
    let result = shell.run(args);
    spinner.finish_and_clear();
    result
}

// ─── Stage lines ──────────────────────────────────────────────────────────────

/// Result line for one pipeline stage.
#[derive(Debug)]
pub struct StageOutcome {
    pub label: String,
    pub success: bool,
    /// Short note shown after the label, e.g. the linked project name.
    pub detail: Option<String>,
    /// Captured command output, replayed on failure.
    pub output: Option<CommandOutput>,
}

impl StageOutcome {
    pub fn ok(label: &str, detail: Option<String>) -> Self {
        Self {
            label: label.into(),
            success: true,
            detail,
            output: None,
        }
    }

    pub fn failed(label: &str, output: Option<CommandOutput>) -> Self {
        Self {
            label: label.into(),
            success: false,
            detail: None,
            output,
        }
    }

    pub fn print(&self) {
        let detail = self
            .detail
            .as_deref()
            .map(|d| format!("  {}", style(d).dim()))
            .unwrap_or_default();

        if self.success {
            println!("  {}  {}{detail}", icon_ok(), style(&self.label).bold());
            return;
        }

        println!("  {}  {}{detail}", icon_err(), style(&self.label).bold());
        if let Some(out) = &self.output {
            replay(out);
        }
    }
}

/// Write captured output of a failed command to stderr, byte-for-byte.
fn replay(out: &CommandOutput) {
    if !out.stdout.is_empty() {
        eprintln!();
        eprintln!("  {} stdout:", style("►").dim());
        eprint!("{}", with_trailing_newline(&out.stdout));
    }
    if !out.stderr.is_empty() {
        eprintln!();
        eprintln!("  {} stderr:", style("►").dim());
        eprint!("{}", with_trailing_newline(&out.stderr));
    }
}

fn with_trailing_newline(s: &str) -> String {
    if s.ends_with('\n') {
        s.to_string()
    } else {
        format!("{s}\n")
    }
}

// ─── Final report ─────────────────────────────────────────────────────────────

/// Success message: output path, size and restore instructions.
pub fn render_report(report: &BackupReport, restore: &RestoreConfig) -> String {
    let path = report.descriptor.full_path.display();
    let mut s = String::new();
    let _ = writeln!(s);
    let _ = writeln!(
        s,
        "  {}  {} {path}",
        icon_ok(),
        style("Backup saved to").cyan().bold()
    );
    let _ = writeln!(s, "     Size: {}", HumanBytes(report.size_bytes));
    let _ = writeln!(s);
    let _ = writeln!(s, "  To restore this backup, run:");
    let _ = writeln!(s, "    {} {path}", restore.script);
    s
}

pub fn print_report(report: &BackupReport, restore: &RestoreConfig) {
    println!("{}", render_report(report, restore));
}

/// Failure message with remediation guidance where there is any.
pub fn render_error(err: &BackupError) -> String {
    let mut s = String::new();
    let _ = writeln!(s);
    let _ = writeln!(
        s,
        "  {}  {} {err}",
        icon_err(),
        style("Backup failed:").red().bold()
    );
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let _ = writeln!(s, "     caused by: {cause}");
        source = cause.source();
    }
    if let Some(hint) = err.remediation() {
        let _ = writeln!(s);
        for line in hint.lines() {
            let _ = writeln!(s, "  {line}");
        }
    }
    s
}

pub fn print_error(err: &BackupError) {
    eprintln!("{}", render_error(err));
}

// ─── Tests ────────────────────────────────────────────────────────────────────
