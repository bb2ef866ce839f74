//! Integration tests for the `db-backup` binary.
//!
//! These spawn the compiled binary and assert on exit codes, stdout, stderr
//! and the files left behind.  The real platform CLI is never needed: each
//! test writes a small `sh` stand-in for it into a temp directory and points
//! `[tool].program` at it.
//!
//! ```sh
//! cargo test --test integration
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

const BIN: &str = env!("CARGO_BIN_EXE_db-backup");

const LINKED_JSON: &str = r#"[{"id":"wxyz","name":"prod","linked":true}]"#;
const UNLINKED_JSON: &str = r#"[{"id":"abcd","name":"staging","linked":false}]"#;

// ─── Fixture ──────────────────────────────────────────────────────────────────

/// A working directory with a fake platform CLI and a `db-backup.toml`.
struct Fixture {
    root: tempfile::TempDir,
}

impl Fixture {
    /// `list_stdout` is what `projects list` prints; `dump_exit` is the exit
    /// code of `db dump`, which always writes a small SQL file first.
    #[cfg(unix)]
    fn new(list_stdout: &str, dump_exit: i32) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir().unwrap();
        let tool = root.path().join("fake-platform");
        let script = format!(
            r#"#!/bin/sh
echo "$@" >> "{log}"
case "$1" in
  projects)
    cat <<'JSON'
{list_stdout}
JSON
    ;;
  db)
    for last; do :; done
    printf 'INSERT INTO public.notes VALUES (1);\n' > "$last"
    [ {dump_exit} -eq 0 ] || echo "pg_dump: error: connection refused" >&2
    exit {dump_exit}
    ;;
esac
"#,
            log = root.path().join("calls.log").display(),
        );
        fs::write(&tool, script).unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

        fs::write(
            root.path().join("db-backup.toml"),
            format!(
                "[tool]\nprogram = \"{}\"\n\n[restore]\nscript = \"./scripts/restore-database.sh\"\n",
                tool.display()
            ),
        )
        .unwrap();

        Self { root }
    }

    fn dir(&self) -> &Path {
        self.root.path()
    }

    fn backups(&self) -> PathBuf {
        self.dir().join("backups")
    }

    fn backup_files(&self) -> Vec<PathBuf> {
        fs::read_dir(self.backups())
            .map(|rd| rd.map(|e| e.unwrap().path()).collect())
            .unwrap_or_default()
    }

    fn calls(&self) -> String {
        fs::read_to_string(self.dir().join("calls.log")).unwrap_or_default()
    }

    fn run(&self, args: &[&str]) -> (Option<i32>, String, String) {
        run_in(args, self.dir())
    }
}

fn run_in(args: &[&str], dir: &Path) -> (Option<i32>, String, String) {
    let out = Command::new(BIN)
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|e| panic!("failed to spawn {BIN}: {e}"));

    (
        out.status.code(),
        String::from_utf8_lossy(&out.stdout).into_owned(),
        String::from_utf8_lossy(&out.stderr).into_owned(),
    )
}

// ─── Scenarios ────────────────────────────────────────────────────────────────

#[cfg(unix)]
#[test]
fn unlinked_project_exits_one_with_remediation() {
    let fx = Fixture::new(UNLINKED_JSON, 0);

    let (code, _stdout, stderr) = fx.run(&[]);

    assert_eq!(code, Some(1));
    assert!(stderr.contains("link --project-ref"), "stderr:\n{stderr}");
    assert!(!fx.backups().exists(), "no directory may be created");
    assert!(!fx.calls().contains("db dump"));
}

#[cfg(unix)]
#[test]
fn successful_dump_prints_path_and_restore_instructions() {
    let fx = Fixture::new(LINKED_JSON, 0);

    let (code, stdout, stderr) = fx.run(&[]);

    assert_eq!(code, Some(0), "stderr:\n{stderr}");
    let files = fx.backup_files();
    assert_eq!(files.len(), 1);

    let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("backup_") && name.ends_with(".sql"), "{name}");
    assert!(stdout.contains(&name), "stdout:\n{stdout}");
    assert!(stdout.contains("./scripts/restore-database.sh"));
    assert!(stdout.contains(" B"), "size should be printed:\n{stdout}");

    let calls = fx.calls();
    assert!(calls.contains("projects list --output json"));
    assert!(calls.contains("db dump --linked --data-only --schema public -f"));
}

#[cfg(unix)]
#[test]
fn failing_dump_exits_one_without_restore_instructions() {
    let fx = Fixture::new(LINKED_JSON, 1);

    let (code, stdout, stderr) = fx.run(&[]);

    assert_eq!(code, Some(1));
    assert!(!stdout.contains("restore-database.sh"), "stdout:\n{stdout}");
    assert!(
        stderr.contains("connection refused"),
        "tool diagnostics should be passed through:\n{stderr}"
    );
    assert_eq!(fx.backup_files().len(), 1, "partial file is left in place");
}

#[cfg(unix)]
#[test]
fn existing_backups_directory_is_reused() {
    let fx = Fixture::new(LINKED_JSON, 0);
    fs::create_dir_all(fx.backups()).unwrap();
    fs::write(fx.backups().join("keep.txt"), "x").unwrap();

    let (code, _, stderr) = fx.run(&[]);

    assert_eq!(code, Some(0), "stderr:\n{stderr}");
    assert!(fx.backups().join("keep.txt").exists());
}

#[cfg(unix)]
#[test]
fn table_output_with_marker_counts_as_linked() {
    let fx = Fixture::new("  LINKED | REFERENCE ID | NAME\n    ●    | wxyz | prod", 0);

    let (code, _, stderr) = fx.run(&[]);
    assert_eq!(code, Some(0), "stderr:\n{stderr}");
}

#[test]
fn missing_platform_cli_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("db-backup.toml"),
        "[tool]\nprogram = \"definitely-not-a-real-platform-cli-9a7e\"\n",
    )
    .unwrap();

    let (code, _, stderr) = run_in(&[], dir.path());
    assert_eq!(code, Some(1));
    assert!(stderr.contains("failed to spawn"), "stderr:\n{stderr}");
    assert!(!dir.path().join("backups").exists());
}

// ─── --help / --version ───────────────────────────────────────────────────────

#[test]
fn help_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_in(&["--help"], dir.path());
    assert_eq!(code, Some(0));
    assert!(stdout.contains("db-backup"));
}

#[test]
fn version_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_in(&["--version"], dir.path());
    assert_eq!(code, Some(0));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_flag_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_in(&["--this-flag-does-not-exist"], dir.path());
    assert_ne!(code, Some(0));
}

// ─── init / --print-config ────────────────────────────────────────────────────

#[test]
fn init_creates_config_and_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();

    let (code, _, _) = run_in(&["init"], dir.path());
    assert_eq!(code, Some(0));
    let content = fs::read_to_string(dir.path().join("db-backup.toml")).unwrap();
    assert!(content.contains("[tool]"));
    assert!(content.contains("[backup]"));

    let (code, stdout, stderr) = run_in(&["init"], dir.path());
    assert_eq!(code, Some(1));
    assert!(format!("{stdout}{stderr}").contains("already exists"));
}

#[test]
fn print_config_without_file_shows_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_in(&["--print-config"], dir.path());

    assert_eq!(code, Some(0));
    assert!(stdout.contains("supabase"), "stdout:\n{stdout}");
    assert!(stdout.contains("./backups"));
    assert!(stderr.contains("not found"));
}

#[test]
fn print_config_reads_custom_path() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("other.toml");
    fs::write(&cfg, "[backup]\ndir = \"/srv/dumps-xyz\"\n").unwrap();

    let (code, stdout, _) = run_in(
        &["--config", cfg.to_str().unwrap(), "--print-config"],
        dir.path(),
    );
    assert_eq!(code, Some(0));
    assert!(stdout.contains("/srv/dumps-xyz"));
}

#[test]
fn invalid_config_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("db-backup.toml"), "not valid toml ][[[").unwrap();

    let (code, _, _) = run_in(&["--print-config"], dir.path());
    assert_eq!(code, Some(1));
}
