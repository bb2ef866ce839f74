//! Default pipeline: take one data-only dump of the linked project.
//!
//! | # | Stage          | Fails with              |
//! |---|----------------|-------------------------|
//! | 1 | Linked project | `NoLinkedProject`       |
//! | 2 | Destination    | `CreateDir`, `DestinationExists` |
//! | 3 | Dump           | `DumpFailed`, `Spawn`   |
//! | 4 | Report         | `Metadata`              |
//!
//! Any failure ends the run.  Nothing is retried and a partial dump file left
//! by a failed command stays where it is.

use std::{fs, io, path::Path};

use chrono::{DateTime, TimeZone};

use crate::{
    config::Config,
    descriptor::BackupDescriptor,
    error::BackupError,
    link::{LinkStatus, parse_link_status},
    runner::{build_dump_args, build_projects_list_args},
    ui::{Shell, StageOutcome, run_stage},
};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReport {
    pub descriptor: BackupDescriptor,
    pub size_bytes: u64,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

/// Run one backup attempt end to end.
///
/// `now` fixes the timestamp in the output file name.
pub fn run<Tz>(
    cfg: &Config,
    shell: &dyn Shell,
    now: &DateTime<Tz>,
) -> Result<BackupReport, BackupError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    println!();

    // 1. Linked project
    match check_link(cfg, shell)? {
        LinkStatus::Linked(project) => {
            let detail = project.name.or(project.id);
            StageOutcome::ok("Linked project", detail).print();
        },
        LinkStatus::NotLinked => {
            StageOutcome::failed("Linked project", None).print();
            return Err(BackupError::NoLinkedProject {
                tool: cfg.tool.program.clone(),
            });
        },
    }

    // 2. Destination
    let descriptor = prepare_destination(&cfg.backup.dir, now)?;
    log::info!(
        "backup {} will be written to {}",
        descriptor.timestamp,
        descriptor.full_path.display()
    );

    // 3. Dump
    let args = build_dump_args(cfg, &descriptor.full_path);
    let output = run_stage(shell, "Dump", &args)?;
    if !output.success() {
        let code = output.code;
        StageOutcome::failed("Dump", Some(output)).print();
        return Err(BackupError::DumpFailed { code });
    }
    StageOutcome::ok("Dump", Some(descriptor.filename.clone())).print();

    // 4. Report
    let size_bytes = file_size(&descriptor.full_path)?;
    Ok(BackupReport {
        descriptor,
        size_bytes,
    })
}

// ─── Stages ───────────────────────────────────────────────────────────────────

/// Ask the platform CLI whether a project is linked.
///
/// A non-zero exit counts as "not linked"; the CLI exits non-zero when there
/// is no session at all.  Failing to spawn the CLI is a hard error.
pub fn check_link(cfg: &Config, shell: &dyn Shell) -> Result<LinkStatus, BackupError> {
    let output = run_stage(shell, "Linked project", &build_projects_list_args(cfg))?;
    if !output.success() {
        log::debug!(
            "projects list exited with {:?}: {}",
            output.code,
            output.stderr.trim()
        );
        return Ok(LinkStatus::NotLinked);
    }
    Ok(parse_link_status(&output.stdout, &cfg.tool.linked_marker))
}

/// Compute the output path for `now` and make sure its directory exists.
///
/// Directory creation is idempotent.  An existing file at the computed path
/// is an error rather than being overwritten.
pub fn prepare_destination<Tz>(
    dir: &Path,
    now: &DateTime<Tz>,
) -> Result<BackupDescriptor, BackupError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let descriptor = BackupDescriptor::at(dir, now);

    fs::create_dir_all(&descriptor.directory).map_err(|source| BackupError::CreateDir {
        path: descriptor.directory.clone(),
        source,
    })?;

    if descriptor.full_path.exists() {
        return Err(BackupError::DestinationExists {
            path: descriptor.full_path,
        });
    }

    Ok(descriptor)
}

/// Size of the dump file.  A tool that exits 0 without writing anything
/// yields 0.
fn file_size(path: &Path) -> Result<u64, BackupError> {
    match fs::metadata(path) {
        Ok(m) => Ok(m.len()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("dump exited 0 but {} does not exist", path.display());
            Ok(0)
        },
        Err(source) => Err(BackupError::Metadata {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
