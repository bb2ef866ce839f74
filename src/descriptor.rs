//! Naming of the output file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

/// `strftime` pattern for the timestamp component, e.g. `20260115_093012`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Where one backup will be written.  Built once at the start of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupDescriptor {
    pub timestamp: String,
    pub directory: PathBuf,
    pub filename: String,
    pub full_path: PathBuf,
}

impl BackupDescriptor {
    /// Describe the backup taken at `now` inside `directory`.
    ///
    /// Resolution is one second; two runs within the same second map to the
    /// same path.
    pub fn at<Tz>(directory: &Path, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
        let filename = format!("backup_{timestamp}.sql");
        Self {
            full_path: directory.join(&filename),
            directory: directory.to_path_buf(),
            filename,
            timestamp,
        }
    }
}
