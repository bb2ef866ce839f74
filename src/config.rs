//! Configuration types and loading logic.
//!
//! `Config` is the resolved view of `db-backup.toml`.  Every field has a
//! default, so the file is entirely optional: running `db-backup` without any
//! config dumps the `public` schema of the linked project into `./backups`.
//!
//! Two files are read and merged per field, local values winning:
//!
//! 1. `~/.config/db-backup/config.toml` (global defaults)
//! 2. `./db-backup.toml`, or whatever `--config` points at
//!
//! # File format
//!
//! ```toml
//! [tool]
//! program       = "supabase"   # platform CLI, name or absolute path
//! linked_marker = "●"          # marks the linked row in text output
//!
//! [backup]
//! dir       = "./backups"
//! schemas   = ["public"]
//! data_only = true
//!
//! [restore]
//! script = "./scripts/restore-database.sh"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ─── Resolved config ──────────────────────────────────────────────────────────

/// Fully resolved configuration handed to the backup runner.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// The external platform CLI.
    #[serde(default)]
    pub tool: ToolConfig,

    /// Where dumps land and what goes into them.
    #[serde(default)]
    pub backup: BackupConfig,

    /// Companion restore step, referenced in the success message.
    #[serde(default)]
    pub restore: RestoreConfig,
}

/// `[tool]`
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ToolConfig {
    /// Program spawned for every platform call.  Looked up on `PATH` unless
    /// it contains a path separator.
    #[serde(default = "default_program")]
    pub program: String,

    /// Marker that flags the linked project when `projects list` does not
    /// answer in JSON.
    #[serde(default = "default_linked_marker")]
    pub linked_marker: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            linked_marker: default_linked_marker(),
        }
    }
}

/// `[backup]`
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct BackupConfig {
    /// Output directory.  Created (with parents) on demand.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Schemas passed to `--schema`, comma-joined.
    #[serde(default = "default_schemas")]
    pub schemas: Vec<String>,

    /// Exclude DDL from the dump.  Schema is expected to live in migrations.
    #[serde(default = "default_data_only")]
    pub data_only: bool,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            schemas: default_schemas(),
            data_only: default_data_only(),
        }
    }
}

/// `[restore]`
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RestoreConfig {
    #[serde(default = "default_restore_script")]
    pub script: String,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            script: default_restore_script(),
        }
    }
}

// ─── Defaults ─────────────────────────────────────────────────────────────────

pub fn default_program() -> String {
    "supabase".into()
}

pub fn default_linked_marker() -> String {
    "●".into()
}

pub fn default_dir() -> PathBuf {
    PathBuf::from("./backups")
}

pub fn default_schemas() -> Vec<String> {
    vec!["public".into()]
}

pub const fn default_data_only() -> bool {
    true
}

pub fn default_restore_script() -> String {
    "./scripts/restore-database.sh".into()
}

// ─── Partial (layered) config ─────────────────────────────────────────────────

/// One config file as written on disk, where every field may be absent.
///
/// Two of these (global and local) are merged with [`PartialConfig::merge`]
/// and then turned into a [`Config`] with [`PartialConfig::resolve`].
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct PartialConfig {
    #[serde(default)]
    pub tool: PartialToolConfig,
    #[serde(default)]
    pub backup: PartialBackupConfig,
    #[serde(default)]
    pub restore: PartialRestoreConfig,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct PartialToolConfig {
    pub program: Option<String>,
    pub linked_marker: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct PartialBackupConfig {
    pub dir: Option<PathBuf>,
    pub schemas: Option<Vec<String>>,
    pub data_only: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct PartialRestoreConfig {
    pub script: Option<String>,
}

impl PartialConfig {
    /// Overlay `other` on top of `self`.  Fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            tool: PartialToolConfig {
                program: other.tool.program.or(self.tool.program),
                linked_marker: other.tool.linked_marker.or(self.tool.linked_marker),
            },
            backup: PartialBackupConfig {
                dir: other.backup.dir.or(self.backup.dir),
                schemas: other.backup.schemas.or(self.backup.schemas),
                data_only: other.backup.data_only.or(self.backup.data_only),
            },
            restore: PartialRestoreConfig {
                script: other.restore.script.or(self.restore.script),
            },
        }
    }

    /// Fill every unset field with its default.
    pub fn resolve(self) -> Config {
        Config {
            tool: ToolConfig {
                program: self.tool.program.unwrap_or_else(default_program),
                linked_marker: self
                    .tool
                    .linked_marker
                    .unwrap_or_else(default_linked_marker),
            },
            backup: BackupConfig {
                dir: self.backup.dir.unwrap_or_else(default_dir),
                schemas: self
                    .backup
                    .schemas
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(default_schemas),
                data_only: self.backup.data_only.unwrap_or(default_data_only()),
            },
            restore: RestoreConfig {
                script: self.restore.script.unwrap_or_else(default_restore_script),
            },
        }
    }
}

// ─── Loader ───────────────────────────────────────────────────────────────────

/// Parse one config file.
///
/// Returns `Ok(None)` when the file does not exist, and an error when it
/// exists but cannot be read or is not valid TOML.
pub fn parse_partial(path: &Path) -> Result<Option<PartialConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    let partial = toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(partial))
}

/// Location of the global config file, if the platform has a config dir.
pub fn global_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|d| d.join("db-backup").join("config.toml"))
}

/// Load the global and local config files and merge them.
///
/// A broken global file is logged and ignored; a broken local file is an
/// error.  A missing local file prints a warning and falls back to defaults.
pub fn load_merged(global: Option<&Path>, local: &Path) -> Result<Config> {
    let global_partial = match global.map(parse_partial) {
        Some(Ok(Some(p))) => p,
        Some(Err(e)) => {
            log::warn!("ignoring global config: {e:#}");
            PartialConfig::default()
        },
        Some(Ok(None)) | None => PartialConfig::default(),
    };

    let local_partial = if let Some(p) = parse_partial(local)? {
        p
    } else {
        eprintln!(
            "Warning: config file '{}' not found, using defaults.\n\
             Run 'db-backup init' to generate a starter config.",
            local.display()
        );
        PartialConfig::default()
    };

    Ok(global_partial.merge(local_partial).resolve())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
