//! Errors raised while taking a backup.
//!
//! Every variant is terminal: the run stops, nothing is retried and nothing
//! written so far is rolled back.  `main` maps all of them to exit code 1.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackupError {
    /// The platform CLI reports no project linked to this directory.
    #[error("no linked project detected by `{tool}`")]
    NoLinkedProject { tool: String },

    /// The dump command ran and exited non-zero.
    #[error("database dump failed ({})", describe_code(.code.as_ref()))]
    DumpFailed { code: Option<i32> },

    /// A dump with the same timestamp already exists.
    #[error("refusing to overwrite existing backup {}", .path.display())]
    DestinationExists { path: PathBuf },

    #[error("could not create backup directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to spawn `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot run an empty command")]
    EmptyCommand,

    #[error("could not read backup file {}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BackupError {
    /// Process exit code reported to the calling shell or CI job.
    pub const fn exit_code(&self) -> u8 {
        1
    }

    /// What the operator should do next, when there is something to say.
    pub fn remediation(&self) -> Option<String> {
        match self {
            Self::NoLinkedProject { tool } => Some(format!(
                "Link this directory to a project first:\n    {tool} link --project-ref <project-ref>"
            )),
            Self::DumpFailed { .. } => {
                Some("Check the dump tool's output above for details.".into())
            },
            Self::DestinationExists { .. } => {
                Some("Another backup was taken this second; wait a moment and retry.".into())
            },
            _ => None,
        }
    }
}

fn describe_code(code: Option<&i32>) -> String {
    code.map_or_else(
        || "terminated by signal".to_string(),
        |c| format!("exit code {c}"),
    )
}
