//! Subcommand handlers.
//!
//! | File          | Invocation           | Description                      |
//! |---------------|----------------------|----------------------------------|
//! | `init.rs`     | `db-backup init`     | Scaffold a `db-backup.toml`      |
//! | `run.rs`      | `db-backup`          | Take one data-only dump          |

pub mod init;
pub mod run;
