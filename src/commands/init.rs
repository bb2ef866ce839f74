//! `db-backup init`: write a starter config.

use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result, bail};

use crate::ui::StageOutcome;

/// Starter config.  Every value matches the built-in default, so the file
/// only documents what can be changed.
pub const TEMPLATE: &str = r#"# db-backup configuration
#
# Values set here override ~/.config/db-backup/config.toml field by field.

[tool]
# Platform CLI used for `projects list` and `db dump`.
program       = "supabase"
# Marks the linked project when `projects list` prints a table.
linked_marker = "●"

[backup]
dir       = "./backups"
schemas   = ["public"]
# Schema is managed by migrations; dump rows only.
data_only = true

[restore]
# Printed after a successful dump, followed by the backup path.
script = "./scripts/restore-database.sh"
"#;

/// Write [`TEMPLATE`] to `path`.  Fails if the file already exists.
pub fn run(path: &Path) -> Result<()> {
    let mut file = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            StageOutcome::failed("Init", None).print();
            bail!("{} already exists, refusing to overwrite", path.display());
        },
        Err(e) => return Err(e).with_context(|| format!("creating {}", path.display())),
    };

    file.write_all(TEMPLATE.as_bytes())
        .with_context(|| format!("writing {}", path.display()))?;

    StageOutcome::ok("Init", Some(path.display().to_string())).print();
    Ok(())
}
