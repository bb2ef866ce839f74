//! Linked-project detection from `projects list` output.
//!
//! The platform CLI is asked for JSON, where each project carries a `linked`
//! boolean.  Older CLIs ignore `--output json` and print a table instead; the
//! linked row there is flagged with a marker glyph, so text output falls back
//! to a line scan for that marker.

use serde::Deserialize;

/// A project the local CLI session is linked to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedProject {
    /// Project reference id.  Unknown when detected from table output.
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    Linked(LinkedProject),
    NotLinked,
}

#[derive(Debug, Deserialize)]
struct ProjectEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    linked: bool,
}

/// Decide whether `stdout` of `projects list` shows a linked project.
pub fn parse_link_status(stdout: &str, marker: &str) -> LinkStatus {
    let trimmed = stdout.trim();

    if let Ok(entries) = serde_json::from_str::<Vec<ProjectEntry>>(trimmed) {
        log::debug!("projects list returned {} JSON entries", entries.len());
        return entries
            .into_iter()
            .find(|e| e.linked)
            .map_or(LinkStatus::NotLinked, |e| {
                LinkStatus::Linked(LinkedProject {
                    id: e.id,
                    name: e.name,
                })
            });
    }

    log::debug!("projects list output is not JSON, scanning for marker {marker:?}");
    if !marker.is_empty() && trimmed.lines().any(|l| l.contains(marker)) {
        LinkStatus::Linked(LinkedProject {
            id: None,
            name: None,
        })
    } else {
        LinkStatus::NotLinked
    }
}
