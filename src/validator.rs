//! Post-run consistency check of the target tree against the manifest.
//! Confirms that every included entry was materialized and that excluded
//! entries are absent, e.g. stale guide files left over from an earlier run
//! with a different pattern set.

use crate::manifest::{EntryKind, Manifest};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MismatchKind {
    /// An included entry is absent from the target tree or has the wrong kind.
    Missing,
    /// An excluded entry is present in the target tree.
    Unexpected,
}

#[derive(Debug, Clone, Serialize)]
pub struct Mismatch {
    pub relative_path: String,
    pub kind: MismatchKind,
}

/// Structured comparison result. Advisory only: it never blocks a run.
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub mismatches: Vec<Mismatch>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Compares the target tree against the manifest. Mutates nothing.
pub fn validate_target(manifest: &Manifest, target_root: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    for entry in manifest.entries() {
        let target_path = target_root.join(&entry.relative_path);

        if entry.included {
            let present = match entry.kind {
                EntryKind::Directory => target_path.is_dir(),
                EntryKind::File => target_path.is_file(),
            };
            if !present {
                report.mismatches.push(Mismatch {
                    relative_path: entry.relative_path.clone(),
                    kind: MismatchKind::Missing,
                });
            }
        } else if target_path.exists() {
            report.mismatches.push(Mismatch {
                relative_path: entry.relative_path.clone(),
                kind: MismatchKind::Unexpected,
            });
        }
    }

    report
}
