//! Template tree scanning.
//! Walks the template root depth-first and produces the ordered manifest the
//! later pipeline stages consume.

use crate::error::{Error, Result};
use crate::manifest::{EntryKind, Manifest, TemplateEntry};
use crate::patterns::PathMatcher;
use log::debug;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Scans the template tree under `template_root`.
///
/// Every directory and file is evaluated by the matcher. Excluded directories
/// are pruned: they are recorded as excluded but never descended into, so
/// their contents are never individually evaluated. Excluded files are
/// recorded with `included = false` and never opened. Symbolic links are
/// followed; a link cycle fails the scan.
///
/// # Errors
/// * `Error::TemplateNotFoundError` if the root does not exist
/// * `Error::TemplateNotReadableError` if the root cannot be read
/// * `Error::TemplateTraversalError` on link cycles or walk failures
pub fn scan_template(template_root: &Path, matcher: &PathMatcher) -> Result<Manifest> {
    if !template_root.exists() {
        return Err(Error::TemplateNotFoundError {
            template_dir: template_root.display().to_string(),
        });
    }
    if !template_root.is_dir() {
        return Err(Error::TemplateNotReadableError {
            template_dir: template_root.display().to_string(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        });
    }
    if let Err(source) = std::fs::read_dir(template_root) {
        return Err(Error::TemplateNotReadableError {
            template_dir: template_root.display().to_string(),
            source,
        });
    }

    debug!("Scanning template structure from {}", template_root.display());

    let walker = WalkDir::new(template_root)
        .min_depth(1)
        .follow_links(true)
        .sort_by(|a, b| {
            // Child directories first, then files, each lexically sorted.
            let a_dir = a.file_type().is_dir();
            let b_dir = b.file_type().is_dir();
            b_dir.cmp(&a_dir).then_with(|| a.file_name().cmp(b.file_name()))
        });

    let mut manifest = Manifest::default();
    let mut it = walker.into_iter();

    while let Some(dir_entry) = it.next() {
        let dir_entry = dir_entry.map_err(traversal_error)?;
        let relative_path = relative_path_of(dir_entry.path(), template_root)?;
        let included = matcher.is_included(&relative_path);

        if dir_entry.file_type().is_dir() {
            if !included {
                debug!("Excluding directory: {}", relative_path);
                manifest.push(TemplateEntry {
                    relative_path,
                    kind: EntryKind::Directory,
                    included: false,
                    size_bytes: None,
                });
                it.skip_current_dir();
                continue;
            }
            debug!("Including directory: {}", relative_path);
            manifest.push(TemplateEntry {
                relative_path,
                kind: EntryKind::Directory,
                included: true,
                size_bytes: None,
            });
        } else {
            // Excluded files stay in the manifest so the validator can assert
            // their absence, but they are never opened.
            let size_bytes = if included {
                Some(dir_entry.metadata().map_err(traversal_error)?.len())
            } else {
                None
            };
            debug!(
                "{} file: {}",
                if included { "Including" } else { "Excluding" },
                relative_path
            );
            manifest.push(TemplateEntry {
                relative_path,
                kind: EntryKind::File,
                included,
                size_bytes,
            });
        }
    }

    Ok(manifest)
}

fn traversal_error(err: walkdir::Error) -> Error {
    let path = err.path().map(|p| p.display().to_string()).unwrap_or_default();
    if err.loop_ancestor().is_some() {
        return Error::TemplateTraversalError {
            path,
            reason: "symbolic link cycle detected".to_string(),
        };
    }
    let reason = err.to_string();
    match err.into_io_error() {
        Some(source) if source.kind() == io::ErrorKind::PermissionDenied => {
            Error::TemplateNotReadableError { template_dir: path, source }
        }
        _ => Error::TemplateTraversalError { path, reason },
    }
}

fn relative_path_of(path: &Path, template_root: &Path) -> Result<String> {
    let relative = path.strip_prefix(template_root).map_err(|e| Error::TemplateTraversalError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut parts = Vec::new();
    for component in relative.components() {
        let part = component.as_os_str().to_str().ok_or_else(|| Error::TemplateTraversalError {
            path: path.display().to_string(),
            reason: "path is not valid UTF-8".to_string(),
        })?;
        parts.push(part);
    }
    Ok(parts.join("/"))
}
