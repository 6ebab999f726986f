//! Inclusion decisions for template paths.
//! Compiles the user's exclude and include glob lists into matchers and
//! applies them together with the built-in guide-file rule.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Path components containing this substring are excluded by default.
pub const GUIDE_MARKER: &str = "_guide";

/// Decides whether a relative template path is included in generation.
#[derive(Debug)]
pub struct PathMatcher {
    excludes: GlobSet,
    includes: GlobSet,
}

impl PathMatcher {
    /// Compiles the exclude and include pattern lists.
    ///
    /// # Errors
    /// * `Error::PatternError` if any pattern is not a valid glob
    pub fn new(exclude_patterns: &[String], include_patterns: &[String]) -> Result<Self> {
        Ok(Self {
            excludes: build_glob_set(exclude_patterns)?,
            includes: build_glob_set(include_patterns)?,
        })
    }

    /// Returns whether the entry at `relative_path` is included.
    ///
    /// Precedence: include patterns win over exclude patterns, which win over
    /// the built-in guide rule; everything else is included. Patterns are
    /// matched against the full slash-separated relative path, the guide rule
    /// against the final path component.
    pub fn is_included(&self, relative_path: &str) -> bool {
        if self.includes.is_match(relative_path) {
            return true;
        }
        if self.excludes.is_match(relative_path) {
            return false;
        }
        let file_name = relative_path.rsplit('/').next().unwrap_or(relative_path);
        !file_name.contains(GUIDE_MARKER)
    }
}

impl Default for PathMatcher {
    /// Matcher with no user patterns; only the guide rule applies.
    fn default() -> Self {
        Self { excludes: GlobSet::empty(), includes: GlobSet::empty() }
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).map_err(|e| Error::PatternError {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?);
    }
    builder.build().map_err(|e| Error::PatternError {
        pattern: patterns.join(", "),
        reason: e.to_string(),
    })
}
