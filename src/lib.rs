//! Onboard scaffolds new project directories from reusable template folders.
//! It mirrors a template tree into a target location, substitutes
//! `{{ name }}` placeholders inside copied files and excludes
//! documentation-only guide files by default.

/// Command-line interface module for the onboard application
pub mod cli;

/// Variable map construction from CLI flags and variables files
pub mod config;

/// Error types and handling for the onboard application
pub mod error;

/// Target directory creation and the per-run conflict policy
pub mod generator;

/// The ordered manifest produced by scanning a template tree
pub mod manifest;

/// Inclusion and exclusion decisions for template paths
pub mod patterns;

/// File population with substitution and conflict handling
pub mod populator;

/// User confirmation prompts
pub mod prompt;

/// Template tree scanning
pub mod scanner;

/// Flat placeholder substitution in file contents
pub mod substitute;

/// Post-run validation of the target tree
pub mod validator;
