//! Error handling for the onboard application.
//! Defines the error types shared by the scanning, generation and population
//! stages, plus the `Result` alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Errors that can terminate a run.
///
/// Scan-time and directory-creation-time failures are fatal and abort the
/// whole run. Per-file failures during population are not represented here;
/// they are accumulated in `GenerationResult.errors` and the run continues.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// The template root does not exist
    #[error("Template directory '{template_dir}' does not exist.")]
    TemplateNotFoundError { template_dir: String },

    /// The template root exists but cannot be read
    #[error("Template directory '{template_dir}' is not readable: {source}.")]
    TemplateNotReadableError { template_dir: String, source: io::Error },

    /// Walking the template tree failed, e.g. on a symbolic link cycle
    #[error("Template traversal failed at '{path}': {reason}.")]
    TemplateTraversalError { path: String, reason: String },

    /// A target path exists with an incompatible kind
    #[error("Path '{path}' already exists and is not a directory.")]
    ConflictError { path: String },

    /// A target directory could not be created
    #[error("Failed to create directory '{path}': {source}.")]
    GenerationError { path: String, source: io::Error },

    /// A user-supplied glob pattern did not compile
    #[error("Invalid pattern '{pattern}': {reason}.")]
    PatternError { pattern: String, reason: String },

    /// Represents errors in variable files or `--var` pairs
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Terminal interaction failed while confirming an overwrite
    #[error("Prompt error: {0}.")]
    PromptError(String),
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Prints the error message to stderr and exits with status code 1.
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
