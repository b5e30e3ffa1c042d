// src/error.rs

//! Error types for spec-cleaner

use thiserror::Error;

/// Errors surfaced by the preamble engine, its tables and configuration
///
/// Malformed spec lines are never errors: the engine keeps them verbatim.
/// Everything here is either an environment problem (files, config) or an
/// internal inconsistency between the category table and the dispatch code.
#[derive(Error, Debug)]
pub enum Error {
    /// A category without a fixed tag key was committed without an explicit key
    #[error("Unhandled category in preamble: {0}")]
    UnhandledCategory(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for spec-cleaner operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err.to_string())
    }
}
