//! Error types for catalog loading and merging

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing dataset files
///
/// Malformed optional fields never produce an error; they are dropped with a
/// warning. Only unreadable files and invalid JSON syntax do.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File is not valid JSON for its dataset
    #[error("JSON error in {path}: {source}")]
    Json {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },

    /// Document has the wrong top-level shape
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}
