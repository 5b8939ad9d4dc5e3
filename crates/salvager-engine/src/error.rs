//! Error types for the engine

use thiserror::Error;

/// Errors that can occur during engine operations
///
/// Data-shape problems in the datasets never surface here; only caller
/// contract breaches and storage failures do.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Requirement lookup called with a blank item name
    #[error("Item name must not be empty")]
    EmptyItemName,

    /// Checklist storage failed to load or save
    #[error("Checklist storage error: {0}")]
    Storage(String),
}
