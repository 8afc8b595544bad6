//! Error types for the Verity library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Verity operations.
#[derive(Debug, Error)]
pub enum VerityError {
    /// Invalid generator, distribution or engine parameters.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A claim that cannot be part of a claim relation.
    #[error("Invalid claim (source {source_id}, item {item}): {message}")]
    InvalidClaim {
        source_id: usize,
        item: usize,
        message: String,
    },

    /// Resolved-value table does not line up with the ground truth.
    #[error("Shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: String, found: String },

    /// More matches than items were counted while scoring.
    #[error("Impossible score: {matches} matches for {items} items")]
    ImpossibleScore { matches: usize, items: usize },

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error saving or loading experiment records.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Refusing to overwrite an existing results file.
    #[error("File already exists: {0}")]
    AlreadyExists(PathBuf),
}

/// Result type alias for Verity operations.
pub type Result<T> = std::result::Result<T, VerityError>;
