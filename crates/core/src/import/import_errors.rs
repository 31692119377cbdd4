//! Error types for the import pipeline stages.

use thiserror::Error;

/// Row-level import error, carrying enough context (field name, url, path)
/// for a batch orchestrator to log and continue.
#[derive(Debug, Error)]
pub enum ImportError {
    /// A required field is blank (absent or empty). Fatal for the row; no
    /// partial writes are attempted.
    #[error("missing required field '{field}'")]
    MissingRequiredField { field: String },

    /// The category expression contains an empty segment. Fatal for the
    /// taxonomy stage only; the product write already committed stands.
    #[error("invalid category path '{path}': empty segment")]
    InvalidCategoryPath { path: String },

    /// The store rejected a write. Fatal for the row, not retried.
    #[error("failed to persist product '{slug}': {reason}")]
    PersistenceFailure { slug: String, reason: String },

    /// The image URL could not be dereferenced. Fatal for the media stage
    /// only.
    #[error("failed to attach media from '{url}': {reason}")]
    MediaFetchFailure { url: String, reason: String },
}
