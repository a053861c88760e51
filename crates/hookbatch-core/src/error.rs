// Rust guideline compliant 2026-02-06

//! Error types for the hookbatch core library.

use thiserror::Error;

/// Result type alias for hookbatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by a work function.
pub type WorkError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for hookbatch operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Per-run limit must be a positive integer.
    #[error("Invalid per-run limit: {0} (must be greater than 0)")]
    InvalidLimit(usize),

    /// `run` was called before the identifier set was seeded.
    #[error("Batch '{0}' has no identifiers; call set_ids before run")]
    NotSeeded(String),

    /// A work item failed while processing.
    #[error("Batch '{run_id}' failed on item {item}: {source}")]
    Item {
        /// Run identifier of the batch.
        run_id: String,
        /// Display form of the failing identifier.
        item: String,
        /// Underlying failure reported by the work function.
        #[source]
        source: WorkError,
    },

    /// Host key collides with a field the controller owns.
    #[error("Record key '{0}' is reserved")]
    ReservedKey(String),

    /// Run identifier cannot be used as a storage key.
    #[error("Invalid run id: {0:?}")]
    InvalidRunId(String),

    /// Another invocation holds the progress record lock.
    #[error("Progress record for '{0}' is locked by another invocation")]
    Locked(String),

    /// The host driver gave up before the run reported completion.
    #[error("Run '{run_id}' not finished after {limit} invocations")]
    InvocationLimit {
        /// Run identifier being driven.
        run_id: String,
        /// Configured maximum number of invocations.
        limit: u32,
    },

    /// Invalid configuration value or file.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
