//! Error types for the merge engine.

use thiserror::Error;

/// Result type for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// Errors that can occur while merging.
#[derive(Debug, Error)]
pub enum MergeError {
    /// `merge_all` was called without any values.
    #[error("cannot merge an empty list of values: a fold needs an initial value")]
    EmptyFold,

    /// A container rejected a write; propagated unchanged.
    #[error(transparent)]
    Value(#[from] mergify_types::Error),
}
