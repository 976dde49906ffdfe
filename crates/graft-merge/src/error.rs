//! Error types for the merge crate.

use graft_value::ValueError;

/// Errors that can occur during a merge.
///
/// Only malformed top-level input raises. Anomalies found deeper in the
/// graph (cycles, falsy values, shape mismatches) are resolved by the
/// strategies' skip and overwrite rules instead.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// A value handed to the engine or a strategy has the wrong shape.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Converting between JSON and a value graph failed.
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

impl MergeError {
    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Returns `true` for [`MergeError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
