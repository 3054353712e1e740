//! Error types for handler-chain.

use thiserror::Error;

/// Main error type for chain execution.
///
/// The chain itself never produces an error: running past the last handler
/// yields [`Response::no_handler`](crate::Response::no_handler). Every variant
/// here originates in a handler or in a typed store/body conversion and is
/// passed back to the entry point's caller untouched.
#[derive(Debug, Error)]
pub enum ChainError {
    /// JSON conversion error (typed store access, typed body access).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure reported by a handler with a plain message.
    #[error("Handler error: {0}")]
    Handler(String),

    /// Any other error raised inside a handler.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ChainError {
    /// Shorthand for [`ChainError::Handler`].
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler(message.into())
    }
}

/// Result type alias using ChainError.
pub type Result<T> = std::result::Result<T, ChainError>;
