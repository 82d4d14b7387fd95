//! Error taxonomy for graph operations.
//!
//! Exactly two kinds cross the adapter boundary: `NotFound` for a
//! zero-result lookup (expected, drives branching, never logged as an
//! error) and `Backend` for everything else (fatal, never retried).
//! Raw backend error text never leaves the adapter layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    /// A lookup matched nothing. Not a failure.
    #[error("no matching element in graph")]
    NotFound,

    /// Any other backend failure: network, auth, malformed query,
    /// constraint violation.
    #[error("graph backend error: {0}")]
    Backend(anyhow::Error),
}

impl From<anyhow::Error> for GraphError {
    fn from(err: anyhow::Error) -> Self {
        Self::Backend(err)
    }
}

impl GraphError {
    /// Wrap a backend failure.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
