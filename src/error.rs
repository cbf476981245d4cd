//! Error types for loading a dataset and counting patterns.

use thiserror::Error;

/// Errors surfaced by the store and the counters.
///
/// All of them are fatal for the operation that produced them; nothing in
/// this crate retries.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The text, suffix array, LCP array or a pattern violates the input
    /// contract (bad permutation, length mismatch, out-of-alphabet byte...).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// An empty pattern was given while the policy rejects empty patterns.
    #[error("empty pattern rejected")]
    EmptyPattern,

    /// Underlying I/O failure while reading a dataset.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        SearchError::MalformedInput(msg.into())
    }

    /// Whether this is a load-time input contract violation.
    pub fn is_malformed(&self) -> bool {
        matches!(self, SearchError::MalformedInput(_))
    }
}

/// Convenience alias for results carrying a [`SearchError`].
pub type Result<T> = std::result::Result<T, SearchError>;
