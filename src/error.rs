//! Error types for the markup codec and the customer store.

use thiserror::Error;

/// Result type for markup parsing and tree mapping.
pub type MarkupResult<T> = Result<T, MarkupError>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced while parsing markup text or mapping elements to the
/// department tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// Input text is not well-formed markup.
    #[error("malformed markup at position {position}: {reason}")]
    Malformed { position: usize, reason: String },

    /// An element is missing an attribute the mapping requires.
    #[error("element <{tag}> is missing the {attribute:?} attribute")]
    MissingAttribute { tag: String, attribute: &'static str },

    /// An element with an unexpected tag appeared inside the department tree.
    #[error("unexpected element <{tag}> in department markup")]
    UnexpectedElement { tag: String },
}

impl MarkupError {
    pub fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self::Malformed { position, reason: reason.into() }
    }
}

/// Errors produced by customer persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row exists for the requested customer id.
    #[error("customer {id} not found")]
    NotFound { id: i64 },

    /// The stored department blob could not be decoded.
    #[error("stored department markup is invalid: {0}")]
    Markup(#[from] MarkupError),

    /// The database rejected or failed an operation.
    #[error("database error: {0}")]
    Sql(#[from] sqlx::Error),

    /// The backend was asked to assign an id but reported none.
    #[error("backend did not report a generated customer id")]
    NoGeneratedId,
}
