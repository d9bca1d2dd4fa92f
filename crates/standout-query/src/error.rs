//! Error types for the query crate.

use thiserror::Error;

use crate::op::Op;

/// Errors that can occur when building, encoding or decoding queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A filter was built with an empty field name.
    #[error("filter field name must not be empty")]
    EmptyField,

    /// A field name collides with operator syntax.
    #[error("invalid field name '{0}': field names must not start with '$'")]
    InvalidField(String),

    /// A logical combination was built without any member filters.
    #[error("'{0}' requires at least one filter")]
    EmptyLogical(Op),

    /// An operator token that this crate does not know.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// A JSON document that does not have the shape of a filter.
    #[error("malformed filter: {0}")]
    Malformed(String),

    /// JSON encoding or decoding failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
