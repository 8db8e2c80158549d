//! Error types for the record model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while building schemas or populating records.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The record's schema has no field with this name.
    #[error("unknown field {field:?} in {schema}")]
    UnknownField { schema: String, field: String },

    /// A schema declares the same field name twice.
    #[error("duplicate field {field:?} in {schema}")]
    DuplicateField { schema: String, field: String },

    /// A value does not fit the kind declared by the field.
    #[error("value for field {field:?} does not match its kind: expected {expected}")]
    KindMismatch { field: String, expected: String },

    /// A JSON document does not describe a valid record.
    #[error("invalid record JSON: {0}")]
    InvalidJson(String),

    /// A JSON document could not be parsed.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A bytes field holds a string that is not valid base64.
    #[error("invalid bytes encoding: {0}")]
    InvalidBytes(#[from] base64::DecodeError),
}
