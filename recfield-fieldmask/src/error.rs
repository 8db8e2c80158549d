//! Error types for field mask operations.

use thiserror::Error;

/// Result type for field mask operations.
pub type FieldMaskResult<T> = Result<T, FieldMaskError>;

/// Errors raised while validating or resolving field mask paths.
///
/// Every variant names the full offending path as written in the mask.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldMaskError {
    /// `*` was combined with other paths, or used where explicit paths are
    /// required.
    #[error("invalid field path: '*' must not be used with other paths")]
    InvalidWildcard,

    /// A segment names no field of the record it addresses.
    #[error("invalid field path: {path}")]
    PathNotFound { path: String },

    /// The path continues past a list field.
    #[error("lists aren't addressable by item. invalid field path: {path}")]
    ListAddressingUnsupported { path: String },

    /// The path addresses a map entry that does not exist.
    #[error("key doesn't exist in map: {key:?}. invalid field path: {path}")]
    MapKeyNotFound { path: String, key: String },

    /// The path continues past a scalar field or a scalar map value.
    #[error("scalars don't have fields. invalid field path: {path}")]
    ScalarHasNoFields { path: String },
}
