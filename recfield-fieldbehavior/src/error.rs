//! Error types for field behavior enforcement.

use recfield_model::Value;
use thiserror::Error;

/// Result type for field behavior operations.
pub type FieldBehaviorResult<T> = Result<T, FieldBehaviorError>;

/// Errors raised while enforcing field behaviors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldBehaviorError {
    /// The two records are instances of different schema types.
    #[error("can't compare different record types: {actual} and {expected}")]
    TypeMismatch { expected: String, actual: String },

    /// An immutable list or map changed size.
    #[error("change to immutable field {path:?}: expected {collection} to be of length {expected}, got {actual}")]
    LengthMismatch {
        path: String,
        collection: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An entry of an immutable map is missing from the new record.
    #[error("change to immutable field: element {path} is missing")]
    MapEntryMissing { path: String },

    /// An immutable value differs between the original and the new record.
    #[error("change to immutable field {path:?}: {expected} doesn't match {actual}")]
    ImmutableFieldChanged {
        path: String,
        expected: Value,
        actual: Value,
    },

    /// Output-only fields inside list elements cannot be copied: the
    /// elements of two lists have no reliable correspondence.
    #[error("can't copy output only fields of list elements: {path:?}")]
    UnsupportedListCopy { path: String },
}

impl FieldBehaviorError {
    /// The path of the offending field, when the error concerns one.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::TypeMismatch { .. } => None,
            Self::LengthMismatch { path, .. }
            | Self::MapEntryMissing { path }
            | Self::ImmutableFieldChanged { path, .. }
            | Self::UnsupportedListCopy { path } => Some(path),
        }
    }
}
