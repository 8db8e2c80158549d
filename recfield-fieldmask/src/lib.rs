//! Field masks over schema-described records.
//!
//! A [`FieldMask`] is a set of dotted paths (`"author.name"`,
//! ``"labels.`app.kubernetes.io/name`"``) naming the parts of a record an
//! operation may touch. This crate provides:
//! - [`split_path`]: the path tokenizer (backticks escape dots in map keys)
//! - [`validate`]: checks paths against a record's schema and map keys
//! - [`get`]: resolves each path to its field and value, in mask order
//! - [`update`]: applies a partial update from one record to another
//!
//! The single path `"*"` is the wildcard mask: "every field". It must not
//! be combined with other paths.

mod error;
mod get;
mod mask;
mod path;
mod update;
mod validate;

pub use error::{FieldMaskError, FieldMaskResult};
pub use get::{FieldValue, get};
pub use mask::{FieldMask, WILDCARD_PATH, is_full_replacement};
pub use path::{join_path, quote_segment, split_path};
pub use update::update;
pub use validate::validate;
