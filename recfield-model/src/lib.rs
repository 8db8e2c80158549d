//! Schema-described record model for recfield.
//!
//! Defines the reflection surface the field mask and field behavior engines
//! operate on:
//! - [`Schema`]: a record type: full name plus ordered [`FieldDescriptor`]s
//! - [`FieldKind`]: the closed set of field shapes (scalar, record, list, map)
//! - [`Behavior`] / [`BehaviorSet`]: declarative per-field tags such as
//!   `IMMUTABLE` and `OUTPUT_ONLY`
//! - [`Record`] / [`Value`]: a schema-typed instance and its field values
//! - [`clear_fields`] / [`copy_fields`]: the one-level clear/copy-by-tag
//!   primitive the recursive behavior algorithms build on
//!
//! Schemas are plain serde documents, so they can be loaded from JSON
//! configuration with [`Schema::from_json`]; records convert to and from JSON
//! with [`Record::from_json`] and [`Record::to_json`].

mod behavior;
mod error;
mod json;
mod record;
mod schema;
mod value;

pub use behavior::{Behavior, BehaviorSet, clear_fields, copy_fields};
pub use error::{ModelError, ModelResult};
pub use record::Record;
pub use schema::{ElementKind, FieldDescriptor, FieldKind, ScalarType, Schema, SchemaBuilder};
pub use value::{Scalar, Value};
