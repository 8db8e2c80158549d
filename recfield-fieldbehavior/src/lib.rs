//! Field behavior enforcement over schema-described records.
//!
//! Fields carry declarative behavior tags (see [`recfield_model::Behavior`]).
//! This crate enforces the two that constrain updates:
//! - `IMMUTABLE`: [`validate_immutable_fields_are_identical_with_mask`] and
//!   friends reject updates that change an immutable field
//! - `OUTPUT_ONLY`: [`clear_output_only_fields`] strips server-managed fields
//!   from client input; [`copy_output_only_fields`] carries them over from a
//!   stored record onto an updated one
//!
//! See <https://google.aip.dev/203> (Field behavior documentation).

mod error;
mod immutable;
mod output_only;

pub use error::{FieldBehaviorError, FieldBehaviorResult};
pub use immutable::{
    validate_immutable_fields_are_identical, validate_immutable_fields_are_identical_with_mask,
    validate_immutable_fields_with_mask,
};
pub use output_only::{clear_output_only_fields, copy_output_only_fields};
