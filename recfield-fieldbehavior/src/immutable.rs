//! IMMUTABLE enforcement.
//!
//! An immutable scalar must not change. An immutable list must keep its
//! length, and its elements must match: record elements on their own
//! immutable fields, scalar elements exactly. An immutable map must keep its
//! keys; scalar values must match exactly, record values only on their own
//! immutable fields. For example, with
//!
//! ```text
//! map<string, LineItem> items [IMMUTABLE];
//! message LineItem {
//!     string title = 1;
//!     string external_reference_id = 2 [IMMUTABLE];
//! }
//! ```
//!
//! changing `title` inside an entry passes, while changing
//! `external_reference_id`, or adding, removing or renaming a key, fails.
//! Untagged lists are replaced as a whole on update and are not checked.

use std::collections::BTreeMap;

use recfield_fieldmask::{FieldMask, join_path, quote_segment};
use recfield_model::{Behavior, ElementKind, FieldDescriptor, FieldKind, Record, Value};
use tracing::debug;

use crate::error::{FieldBehaviorError, FieldBehaviorResult};

static EMPTY_MAP: BTreeMap<String, Value> = BTreeMap::new();

/// Checks that `record` sets no immutable field within `mask`, by comparing
/// it against an empty record of the same type. Intended for update requests.
pub fn validate_immutable_fields_with_mask(record: &Record, mask: &FieldMask) -> FieldBehaviorResult<()> {
    let empty = Record::new(record.schema().clone());
    validate_immutable_fields_are_identical_with_mask(record, &empty, mask)
}

/// Checks every immutable field of `new` against `original`.
pub fn validate_immutable_fields_are_identical(new: &Record, original: &Record) -> FieldBehaviorResult<()> {
    validate_immutable_fields_are_identical_with_mask(new, original, &FieldMask::wildcard())
}

/// Checks that the immutable fields of `new` are identical to those of
/// `original`.
///
/// A field is checked only if `mask` is empty, holds `*`, or names the
/// field's path exactly. Fails on the first violation.
pub fn validate_immutable_fields_are_identical_with_mask(
    new: &Record,
    original: &Record,
    mask: &FieldMask,
) -> FieldBehaviorResult<()> {
    if !new.same_type(original) {
        return Err(FieldBehaviorError::TypeMismatch {
            expected: original.schema().full_name().to_string(),
            actual: new.schema().full_name().to_string(),
        });
    }
    debug!(
        mask = %mask,
        record_type = original.schema().full_name(),
        "validating immutable fields"
    );
    validate_immutable_fields(new, original, mask, "")
}

fn validate_immutable_fields(
    new: &Record,
    original: &Record,
    mask: &FieldMask,
    path: &str,
) -> FieldBehaviorResult<()> {
    for field in original.schema().fields() {
        let field_path = join_path(path, field.name());
        if !mask.covers(&field_path) {
            continue;
        }
        let immutable = field.has_behavior(Behavior::Immutable);

        match field.kind() {
            FieldKind::List(element) => {
                if immutable {
                    validate_immutable_list(element, list(new, field), list(original, field), &field_path)?;
                }
            }
            FieldKind::Map(element) => {
                let (new_entries, orig_entries) = (map(new, field), map(original, field));
                if immutable {
                    validate_immutable_map(element, new_entries, orig_entries, &field_path)?;
                } else if element.is_record() {
                    // only entries present on both sides are compared
                    for (key, new_value) in new_entries {
                        let Some(orig_value) = orig_entries.get(key) else {
                            continue;
                        };
                        if let (Value::Record(n), Value::Record(o)) = (new_value, orig_value) {
                            let entry_path = join_path(&field_path, &quote_segment(key));
                            validate_immutable_fields(n, o, mask, &entry_path)?;
                        }
                    }
                }
            }
            FieldKind::Record(_) => {
                let (new_value, orig_value) = (new.get_or_default(field), original.get_or_default(field));
                if let (Value::Record(n), Value::Record(o)) = (new_value.as_ref(), orig_value.as_ref()) {
                    validate_immutable_fields(n, o, mask, &field_path)?;
                }
            }
            FieldKind::Scalar(_) => {
                if !immutable {
                    continue;
                }
                let (new_value, orig_value) = (new.get_or_default(field), original.get_or_default(field));
                if new_value != orig_value {
                    return Err(FieldBehaviorError::ImmutableFieldChanged {
                        path: field_path,
                        expected: orig_value.into_owned(),
                        actual: new_value.into_owned(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn validate_immutable_list(
    element: &ElementKind,
    new: &[Value],
    original: &[Value],
    path: &str,
) -> FieldBehaviorResult<()> {
    if new.len() != original.len() {
        return Err(FieldBehaviorError::LengthMismatch {
            path: path.to_string(),
            collection: "list",
            expected: original.len(),
            actual: new.len(),
        });
    }

    let all = FieldMask::wildcard();
    for (index, (new_item, orig_item)) in new.iter().zip(original).enumerate() {
        let item_path = join_path(path, &index.to_string());
        match (element, new_item, orig_item) {
            (ElementKind::Record(_), Value::Record(n), Value::Record(o)) => {
                validate_immutable_fields(n, o, &all, &item_path)?;
            }
            _ if new_item != orig_item => {
                return Err(FieldBehaviorError::ImmutableFieldChanged {
                    path: item_path,
                    expected: orig_item.clone(),
                    actual: new_item.clone(),
                });
            }
            _ => {}
        }
    }
    Ok(())
}

fn validate_immutable_map(
    element: &ElementKind,
    new: &BTreeMap<String, Value>,
    original: &BTreeMap<String, Value>,
    path: &str,
) -> FieldBehaviorResult<()> {
    if new.len() != original.len() {
        return Err(FieldBehaviorError::LengthMismatch {
            path: path.to_string(),
            collection: "map",
            expected: original.len(),
            actual: new.len(),
        });
    }

    // Equal lengths, so every original key present in `new` means the key
    // sets are identical.
    let all = FieldMask::wildcard();
    for (key, orig_value) in original {
        let entry_path = join_path(path, &quote_segment(key));
        let Some(new_value) = new.get(key) else {
            return Err(FieldBehaviorError::MapEntryMissing { path: entry_path });
        };
        match (element, new_value, orig_value) {
            (ElementKind::Record(_), Value::Record(n), Value::Record(o)) => {
                validate_immutable_fields(n, o, &all, &entry_path)?;
            }
            _ if new_value != orig_value => {
                return Err(FieldBehaviorError::ImmutableFieldChanged {
                    path: entry_path,
                    expected: orig_value.clone(),
                    actual: new_value.clone(),
                });
            }
            _ => {}
        }
    }
    Ok(())
}

fn list<'a>(record: &'a Record, field: &FieldDescriptor) -> &'a [Value] {
    record
        .get(field.name())
        .and_then(Value::as_list)
        .unwrap_or_default()
}

fn map<'a>(record: &'a Record, field: &FieldDescriptor) -> &'a BTreeMap<String, Value> {
    record
        .get(field.name())
        .and_then(Value::as_map)
        .unwrap_or(&EMPTY_MAP)
}
