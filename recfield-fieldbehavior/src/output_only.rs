use std::sync::Arc;

use recfield_fieldmask::{join_path, quote_segment};
use recfield_model::{Behavior, ElementKind, FieldKind, Record, Value, clear_fields, copy_fields};
use tracing::{debug, warn};

use crate::error::{FieldBehaviorError, FieldBehaviorResult};

/// Recursively clears OUTPUT_ONLY fields: at this level, then inside every
/// populated nested record, list element and map value.
pub fn clear_output_only_fields(record: &mut Record) {
    clear_fields(record, Behavior::OutputOnly);

    let schema = Arc::clone(record.schema());
    for field in schema.fields() {
        if field.kind().record_schema().is_none() {
            continue;
        }
        match record.get_mut(field.name()) {
            Some(Value::Record(nested)) => clear_output_only_fields(nested),
            Some(Value::List(items)) => items
                .iter_mut()
                .filter_map(Value::as_record_mut)
                .for_each(clear_output_only_fields),
            Some(Value::Map(entries)) => entries
                .values_mut()
                .filter_map(Value::as_record_mut)
                .for_each(clear_output_only_fields),
            Some(Value::Scalar(_)) | None => {}
        }
    }
}

/// Recursively copies OUTPUT_ONLY fields from `src` to `dst`.
///
/// Nested records are only descended into where both sides have them set;
/// no sub-records are allocated on `dst`. Map values are copied for keys
/// present on both sides.
///
/// Lists of records whose element type carries OUTPUT_ONLY fields are not
/// supported, since there is no way to match elements across two lists. Such
/// lists should be IMMUTABLE or OUTPUT_ONLY as a whole. The first one found
/// aborts the copy with [`FieldBehaviorError::UnsupportedListCopy`]; fields
/// copied before that point stay copied.
pub fn copy_output_only_fields(dst: &mut Record, src: &Record) -> FieldBehaviorResult<()> {
    if !dst.same_type(src) {
        return Err(FieldBehaviorError::TypeMismatch {
            expected: dst.schema().full_name().to_string(),
            actual: src.schema().full_name().to_string(),
        });
    }
    debug!(record_type = src.schema().full_name(), "copying output only fields");
    copy_output_only(dst, src, "")
}

fn copy_output_only(dst: &mut Record, src: &Record, path: &str) -> FieldBehaviorResult<()> {
    copy_fields(dst, src, Behavior::OutputOnly);

    for field in src.schema().fields() {
        let Some(src_value) = src.get(field.name()) else {
            continue;
        };
        let field_path = join_path(path, field.name());

        match (field.kind(), src_value) {
            (FieldKind::List(ElementKind::Record(_)), Value::List(items)) => {
                let first = items.first().and_then(Value::as_record);
                if first.is_some_and(|item| item.schema().has_behavior(Behavior::OutputOnly)) {
                    warn!(path = %field_path, "list elements carry output only fields; aborting copy");
                    return Err(FieldBehaviorError::UnsupportedListCopy { path: field_path });
                }
            }
            (FieldKind::Map(ElementKind::Record(_)), Value::Map(src_entries)) => {
                let Some(Value::Map(dst_entries)) = dst.get_mut(field.name()) else {
                    continue;
                };
                for (key, src_entry) in src_entries {
                    if let (Some(Value::Record(d)), Value::Record(s)) = (dst_entries.get_mut(key), src_entry) {
                        copy_output_only(d, s, &join_path(&field_path, &quote_segment(key)))?;
                    }
                }
            }
            (FieldKind::Record(_), Value::Record(src_nested)) => {
                let Some(Value::Record(dst_nested)) = dst.get_mut(field.name()) else {
                    continue;
                };
                copy_output_only(dst_nested, src_nested, &field_path)?;
            }
            _ => {}
        }
    }
    Ok(())
}
