use std::sync::Arc;

use recfield_model::{FieldKind, Record, Value};
use tracing::{debug, trace};

use crate::mask::FieldMask;
use crate::path::split_path;
use crate::validate::lookup_field;

/// Updates fields in `dst` with values from `src` according to `mask`.
///
/// - An empty mask merges every field populated on `src` into `dst`. Nested
///   records already present on `dst` are merged recursively; everything else
///   is replaced.
/// - The mask `{"*"}` replaces `dst` with a deep copy of `src`.
/// - Otherwise each path is applied in turn: the named field is copied from
///   `src`, or cleared on `dst` when `src` does not have it. Lists are
///   replaced as a whole; a path continuing past a list field is ignored.
///
/// Masks should be validated beforehand; unknown paths are ignored.
///
/// See <https://google.aip.dev/134> (Standard methods: Update).
///
/// # Panics
///
/// Panics if `dst` and `src` have different schema types.
pub fn update(mask: &FieldMask, dst: &mut Record, src: &Record) {
    assert!(
        dst.same_type(src),
        "dst ({}) and src ({}) records have different types",
        dst.schema().full_name(),
        src.schema().full_name(),
    );
    debug!(
        mask = %mask,
        record_type = src.schema().full_name(),
        "applying masked update"
    );

    if mask.is_empty() {
        update_wire_set_fields(dst, src);
    } else if mask.is_full_replacement() {
        dst.reset();
        update_wire_set_fields(dst, src);
    } else {
        for path in mask.paths() {
            let segments = split_path(path);
            update_named_field(dst, src, &segments);
        }
    }
}

fn update_wire_set_fields(dst: &mut Record, src: &Record) {
    for (field, value) in src.populated() {
        match (field.kind(), value) {
            (FieldKind::Record(_), Value::Record(nested)) if dst.has(field.name()) => {
                if let Some(target) = dst.record_mut_or_default(field.name()) {
                    update_wire_set_fields(target, nested);
                }
            }
            _ => dst.copy_field_from(src, field.name()),
        }
    }
}

fn update_named_field(dst: &mut Record, src: &Record, segments: &[String]) {
    let Some((name, rest)) = segments.split_first() else {
        return;
    };
    let Some(field) = lookup_field(src.schema(), name) else {
        debug!(field = %name, "no such field; skipping");
        return;
    };
    let name = field.name();

    if rest.is_empty() {
        dst.copy_field_from(src, name);
        return;
    }

    match field.kind() {
        FieldKind::List(_) => {
            trace!(field = %name, "list items are not addressable; ignoring rest of path");
        }
        FieldKind::Map(element) => {
            let Some((key, rest)) = rest.split_first() else {
                return;
            };
            if !rest.is_empty() && !element.is_record() {
                trace!(field = %name, key = %key, "scalar map values have no fields");
                return;
            }
            let src_entry = src
                .get(name)
                .and_then(Value::as_map)
                .and_then(|entries| entries.get(key));
            let Some(dst_entries) = dst.map_mut(name) else {
                return;
            };
            if src_entry.is_none() && !dst_entries.contains_key(key) {
                return;
            }

            let scratch;
            let src_entry = match src_entry {
                Some(entry) => entry,
                None => {
                    scratch = element.default_value();
                    &scratch
                }
            };
            let dst_entry = dst_entries
                .entry(key.clone())
                .or_insert_with(|| element.default_value());

            if rest.is_empty() {
                *dst_entry = src_entry.clone();
                return;
            }
            if let (Value::Record(dst_nested), Value::Record(src_nested)) = (dst_entry, src_entry) {
                update_named_field(dst_nested, src_nested, rest);
            }
        }
        FieldKind::Record(schema) => {
            let src_nested = src.get(name).and_then(Value::as_record);
            if src_nested.is_none() && !dst.has(name) {
                return;
            }

            let scratch;
            let src_nested = match src_nested {
                Some(nested) => nested,
                None => {
                    scratch = Record::new(Arc::clone(schema));
                    &scratch
                }
            };
            if let Some(dst_nested) = dst.record_mut_or_default(name) {
                update_named_field(dst_nested, src_nested, rest);
            }
        }
        FieldKind::Scalar(_) => {}
    }
}
