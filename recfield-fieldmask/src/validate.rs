use recfield_model::{FieldDescriptor, FieldKind, Record, Schema, Value};
use tracing::debug;

use crate::error::{FieldMaskError, FieldMaskResult};
use crate::mask::FieldMask;
use crate::path::split_path;

/// Validates that every path in `mask` refers to a known field of `record`.
///
/// Map entries are validated against the record's data: a path through a
/// map key only passes if that key exists. The wildcard `*` is valid only as
/// the mask's sole path. An empty mask is valid.
pub fn validate(mask: &FieldMask, record: &Record) -> FieldMaskResult<()> {
    debug!(
        mask = %mask,
        record_type = record.schema().full_name(),
        "validating field mask"
    );

    if mask.has_wildcard() {
        if mask.len() != 1 {
            return Err(FieldMaskError::InvalidWildcard);
        }
        return Ok(());
    }

    for path in mask.paths() {
        let segments = split_path(path);
        if segments.is_empty() {
            return Err(FieldMaskError::PathNotFound { path: path.clone() });
        }
        validate_segments(record.schema(), Some(record), &segments, path)?;
    }
    Ok(())
}

// `record` is `None` while walking below an unset record field.
fn validate_segments(
    schema: &Schema,
    record: Option<&Record>,
    segments: &[String],
    path: &str,
) -> FieldMaskResult<()> {
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(());
    };
    let field = lookup_field(schema, segment).ok_or_else(|| FieldMaskError::PathNotFound {
        path: path.to_string(),
    })?;

    match field.kind() {
        FieldKind::Map(element) => {
            let Some((key, rest)) = rest.split_first() else {
                return Ok(());
            };
            let entry = record
                .and_then(|r| r.get(field.name()))
                .and_then(Value::as_map)
                .and_then(|entries| entries.get(key))
                .ok_or_else(|| FieldMaskError::MapKeyNotFound {
                    path: path.to_string(),
                    key: key.clone(),
                })?;
            match element.record_schema() {
                Some(nested) => validate_segments(nested, entry.as_record(), rest, path),
                None if rest.is_empty() => Ok(()),
                None => Err(FieldMaskError::ScalarHasNoFields {
                    path: path.to_string(),
                }),
            }
        }
        // https://aip.dev/161#wildcards: list items are not addressable
        FieldKind::List(_) if !rest.is_empty() => Err(FieldMaskError::ListAddressingUnsupported {
            path: path.to_string(),
        }),
        FieldKind::List(_) => Ok(()),
        FieldKind::Record(nested) => {
            let value = record
                .and_then(|r| r.get(field.name()))
                .and_then(Value::as_record);
            validate_segments(nested, value, rest, path)
        }
        FieldKind::Scalar(_) if !rest.is_empty() => Err(FieldMaskError::ScalarHasNoFields {
            path: path.to_string(),
        }),
        FieldKind::Scalar(_) => Ok(()),
    }
}

/// Resolves a segment to a field by exact name, falling back to a field
/// whose record type's short name matches case-insensitively. Older schemas
/// address some nested records by type name rather than field name.
pub(crate) fn lookup_field<'a>(schema: &'a Schema, segment: &str) -> Option<&'a FieldDescriptor> {
    schema.field(segment).or_else(|| {
        schema.fields().iter().find(|field| match field.kind() {
            FieldKind::Record(nested) => nested.name().eq_ignore_ascii_case(segment),
            _ => false,
        })
    })
}
