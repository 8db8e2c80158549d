use recfield_model::{FieldDescriptor, FieldKind, Record, Schema, Value};
use tracing::debug;

use crate::error::{FieldMaskError, FieldMaskResult};
use crate::mask::{FieldMask, WILDCARD_PATH};
use crate::path::split_path;
use crate::validate::lookup_field;

/// A field resolved from a mask path: its descriptor and its value (the
/// field's zero value when unset).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue<'a> {
    pub descriptor: &'a FieldDescriptor,
    pub value: Value,
}

/// Retrieves the fields of `record` named by `mask`, in mask order.
///
/// Masks should be validated beforehand; any path that cannot be resolved
/// fails the whole call.
pub fn get<'a>(mask: &FieldMask, record: &'a Record) -> FieldMaskResult<Vec<FieldValue<'a>>> {
    debug!(
        mask = %mask,
        record_type = record.schema().full_name(),
        "reading fields"
    );

    mask.paths()
        .iter()
        .map(|path| {
            if path == WILDCARD_PATH {
                return Err(FieldMaskError::InvalidWildcard);
            }
            let segments = split_path(path);
            get_named_field(record.schema(), Some(record), &segments, path)
        })
        .collect()
}

fn get_named_field<'a>(
    schema: &'a Schema,
    record: Option<&'a Record>,
    segments: &[String],
    path: &str,
) -> FieldMaskResult<FieldValue<'a>> {
    let not_found = || FieldMaskError::PathNotFound {
        path: path.to_string(),
    };
    let (segment, rest) = segments.split_first().ok_or_else(not_found)?;
    let field = lookup_field(schema, segment).ok_or_else(not_found)?;

    if rest.is_empty() {
        let value = match record {
            Some(r) => r.get_or_default(field).into_owned(),
            None => field.default_value(),
        };
        return Ok(FieldValue {
            descriptor: field,
            value,
        });
    }

    match field.kind() {
        FieldKind::List(_) => Err(FieldMaskError::ListAddressingUnsupported {
            path: path.to_string(),
        }),
        FieldKind::Map(element) => {
            let (key, rest) = rest.split_first().ok_or_else(not_found)?;
            let entry = record
                .and_then(|r| r.get(field.name()))
                .and_then(Value::as_map)
                .and_then(|entries| entries.get(key))
                .ok_or_else(|| FieldMaskError::MapKeyNotFound {
                    path: path.to_string(),
                    key: key.clone(),
                })?;
            // A map entry itself is not a field; the path must name one inside it.
            match element.record_schema() {
                Some(nested) => get_named_field(nested, entry.as_record(), rest, path),
                None if rest.is_empty() => Err(not_found()),
                None => Err(FieldMaskError::ScalarHasNoFields {
                    path: path.to_string(),
                }),
            }
        }
        FieldKind::Record(nested) => {
            let value = record
                .and_then(|r| r.get(field.name()))
                .and_then(Value::as_record);
            get_named_field(nested, value, rest, path)
        }
        FieldKind::Scalar(_) => Err(FieldMaskError::ScalarHasNoFields {
            path: path.to_string(),
        }),
    }
}
