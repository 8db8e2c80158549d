//! JSON import/export for records.
//!
//! A record maps to a JSON object keyed by field name. Scalars map to JSON
//! scalars (bytes as standard base64, enums by number), nested records and
//! maps to objects, lists to arrays. `null` leaves a field unset.

use std::collections::BTreeMap;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Number};

use crate::error::{ModelError, ModelResult};
use crate::schema::{ElementKind, FieldKind, ScalarType, Schema};
use crate::value::{Scalar, Value};
use crate::Record;

impl Record {
    /// Builds a record of type `schema` from a JSON object.
    pub fn from_json(schema: &Arc<Schema>, json: &serde_json::Value) -> ModelResult<Self> {
        let object = json.as_object().ok_or_else(|| {
            ModelError::InvalidJson(format!("expected object for {}", schema.full_name()))
        })?;

        let mut record = Record::new(Arc::clone(schema));
        for (name, field_json) in object {
            let field = schema.field(name).ok_or_else(|| ModelError::UnknownField {
                schema: schema.full_name().to_string(),
                field: name.clone(),
            })?;
            if field_json.is_null() {
                continue;
            }
            let value = field_from_json(field.kind(), name, field_json)?;
            record.put(name, value);
        }
        Ok(record)
    }

    /// Parses a JSON document into a record of type `schema`.
    pub fn from_json_str(schema: &Arc<Schema>, json: &str) -> ModelResult<Self> {
        let json: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json(schema, &json)
    }

    /// Renders the populated fields as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let object: Map<String, serde_json::Value> = self
            .populated()
            .map(|(field, value)| (field.name().to_string(), value_to_json(value)))
            .collect();
        serde_json::Value::Object(object)
    }
}

pub(crate) fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Scalar(scalar) => scalar_to_json(scalar),
        Value::Record(record) => record.to_json(),
        Value::List(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        Value::Map(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
    }
}

fn scalar_to_json(scalar: &Scalar) -> serde_json::Value {
    match scalar {
        Scalar::Bool(b) => serde_json::Value::Bool(*b),
        Scalar::Int(i) => serde_json::Value::from(*i),
        Scalar::Uint(u) => serde_json::Value::from(*u),
        Scalar::Float(x) => Number::from_f64(*x).map_or(serde_json::Value::Null, serde_json::Value::Number),
        Scalar::String(s) => serde_json::Value::String(s.clone()),
        Scalar::Bytes(b) => serde_json::Value::String(STANDARD.encode(b)),
        Scalar::Enum(e) => serde_json::Value::from(*e),
    }
}

fn field_from_json(kind: &FieldKind, field: &str, json: &serde_json::Value) -> ModelResult<Value> {
    match kind {
        FieldKind::Scalar(scalar) => Ok(Value::Scalar(scalar_from_json(*scalar, field, json)?)),
        FieldKind::Record(schema) => Ok(Value::Record(Record::from_json(schema, json)?)),
        FieldKind::List(element) => {
            let items = json
                .as_array()
                .ok_or_else(|| mismatch(field, "array"))?
                .iter()
                .map(|item| element_from_json(element, field, item))
                .collect::<ModelResult<Vec<_>>>()?;
            Ok(Value::List(items))
        }
        FieldKind::Map(element) => {
            let entries = json
                .as_object()
                .ok_or_else(|| mismatch(field, "object"))?
                .iter()
                .map(|(key, v)| Ok((key.clone(), element_from_json(element, field, v)?)))
                .collect::<ModelResult<BTreeMap<_, _>>>()?;
            Ok(Value::Map(entries))
        }
    }
}

fn element_from_json(element: &ElementKind, field: &str, json: &serde_json::Value) -> ModelResult<Value> {
    match element {
        ElementKind::Scalar(scalar) => Ok(Value::Scalar(scalar_from_json(*scalar, field, json)?)),
        ElementKind::Record(schema) => Ok(Value::Record(Record::from_json(schema, json)?)),
    }
}

fn scalar_from_json(scalar: ScalarType, field: &str, json: &serde_json::Value) -> ModelResult<Scalar> {
    let parsed = match scalar {
        ScalarType::Bool => json.as_bool().map(Scalar::Bool),
        ScalarType::Int => json.as_i64().map(Scalar::Int),
        ScalarType::Uint => json.as_u64().map(Scalar::Uint),
        ScalarType::Float => json.as_f64().map(Scalar::Float),
        ScalarType::String => json.as_str().map(|s| Scalar::String(s.to_string())),
        ScalarType::Bytes => match json.as_str() {
            Some(encoded) => Some(Scalar::Bytes(STANDARD.decode(encoded)?)),
            None => None,
        },
        ScalarType::Enum => json
            .as_i64()
            .and_then(|e| i32::try_from(e).ok())
            .map(Scalar::Enum),
    };
    parsed.ok_or_else(|| mismatch(field, &format!("{scalar:?}")))
}

fn mismatch(field: &str, expected: &str) -> ModelError {
    ModelError::KindMismatch {
        field: field.to_string(),
        expected: expected.to_string(),
    }
}
