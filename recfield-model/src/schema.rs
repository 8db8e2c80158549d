use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::behavior::{Behavior, BehaviorSet};
use crate::error::{ModelError, ModelResult};
use crate::value::{Scalar, Value};
use crate::Record;

/// Describes a record type: its identity and its ordered fields.
///
/// Schemas are shared through `Arc`; nested record types are referenced by
/// `Arc` as well, so a schema graph is always finite and acyclic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    full_name: String,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Starts building a schema with the given fully-qualified type name
    /// (e.g., `"example.freight.v1.Shipment"`).
    pub fn builder(full_name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            full_name: full_name.into(),
            fields: Vec::new(),
        }
    }

    /// Parses a schema document and checks it for duplicate field names.
    pub fn from_json(json: &str) -> ModelResult<Arc<Self>> {
        let schema: Schema = serde_json::from_str(json)?;
        schema.check()?;
        Ok(Arc::new(schema))
    }

    /// The fully-qualified type name. Two records have the same type iff
    /// their schemas share this name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The short type name: the last dotted component of the full name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.full_name
            .rsplit_once('.')
            .map_or(self.full_name.as_str(), |(_, name)| name)
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a field by exact name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns true if this schema, or any record type nested in it, declares
    /// a field tagged with `behavior`.
    #[must_use]
    pub fn has_behavior(&self, behavior: Behavior) -> bool {
        self.fields.iter().any(|field| {
            field.has_behavior(behavior)
                || field
                    .kind
                    .record_schema()
                    .is_some_and(|nested| nested.has_behavior(behavior))
        })
    }

    fn check(&self) -> ModelResult<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ModelError::DuplicateField {
                    schema: self.full_name.clone(),
                    field: field.name.clone(),
                });
            }
            if let Some(nested) = field.kind.record_schema() {
                nested.check()?;
            }
        }
        Ok(())
    }
}

/// Incremental builder for [`Schema`].
#[derive(Debug)]
pub struct SchemaBuilder {
    full_name: String,
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Finishes the schema, rejecting duplicate field names.
    pub fn build(self) -> ModelResult<Arc<Schema>> {
        let schema = Schema {
            full_name: self.full_name,
            fields: self.fields,
        };
        schema.check()?;
        Ok(Arc::new(schema))
    }
}

/// A single field of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    name: String,
    kind: FieldKind,
    #[serde(default, skip_serializing_if = "BehaviorSet::is_empty")]
    behaviors: BehaviorSet,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            behaviors: BehaviorSet::empty(),
        }
    }

    /// Shorthand for a scalar field.
    pub fn scalar(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self::new(name, FieldKind::Scalar(scalar))
    }

    /// Shorthand for a singular nested record field.
    pub fn record(name: impl Into<String>, schema: &Arc<Schema>) -> Self {
        Self::new(name, FieldKind::Record(Arc::clone(schema)))
    }

    /// Shorthand for a list field.
    pub fn list(name: impl Into<String>, element: ElementKind) -> Self {
        Self::new(name, FieldKind::List(element))
    }

    /// Shorthand for a string-keyed map field.
    pub fn map(name: impl Into<String>, value: ElementKind) -> Self {
        Self::new(name, FieldKind::Map(value))
    }

    /// Adds a behavior tag.
    #[must_use]
    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behaviors.insert(behavior);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    #[must_use]
    pub fn behaviors(&self) -> BehaviorSet {
        self.behaviors
    }

    #[must_use]
    pub fn has_behavior(&self, behavior: Behavior) -> bool {
        self.behaviors.contains(behavior)
    }

    /// The zero value of this field: what reading an unset field yields.
    #[must_use]
    pub fn default_value(&self) -> Value {
        self.kind.default_value()
    }
}

/// The shape of a field's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Scalar(ScalarType),
    Record(Arc<Schema>),
    List(ElementKind),
    Map(ElementKind),
}

impl FieldKind {
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, FieldKind::List(_))
    }

    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self, FieldKind::Map(_))
    }

    /// The nested schema of a record field, or of the elements of a list or
    /// map of records.
    #[must_use]
    pub fn record_schema(&self) -> Option<&Arc<Schema>> {
        match self {
            FieldKind::Record(schema) => Some(schema),
            FieldKind::List(element) | FieldKind::Map(element) => element.record_schema(),
            FieldKind::Scalar(_) => None,
        }
    }

    #[must_use]
    pub fn default_value(&self) -> Value {
        match self {
            FieldKind::Scalar(scalar) => Value::Scalar(scalar.zero()),
            FieldKind::Record(schema) => Value::Record(Record::new(Arc::clone(schema))),
            FieldKind::List(_) => Value::List(Vec::new()),
            FieldKind::Map(_) => Value::Map(Default::default()),
        }
    }

    /// Returns true if `value` has the shape this kind declares, checking
    /// list elements and map values too.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldKind::Scalar(scalar), Value::Scalar(s)) => scalar.accepts(s),
            (FieldKind::Record(schema), Value::Record(r)) => {
                r.schema().full_name() == schema.full_name()
            }
            (FieldKind::List(element), Value::List(items)) => {
                items.iter().all(|item| element.accepts(item))
            }
            (FieldKind::Map(element), Value::Map(entries)) => {
                entries.values().all(|v| element.accepts(v))
            }
            _ => false,
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            FieldKind::Scalar(scalar) => format!("{scalar:?}"),
            FieldKind::Record(schema) => schema.full_name().to_string(),
            FieldKind::List(element) => format!("list of {}", element.describe()),
            FieldKind::Map(element) => format!("map of {}", element.describe()),
        }
    }
}

/// The kind of a list element or map value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Scalar(ScalarType),
    Record(Arc<Schema>),
}

impl ElementKind {
    #[must_use]
    pub fn is_record(&self) -> bool {
        matches!(self, ElementKind::Record(_))
    }

    #[must_use]
    pub fn record_schema(&self) -> Option<&Arc<Schema>> {
        match self {
            ElementKind::Record(schema) => Some(schema),
            ElementKind::Scalar(_) => None,
        }
    }

    /// The zero element, used when an entry must exist but has no value yet.
    #[must_use]
    pub fn default_value(&self) -> Value {
        match self {
            ElementKind::Scalar(scalar) => Value::Scalar(scalar.zero()),
            ElementKind::Record(schema) => Value::Record(Record::new(Arc::clone(schema))),
        }
    }

    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ElementKind::Scalar(scalar), Value::Scalar(s)) => scalar.accepts(s),
            (ElementKind::Record(schema), Value::Record(r)) => {
                r.schema().full_name() == schema.full_name()
            }
            _ => false,
        }
    }

    fn describe(&self) -> String {
        match self {
            ElementKind::Scalar(scalar) => format!("{scalar:?}"),
            ElementKind::Record(schema) => schema.full_name().to_string(),
        }
    }
}

/// The primitive type of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    Bool,
    Int,
    Uint,
    Float,
    String,
    Bytes,
    Enum,
}

impl ScalarType {
    #[must_use]
    pub fn zero(self) -> Scalar {
        match self {
            ScalarType::Bool => Scalar::Bool(false),
            ScalarType::Int => Scalar::Int(0),
            ScalarType::Uint => Scalar::Uint(0),
            ScalarType::Float => Scalar::Float(0.0),
            ScalarType::String => Scalar::String(String::new()),
            ScalarType::Bytes => Scalar::Bytes(Vec::new()),
            ScalarType::Enum => Scalar::Enum(0),
        }
    }

    #[must_use]
    pub fn accepts(self, scalar: &Scalar) -> bool {
        scalar.scalar_type() == self
    }
}
