use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{ModelError, ModelResult};
use crate::schema::{FieldDescriptor, FieldKind, Schema};
use crate::value::Value;

/// A schema-described structured value.
///
/// Only populated fields are stored. A scalar field is populated once it has
/// been set, even to its zero value; a record field once it holds a record;
/// a list or map field while it is non-empty. Reading an unpopulated field
/// through [`Record::get_or_default`] yields the field's zero value.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<Schema>,
    values: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record of the given type.
    #[must_use]
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns true if both records are instances of the same schema type.
    #[must_use]
    pub fn same_type(&self, other: &Record) -> bool {
        self.schema.full_name() == other.schema.full_name()
    }

    /// Looks up a field descriptor of this record's schema.
    #[must_use]
    pub fn descriptor(&self, field: &str) -> Option<&FieldDescriptor> {
        self.schema.field(field)
    }

    /// Returns true if the field is populated.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Returns the value of a populated field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field).filter(|v| v.is_populated())
    }

    /// Returns the field's value, or its zero value when unpopulated.
    #[must_use]
    pub fn get_or_default(&self, field: &FieldDescriptor) -> Cow<'_, Value> {
        match self.get(field.name()) {
            Some(value) => Cow::Borrowed(value),
            None => Cow::Owned(field.default_value()),
        }
    }

    /// Mutable access to a populated field.
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.values.get_mut(field).filter(|v| v.is_populated())
    }

    /// Sets a field, checking the value against the field's kind.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> ModelResult<()> {
        let value = value.into();
        let descriptor = self
            .schema
            .field(field)
            .ok_or_else(|| ModelError::UnknownField {
                schema: self.schema.full_name().to_string(),
                field: field.to_string(),
            })?;
        if !descriptor.kind().accepts(&value) {
            return Err(ModelError::KindMismatch {
                field: field.to_string(),
                expected: descriptor.kind().describe(),
            });
        }
        self.put(field, value);
        Ok(())
    }

    /// Builder-style [`Record::set`].
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> ModelResult<Self> {
        self.set(field, value)?;
        Ok(self)
    }

    /// Stores a value the caller already knows to fit the field.
    pub(crate) fn put(&mut self, field: &str, value: Value) {
        self.values.insert(field.to_string(), value);
    }

    /// Makes `field` on `self` match `field` on `src`: a copy of the value
    /// when `src` has it populated, unset otherwise.
    ///
    /// # Panics
    ///
    /// Panics if the records have different schema types.
    pub fn copy_field_from(&mut self, src: &Record, field: &str) {
        assert!(
            self.same_type(src),
            "cannot copy field {field:?} from {} into {}",
            src.schema.full_name(),
            self.schema.full_name(),
        );
        match src.get(field) {
            Some(value) => self.put(field, value.clone()),
            None => self.clear(field),
        }
    }

    pub fn clear(&mut self, field: &str) {
        self.values.remove(field);
    }

    /// Clears every field.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Iterates populated fields in schema order.
    pub fn populated(&self) -> impl Iterator<Item = (&FieldDescriptor, &Value)> {
        self.schema
            .fields()
            .iter()
            .filter_map(|field| self.get(field.name()).map(|value| (field, value)))
    }

    /// Mutable access to a singular record field, allocating an empty
    /// sub-record first if the field is unset. Returns `None` for fields that
    /// are not singular records.
    pub fn record_mut_or_default(&mut self, field: &str) -> Option<&mut Record> {
        let FieldKind::Record(schema) = self.schema.field(field)?.kind() else {
            return None;
        };
        let schema = Arc::clone(schema);
        self.values
            .entry(field.to_string())
            .or_insert_with(|| Value::Record(Record::new(schema)))
            .as_record_mut()
    }

    /// Mutable access to a map field's entries, allocating an empty map first
    /// if the field is unset. Returns `None` for fields that are not maps.
    pub fn map_mut(&mut self, field: &str) -> Option<&mut BTreeMap<String, Value>> {
        if !self.schema.field(field)?.kind().is_map() {
            return None;
        }
        match self
            .values
            .entry(field.to_string())
            .or_insert_with(|| Value::Map(BTreeMap::new()))
        {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.same_type(other)
            && self
                .schema
                .fields()
                .iter()
                .all(|field| self.get(field.name()) == other.get(field.name()))
    }
}
