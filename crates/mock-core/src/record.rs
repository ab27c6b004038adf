//! Generated record representation.

use crate::values::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single generated record: a string `id` plus attribute values.
///
/// Fields keep the declaration order of the factory that produced them, so
/// serialized records are stable and diff-friendly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Record identifier (the stringified numeric identity)
    pub id: String,

    /// Attribute values (attribute name -> value)
    #[serde(flatten)]
    pub fields: IndexMap<String, Value>,
}

impl Record {
    /// Create a new record.
    pub fn new(id: impl Into<String>, fields: IndexMap<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Create a new record with a builder pattern.
    pub fn builder(id: impl Into<String>) -> RecordBuilder {
        RecordBuilder {
            id: id.into(),
            fields: IndexMap::new(),
        }
    }

    /// Get a field value by name.
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Assign a field value, returning the previous one.
    ///
    /// Existing fields keep their position; new fields are appended.
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(name.into(), value)
    }

    /// Get the number of fields (excluding the id).
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Render the record as a JSON object with `id` first.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::with_capacity(self.fields.len() + 1);
        map.insert("id".to_string(), serde_json::Value::String(self.id.clone()));
        for (name, value) in &self.fields {
            map.insert(name.clone(), value.to_json());
        }
        serde_json::Value::Object(map)
    }
}

/// Builder for `Record`.
pub struct RecordBuilder {
    id: String,
    fields: IndexMap<String, Value>,
}

impl RecordBuilder {
    /// Add a field to the record.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Build the record.
    pub fn build(self) -> Record {
        Record {
            id: self.id,
            fields: self.fields,
        }
    }
}
