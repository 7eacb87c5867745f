//! Named-field records shown by a table

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::TableError;
use crate::state::State;
use crate::value::Value;

/// An ordered mapping from field name to [`Value`].
///
/// Field order is insertion order; a table without explicit headers takes its
/// column order from the first record.
///
/// # Example
///
/// ```
/// use pagewidgets::Record;
///
/// let record = Record::new().with("id", 1).with("name", "Ann");
/// assert_eq!(record.field_names().collect::<Vec<_>>(), vec!["id", "name"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

/// A record shared between the caller and a table.
///
/// Cell edits write through this handle, so the caller observes them.
pub type SharedRecord = State<Record>;

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Sets a field, returning the previous value (`Value::Null` if absent).
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Value {
        self.fields
            .insert(field.into(), value.into())
            .unwrap_or_default()
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields, in order.
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    /// Field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Wrap this record in a shared handle.
    pub fn shared(self) -> SharedRecord {
        State::new(self)
    }

    /// Build a record from a JSON object, preserving key order.
    pub fn from_json(json: serde_json::Value) -> Result<Self, TableError> {
        match json {
            serde_json::Value::Object(map) => Ok(Self {
                fields: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            }),
            other => Err(TableError::Config(format!(
                "record must be a JSON object, got {other}"
            ))),
        }
    }

    /// Build records from a JSON array of objects.
    pub fn list_from_json(json: serde_json::Value) -> Result<Vec<Self>, TableError> {
        match json {
            serde_json::Value::Array(items) => items.into_iter().map(Self::from_json).collect(),
            other => Err(TableError::Config(format!(
                "records must be a JSON array, got {other}"
            ))),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
