//! Table state: rows, headers and the primary-key index.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use pagedom::generate_id;

use super::{ActionColumn, Cell, Header, Row, TableConfig};
use crate::error::TableError;
use crate::record::{Record, SharedRecord};
use crate::validation::Rules;
use crate::value::{KeyValue, Value};
use crate::widgets::DebugLog;

pub(crate) struct TableInner {
    pub(super) id: String,
    pub(super) headers: Vec<Header>,
    pub(super) primary_key: Option<String>,
    pub(super) action_columns: Vec<ActionColumn>,
    pub(super) allow_input: bool,
    pub(super) debug_log: Option<DebugLog>,
    pub(super) validators: HashMap<String, Rules>,
    pub(super) rows: Vec<Row>,
    /// Primary-key value -> row position. Empty without a primary key.
    pub(super) index: RwLock<HashMap<KeyValue, usize>>,
}

/// A table of records.
///
/// Cheap to clone; clones share rows, cells and the log. Records are shared
/// with the caller: committed edits are visible through the
/// [`SharedRecord`] handles passed in.
///
/// # Example
///
/// ```
/// use pagewidgets::table::{Table, TableConfig};
/// use pagewidgets::{Record, Value};
///
/// let table = Table::new(
///     vec![
///         Record::new().with("id", 1).with("name", "Ann"),
///         Record::new().with("id", 2).with("name", "Bo"),
///     ],
///     TableConfig::new().primary_key("id"),
/// )
/// .unwrap();
///
/// assert_eq!(table.cell_value(2, "name").unwrap(), Value::from("Bo"));
/// ```
#[derive(Clone)]
pub struct Table {
    pub(crate) inner: Arc<TableInner>,
}

impl Table {
    /// Build a table from `records`.
    ///
    /// Headers default to the first record's fields. With a primary key,
    /// every record must carry the key field and keys must be unique.
    pub fn new<R>(records: impl IntoIterator<Item = R>, config: TableConfig) -> Result<Self, TableError>
    where
        R: Into<SharedRecord>,
    {
        let records: Vec<SharedRecord> = records.into_iter().map(Into::into).collect();
        let headers = derive_headers(&records, config.headers)?;
        let index = match &config.primary_key {
            Some(field) => build_index(&records, field)?,
            None => HashMap::new(),
        };

        let id = config.id.unwrap_or_else(|| generate_id("table"));
        let allow_input = config.allow_input;

        let inner = Arc::new_cyclic(|table| {
            let rows = records
                .into_iter()
                .enumerate()
                .map(|(i, record)| Row::new(table.clone(), &id, i, record, &headers, allow_input))
                .collect();
            TableInner {
                id,
                headers,
                primary_key: config.primary_key,
                action_columns: config.action_columns,
                allow_input,
                debug_log: config.debug_log,
                validators: config.validators,
                rows,
                index: RwLock::new(index),
            }
        });

        log::debug!(
            "Table {} built: {} rows, {} columns, primary key {:?}",
            inner.id,
            inner.rows.len(),
            inner.headers.len(),
            inner.primary_key
        );
        Ok(Self { inner })
    }

    /// Build a table from a JSON array of objects.
    pub fn from_json(json: serde_json::Value, config: TableConfig) -> Result<Self, TableError> {
        Self::new(Record::list_from_json(json)?, config)
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn headers(&self) -> &[Header] {
        &self.inner.headers
    }

    pub fn primary_key(&self) -> Option<&str> {
        self.inner.primary_key.as_deref()
    }

    pub fn action_columns(&self) -> &[ActionColumn] {
        &self.inner.action_columns
    }

    pub fn allow_input(&self) -> bool {
        self.inner.allow_input
    }

    pub fn debug_log(&self) -> Option<&DebugLog> {
        self.inner.debug_log.as_ref()
    }

    /// Column names in rendered order: action columns, then data fields.
    pub fn column_names(&self) -> Vec<String> {
        self.inner
            .action_columns
            .iter()
            .map(|c| c.name().to_string())
            .chain(self.inner.headers.iter().map(|h| h.field.clone()))
            .collect()
    }

    pub fn rows(&self) -> &[Row] {
        &self.inner.rows
    }

    pub fn row_at(&self, index: usize) -> Option<&Row> {
        self.inner.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.inner.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.rows.is_empty()
    }

    /// Snapshot of every record, in row order.
    pub fn records(&self) -> Vec<Record> {
        self.inner.rows.iter().map(Row::record).collect()
    }

    /// Look up a row by primary-key value.
    pub fn row(&self, key: impl Into<KeyValue>) -> Result<&Row, TableError> {
        if self.inner.primary_key.is_none() {
            return Err(TableError::NoPrimaryKey);
        }
        let key = key.into();
        let position = self
            .inner
            .index
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&key)
            .copied();
        position
            .and_then(|i| self.inner.rows.get(i))
            .ok_or(TableError::UnknownKey(key))
    }

    /// Look up a cell by primary-key value and field.
    pub fn cell(&self, key: impl Into<KeyValue>, field: &str) -> Result<&Cell, TableError> {
        let row = self.row(key)?;
        row.cell(field)
            .ok_or_else(|| TableError::UnknownField(field.to_string()))
    }

    /// The value currently displayed by a cell.
    pub fn cell_value(&self, key: impl Into<KeyValue>, field: &str) -> Result<Value, TableError> {
        Ok(self.cell(key, field)?.value())
    }

    /// Replace the value a cell displays, leaving its record untouched.
    pub fn update_cell(
        &self,
        key: impl Into<KeyValue>,
        field: &str,
        value: impl Into<Value>,
    ) -> Result<(), TableError> {
        self.cell(key, field)?.set_display_only(value);
        Ok(())
    }

    /// Write a value through a cell into its record, as a user edit would.
    pub fn commit_cell(
        &self,
        key: impl Into<KeyValue>,
        field: &str,
        value: impl Into<Value>,
    ) -> Result<(), TableError> {
        self.cell(key, field)?.set_and_commit(value)
    }

    pub(super) fn validators(&self, field: &str) -> Option<&Rules> {
        self.inner.validators.get(field)
    }

    /// Move a row's index entry after its key field changed.
    ///
    /// Fails without touching the index if `new` belongs to another row.
    pub(super) fn reindex(&self, position: usize, old: &Value, new: &Value) -> Result<(), TableError> {
        let (old, new) = (KeyValue::from(old), KeyValue::from(new));
        if old == new {
            return Ok(());
        }
        let mut index = self
            .inner
            .index
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if index.get(&new).is_some_and(|&i| i != position) {
            return Err(TableError::DuplicateKey {
                field: self.inner.primary_key.clone().unwrap_or_default(),
                key: new,
            });
        }
        index.remove(&old);
        index.insert(new, position);
        Ok(())
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("id", &self.inner.id)
            .field("rows", &self.inner.rows.len())
            .field("headers", &self.inner.headers)
            .field("primary_key", &self.inner.primary_key)
            .finish()
    }
}

fn derive_headers(records: &[SharedRecord], headers: Vec<Header>) -> Result<Vec<Header>, TableError> {
    if !headers.is_empty() {
        return Ok(headers);
    }
    let Some(first) = records.first() else {
        return Ok(Vec::new());
    };
    let derived: Vec<Header> = first.read(|r| r.field_names().map(Header::new).collect());
    if derived.is_empty() {
        return Err(TableError::Config(
            "first record has no fields and no headers were given".into(),
        ));
    }
    Ok(derived)
}

fn build_index(records: &[SharedRecord], field: &str) -> Result<HashMap<KeyValue, usize>, TableError> {
    let mut index = HashMap::with_capacity(records.len());
    for (row, record) in records.iter().enumerate() {
        let key = record
            .read(|r| r.get(field).map(KeyValue::from))
            .ok_or_else(|| TableError::MissingField {
                field: field.to_string(),
                row,
            })?;
        if index.contains_key(&key) {
            return Err(TableError::DuplicateKey {
                field: field.to_string(),
                key,
            });
        }
        index.insert(key, row);
    }
    Ok(index)
}
