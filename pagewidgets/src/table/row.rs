//! Rows: one record, its cells, and the per-row input lock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use indexmap::IndexMap;

use super::state::TableInner;
use super::{Cell, Header, Table};
use crate::error::TableError;
use crate::record::{Record, SharedRecord};
use crate::value::{KeyValue, Value};
use crate::widgets::DebugLog;

pub(crate) struct RowInner {
    index: usize,
    id: String,
    table: Weak<TableInner>,
    record: SharedRecord,
    cells: IndexMap<String, Cell>,
    /// Number of live [`InputLock`]s.
    locks: AtomicUsize,
}

/// One table row.
///
/// Cheap to clone. A row keeps a weak reference to its table; the table's
/// log and validators are reached through it.
#[derive(Clone)]
pub struct Row {
    pub(crate) inner: Arc<RowInner>,
}

impl Row {
    pub(super) fn new(
        table: Weak<TableInner>,
        table_id: &str,
        index: usize,
        record: SharedRecord,
        headers: &[Header],
        allow_input: bool,
    ) -> Self {
        let id = format!("{table_id}-r{index}");
        let inner = Arc::new_cyclic(|row: &Weak<RowInner>| {
            let cells = record.read(|r| {
                headers
                    .iter()
                    .map(|header| {
                        let value = r.get(&header.field).cloned().unwrap_or_default();
                        let editable = allow_input
                            && !header.read_only
                            && !matches!(value, Value::Markup(_));
                        let cell = Cell::new(
                            row.clone(),
                            format!("{id}-{}", header.field),
                            header.field.clone(),
                            value,
                            editable,
                        );
                        (header.field.clone(), cell)
                    })
                    .collect()
            });
            RowInner {
                index,
                id,
                table,
                record,
                cells,
                locks: AtomicUsize::new(0),
            }
        });
        Self { inner }
    }

    /// Position of this row in its table.
    pub fn index(&self) -> usize {
        self.inner.index
    }

    /// Element id of the rendered `tr`.
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Snapshot of the record.
    pub fn record(&self) -> Record {
        self.inner.record.get()
    }

    /// The shared record handle backing this row.
    pub fn shared_record(&self) -> &SharedRecord {
        &self.inner.record
    }

    /// Current record value of a field.
    pub fn get(&self, field: &str) -> Option<Value> {
        self.inner.record.read(|r| r.get(field).cloned())
    }

    /// Primary-key value of this row, if the table has a primary key.
    pub fn key(&self) -> Option<KeyValue> {
        let table = self.table().ok()?;
        let field = table.primary_key()?;
        self.get(field).map(KeyValue::from)
    }

    pub fn cell(&self, field: &str) -> Option<&Cell> {
        self.inner.cells.get(field)
    }

    /// Cells in header order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.inner.cells.values()
    }

    /// The table this row belongs to.
    pub fn table(&self) -> Result<Table, TableError> {
        self.inner
            .table
            .upgrade()
            .map(|inner| Table { inner })
            .ok_or(TableError::Detached)
    }

    /// The table's log, if the table is alive and has one.
    pub fn debug_log(&self) -> Option<DebugLog> {
        self.table().ok()?.debug_log().cloned()
    }

    /// Whether the record was edited since the table was built.
    pub fn is_modified(&self) -> bool {
        self.inner.record.is_dirty()
    }

    /// Set `record[field]`, returning the previous value.
    ///
    /// Changing the primary-key field moves the row's index entry; a value
    /// already used by another row is refused with
    /// [`TableError::DuplicateKey`] and the record is left unchanged.
    pub fn update_record(&self, field: &str, value: impl Into<Value>) -> Result<Value, TableError> {
        let value = value.into();
        let table = self.table()?;
        if table.primary_key() == Some(field) {
            let old = self.get(field).unwrap_or_default();
            table.reindex(self.index(), &old, &value)?;
        }
        let previous = self.inner.record.update(|r| r.insert(field, value));
        log::debug!("Row {} record field '{}' updated", self.inner.id, field);
        Ok(previous)
    }

    /// Enable or disable every editable cell. Static cells are unaffected.
    pub fn set_input_enabled(&self, enabled: bool) {
        for cell in self.cells().filter(|c| c.is_editable()) {
            cell.set_disabled(!enabled);
        }
    }

    /// Whether every editable cell currently accepts input.
    pub fn is_input_enabled(&self) -> bool {
        self.cells()
            .filter(|c| c.is_editable())
            .all(|c| !c.is_disabled())
    }

    /// Disable the row's inputs until the returned guard is dropped.
    ///
    /// Locks nest: inputs come back when the last guard goes away.
    ///
    /// # Example
    ///
    /// ```
    /// use pagewidgets::table::{Table, TableConfig};
    /// use pagewidgets::Record;
    ///
    /// let table = Table::new(vec![Record::new().with("name", "Ann")], TableConfig::new()).unwrap();
    /// let row = &table.rows()[0];
    /// {
    ///     let _lock = row.lock_inputs();
    ///     assert!(!row.is_input_enabled());
    /// }
    /// assert!(row.is_input_enabled());
    /// ```
    pub fn lock_inputs(&self) -> InputLock {
        if self.inner.locks.fetch_add(1, Ordering::SeqCst) == 0 {
            log::debug!("Row {} inputs locked", self.inner.id);
            self.set_input_enabled(false);
        }
        InputLock { row: self.clone() }
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Row")
            .field("id", &self.inner.id)
            .field("record", &self.record())
            .finish()
    }
}

/// Scoped input lock returned by [`Row::lock_inputs`].
///
/// Inputs are re-enabled on drop, so a handler that fails or is cancelled
/// while holding the lock still releases it.
#[must_use = "inputs are re-enabled as soon as the lock is dropped"]
pub struct InputLock {
    row: Row,
}

impl InputLock {
    pub fn row(&self) -> &Row {
        &self.row
    }
}

impl Drop for InputLock {
    fn drop(&mut self) {
        if self.row.inner.locks.fetch_sub(1, Ordering::SeqCst) == 1 {
            log::debug!("Row {} inputs unlocked", self.row.inner.id);
            self.row.set_input_enabled(true);
        }
    }
}

impl std::fmt::Debug for InputLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputLock")
            .field("row", &self.row.inner.id)
            .finish()
    }
}
