//! Cells: one field of one row, displayed statically or as an input.

use std::sync::{Arc, Weak};

use log::{debug, warn};

use super::row::RowInner;
use super::{Row, Table};
use crate::error::TableError;
use crate::state::State;
use crate::value::Value;

#[derive(Debug, Clone, Default)]
struct CellState {
    /// What the cell shows. May differ from the record after
    /// [`Cell::set_display_only`].
    value: Value,
    disabled: bool,
    /// Message of the last rejected commit.
    invalid: Option<String>,
}

struct CellInner {
    id: String,
    field: String,
    editable: bool,
    row: Weak<RowInner>,
    state: State<CellState>,
}

/// A single cell bound to one record field.
#[derive(Clone)]
pub struct Cell {
    inner: Arc<CellInner>,
}

impl Cell {
    pub(super) fn new(
        row: Weak<RowInner>,
        id: String,
        field: String,
        value: Value,
        editable: bool,
    ) -> Self {
        Self {
            inner: Arc::new(CellInner {
                id,
                field,
                editable,
                row,
                state: State::new(CellState {
                    value,
                    ..Default::default()
                }),
            }),
        }
    }

    /// Element id of the cell's control.
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn field(&self) -> &str {
        &self.inner.field
    }

    /// Whether the cell renders as an input.
    pub fn is_editable(&self) -> bool {
        self.inner.editable
    }

    pub fn is_disabled(&self) -> bool {
        self.inner.state.read(|s| s.disabled)
    }

    pub(super) fn set_disabled(&self, disabled: bool) {
        self.inner.state.update(|s| s.disabled = disabled);
    }

    /// Message of the last rejected commit, cleared by the next accepted one.
    pub fn invalid_message(&self) -> Option<String> {
        self.inner.state.read(|s| s.invalid.clone())
    }

    pub fn is_invalid(&self) -> bool {
        self.inner.state.read(|s| s.invalid.is_some())
    }

    /// The value last shown: set with [`set_display_only`](Self::set_display_only)
    /// or committed. Does not re-read the record.
    pub fn value(&self) -> Value {
        self.inner.state.read(|s| s.value.clone())
    }

    /// The row this cell belongs to.
    pub fn row(&self) -> Result<Row, TableError> {
        self.inner
            .row
            .upgrade()
            .map(|inner| Row { inner })
            .ok_or(TableError::Detached)
    }

    /// Replace the displayed value without touching the record.
    ///
    /// For program-driven replacement, e.g. swapping an identifier for a
    /// link once it has been looked up.
    pub fn set_display_only(&self, value: impl Into<Value>) {
        let value = value.into();
        self.inner.state.update(|s| {
            s.value = value;
            s.invalid = None;
        });
    }

    /// Write `value` into the record and display it, as a user edit would.
    pub fn set_and_commit(&self, value: impl Into<Value>) -> Result<(), TableError> {
        let value = value.into();
        let row = self.row()?;
        let table = row.table()?;
        self.ensure_enabled()?;
        self.check(&table, &value.input_text())?;
        self.apply(&row, &table, value)
    }

    /// Commit text entered in the cell's input.
    ///
    /// The text is validated against the field's rules, then converted to
    /// the type of the current record value where possible. A rejected
    /// commit leaves the record unchanged and marks the cell invalid.
    /// Commits to a disabled cell fail with [`TableError::Disabled`].
    pub fn commit(&self, text: &str) -> Result<(), TableError> {
        let row = self.row()?;
        let table = row.table()?;
        self.ensure_enabled()?;
        self.check(&table, text)?;
        let current = row.get(&self.inner.field).unwrap_or_default();
        self.apply(&row, &table, current.parse_like(text))
    }

    fn ensure_enabled(&self) -> Result<(), TableError> {
        if self.is_disabled() {
            warn!("Refused edit of {} while its row is locked", self.inner.id);
            return Err(TableError::Disabled(self.inner.id.clone()));
        }
        Ok(())
    }

    fn check(&self, table: &Table, text: &str) -> Result<(), TableError> {
        let field = &self.inner.field;
        let Some(rules) = table.validators(field) else {
            return Ok(());
        };
        if let Err(err) = rules.validate(field, text) {
            warn!("Rejected {} value '{}': {}", field, text, err.message);
            self.inner
                .state
                .update(|s| s.invalid = Some(err.message.clone()));
            if let Some(log) = table.debug_log() {
                log.log(format!("Rejected {field} value '{text}'"));
            }
            return Err(TableError::Validation(err));
        }
        Ok(())
    }

    fn apply(&self, row: &Row, table: &Table, value: Value) -> Result<(), TableError> {
        let field = &self.inner.field;
        let old = row.update_record(field, value.clone())?;
        debug!("Cell {} committed: '{}' -> '{}'", self.inner.id, old, value);
        if let Some(log) = table.debug_log() {
            log.log(format!("Changed {field} from '{old}' to '{value}'"));
        }
        self.inner.state.update(|s| {
            s.value = value;
            s.invalid = None;
        });
        Ok(())
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("id", &self.inner.id)
            .field("field", &self.inner.field)
            .field("editable", &self.inner.editable)
            .field("value", &self.value())
            .finish()
    }
}
