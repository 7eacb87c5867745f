//! Table construction options.

use std::collections::HashMap;

use super::ActionColumn;
use crate::validation::Rules;
use crate::widgets::DebugLog;

/// A data column: the record field it shows and its header label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub field: String,
    pub label: String,
    /// Read-only columns render static cells even when input is allowed.
    pub read_only: bool,
}

impl Header {
    /// A header labelled with its field name.
    pub fn new(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            label: field.clone(),
            field,
            read_only: false,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

impl From<&str> for Header {
    fn from(field: &str) -> Self {
        Header::new(field)
    }
}

impl From<(&str, &str)> for Header {
    fn from((field, label): (&str, &str)) -> Self {
        Header::new(field).label(label)
    }
}

/// Options for [`Table::new`](super::Table::new).
///
/// # Example
///
/// ```
/// use pagewidgets::table::TableConfig;
/// use pagewidgets::DebugLog;
///
/// let config = TableConfig::new()
///     .primary_key("id")
///     .header(("name", "Name"))
///     .debug_log(DebugLog::new());
/// assert_eq!(config.primary_key.as_deref(), Some("id"));
/// ```
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Explicit columns. Empty means "take the first record's fields".
    pub headers: Vec<Header>,
    pub primary_key: Option<String>,
    pub action_columns: Vec<ActionColumn>,
    /// Whether data cells render as inputs.
    pub allow_input: bool,
    pub debug_log: Option<DebugLog>,
    /// Per-field rules run on commit.
    pub validators: HashMap<String, Rules>,
    /// Element id of the table. Generated when absent.
    pub id: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            primary_key: None,
            action_columns: Vec::new(),
            allow_input: true,
            debug_log: None,
            validators: HashMap::new(),
            id: None,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the column list.
    pub fn headers<H: Into<Header>>(mut self, headers: impl IntoIterator<Item = H>) -> Self {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Append a column.
    pub fn header(mut self, header: impl Into<Header>) -> Self {
        self.headers.push(header.into());
        self
    }

    pub fn primary_key(mut self, field: impl Into<String>) -> Self {
        self.primary_key = Some(field.into());
        self
    }

    /// Append an action column. Action columns render before data columns,
    /// in the order they were added.
    pub fn action_column(mut self, column: ActionColumn) -> Self {
        self.action_columns.push(column);
        self
    }

    pub fn allow_input(mut self, allow: bool) -> Self {
        self.allow_input = allow;
        self
    }

    pub fn debug_log(mut self, log: DebugLog) -> Self {
        self.debug_log = Some(log);
        self
    }

    /// Attach validation rules to a field.
    pub fn validator(mut self, field: impl Into<String>, rules: Rules) -> Self {
        self.validators.insert(field.into(), rules);
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
