//! Widgets for server-rendered pages.
//!
//! The centerpiece is [`Table`]: rows of shared [`Record`]s rendered as
//! editable cells, with caller-defined action columns and an attached
//! [`DebugLog`]. Widgets render into a [`pagedom`] element tree and bind
//! their event handlers while doing so.

pub mod auth;
pub mod error;
pub mod prelude;
pub mod record;
pub mod state;
pub mod table;
pub mod validation;
pub mod value;
pub mod widgets;

pub use error::{AuthError, FieldValidationError, HandlerError, TableError};
pub use record::{Record, SharedRecord};
pub use state::State;
pub use table::{ActionColumn, ActionContext, Cell, Header, InputLock, Row, RowAction, Table, TableConfig};
pub use validation::Rules;
pub use value::{KeyValue, Value};
pub use widgets::DebugLog;
