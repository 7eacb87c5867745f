//! Prelude module for convenient imports.
//!
//! ```
//! use pagewidgets::prelude::*;
//! ```

// Table
pub use crate::table::{
    ActionColumn, ActionContext, Cell, Header, InputLock, Row, RowAction, Table, TableConfig,
};

// Data
pub use crate::record::{Record, SharedRecord};
pub use crate::state::State;
pub use crate::validation::Rules;
pub use crate::value::{KeyValue, Value};

// Errors
pub use crate::error::{AuthError, HandlerError, TableError};

// Widgets
pub use crate::auth::{LoginForm, LogoutForm, SimpleAuthApi};
pub use crate::widgets::{
    Alert, AlertDialog, AlertKind, Button, Collapsible, DebugLog, HideShow, PasswordDialog,
    ProgressBar, Spinner, Switch,
};

// Re-export the element tree types widgets build on
pub use pagedom::{handler, Component, Element, Event, EventKind, HandlerRegistry, Page};
