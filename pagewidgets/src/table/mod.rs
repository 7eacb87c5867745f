//! Editable tables of records.
//!
//! A [`Table`] owns [`Row`]s, each row owns one [`Cell`] per header field.
//! Rows and cells reach back to their table through weak references, so a
//! cell commit can update its record and append to the table's
//! [`DebugLog`](crate::widgets::DebugLog) without walking the element tree.
//!
//! Action columns render as leading buttons in every row. Their handlers
//! receive an [`ActionContext`] and may lock the row's inputs while they
//! are suspended:
//!
//! ```
//! use std::time::Duration;
//!
//! use pagewidgets::table::ActionColumn;
//!
//! let slow = ActionColumn::from_fn("Echo twice", |cx| async move {
//!     let _lock = cx.row.lock_inputs();
//!     cx.append(format!("{:?}", cx.row.record()));
//!     cx.page.update();
//!     tokio::time::sleep(Duration::from_millis(10)).await;
//!     cx.append(format!("{:?}", cx.row.record()));
//!     Ok(())
//! });
//! # let _ = slow;
//! ```

mod action;
mod cell;
mod config;
mod render;
mod row;
mod state;

pub use action::{ActionColumn, ActionContext, RowAction};
pub use cell::Cell;
pub use config::{Header, TableConfig};
pub use row::{InputLock, Row};
pub use state::Table;
