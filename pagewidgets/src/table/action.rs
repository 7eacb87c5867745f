//! Action columns: named per-row controls bound to caller-supplied async handlers.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use pagedom::{Event, HandlerError, Page};

use super::Row;
use crate::widgets::DebugLog;

/// What an action handler receives when its row control is activated.
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// The row whose control was activated.
    pub row: Row,
    /// The table's log, if one is attached.
    pub debug_log: Option<DebugLog>,
    /// The originating click.
    pub event: Event,
    /// The page the click arrived on. Call [`Page::update`] to flush
    /// intermediate state while the handler is suspended.
    pub page: Page,
}

impl ActionContext {
    /// Append a message to the table's log, if any.
    pub fn append(&self, message: impl Into<String>) {
        if let Some(log) = &self.debug_log {
            log.append(message);
        }
    }

    /// Append a timestamped message to the table's log, if any.
    pub fn log(&self, message: impl AsRef<str>) {
        if let Some(log) = &self.debug_log {
            log.log(message);
        }
    }
}

/// An asynchronous per-row action.
///
/// Errors are not caught by the table; they propagate out of
/// [`Page::dispatch`].
#[async_trait]
pub trait RowAction: Send + Sync {
    async fn run(&self, cx: ActionContext) -> Result<(), HandlerError>;
}

struct FnAction<F>(F);

#[async_trait]
impl<F, Fut> RowAction for FnAction<F>
where
    F: Fn(ActionContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    async fn run(&self, cx: ActionContext) -> Result<(), HandlerError> {
        (self.0)(cx).await
    }
}

/// A named column contributing one button per row.
#[derive(Clone)]
pub struct ActionColumn {
    name: String,
    action: Arc<dyn RowAction>,
}

impl ActionColumn {
    pub fn new(name: impl Into<String>, action: impl RowAction + 'static) -> Self {
        Self {
            name: name.into(),
            action: Arc::new(action),
        }
    }

    /// Build an action column from an async closure.
    ///
    /// # Example
    ///
    /// ```
    /// use pagewidgets::table::ActionColumn;
    ///
    /// let echo = ActionColumn::from_fn("Echo", |cx| async move {
    ///     let line = format!("{:?}", cx.row.record());
    ///     cx.append(line);
    ///     Ok(())
    /// });
    /// assert_eq!(echo.name(), "Echo");
    /// ```
    pub fn from_fn<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(ActionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        Self::new(name, FnAction(f))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the action for `row`.
    pub async fn activate(&self, row: Row, event: Event, page: Page) -> Result<(), HandlerError> {
        log::debug!("Action '{}' activated on row {}", self.name, row.index());
        let cx = ActionContext {
            debug_log: row.debug_log(),
            row,
            event,
            page,
        };
        self.action.run(cx).await
    }
}

impl std::fmt::Debug for ActionColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionColumn")
            .field("name", &self.name)
            .finish()
    }
}
