//! The three reference row actions: echo once, echo twice, and echo twice
//! with the row's inputs locked in between.

use std::time::Duration;

use async_trait::async_trait;
use pagewidgets::table::{ActionColumn, ActionContext, RowAction};
use pagewidgets::HandlerError;

/// Serialize the row's record for the log.
fn record_line(cx: &ActionContext) -> Result<String, HandlerError> {
    serde_json::to_string(&cx.row.record()).map_err(|e| HandlerError::failed(e.to_string()))
}

/// Appends the row's record to the log.
pub struct Echo;

#[async_trait]
impl RowAction for Echo {
    async fn run(&self, cx: ActionContext) -> Result<(), HandlerError> {
        let line = record_line(&cx)?;
        cx.append(line);
        Ok(())
    }
}

/// Appends the record, waits, then appends it again.
///
/// The row stays editable during the wait.
pub struct EchoTwice {
    pub delay: Duration,
}

#[async_trait]
impl RowAction for EchoTwice {
    async fn run(&self, cx: ActionContext) -> Result<(), HandlerError> {
        cx.append(record_line(&cx)?);
        cx.page.update();
        tokio::time::sleep(self.delay).await;
        cx.append(record_line(&cx)?);
        Ok(())
    }
}

/// Like [`EchoTwice`], but the row's inputs are disabled during the wait.
pub struct EchoTwiceDisableInput {
    pub delay: Duration,
}

#[async_trait]
impl RowAction for EchoTwiceDisableInput {
    async fn run(&self, cx: ActionContext) -> Result<(), HandlerError> {
        let _lock = cx.row.lock_inputs();
        cx.append(record_line(&cx)?);
        cx.page.update();
        tokio::time::sleep(self.delay).await;
        cx.append(record_line(&cx)?);
        Ok(())
    }
}

/// The demo's action columns, in display order.
pub fn columns(delay: Duration) -> Vec<ActionColumn> {
    vec![
        ActionColumn::new("Echo", Echo),
        ActionColumn::new("EchoTwice", EchoTwice { delay }),
        ActionColumn::new("EchoTwiceDisableInput", EchoTwiceDisableInput { delay }),
    ]
}
