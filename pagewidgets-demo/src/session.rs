//! A scripted session against the demo table.

use std::time::Duration;

use chrono::NaiveDate;
use log::{info, warn};
use pagedom::{DispatchError, Event, Page};
use pagewidgets::table::{Table, TableConfig};
use pagewidgets::{DebugLog, Record, Rules, TableError};

use crate::actions;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Demo session settings.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub rows: usize,
    pub delay: Duration,
}

/// One conference record per row, keyed by `index`.
pub fn records(rows: usize) -> Vec<Record> {
    (0..rows)
        .map(|i| {
            Record::new()
                .with("index", i as i64)
                .with("acronym", "WebSci 2019")
                .with("ordinal", 11)
                .with("title", "11th ACM Conference on Web Science")
                .with("eventType", "Conference")
                .with("startDate", NaiveDate::from_ymd_opt(2019, 6, 30))
                .with("endDate", NaiveDate::from_ymd_opt(2019, 7, 3))
                .with("country", "USA")
                .with("region", "US-MA")
                .with("city", "Boston")
                .with("acceptedPapers", 41)
                .with("submittedPapers", 120)
        })
        .collect()
}

/// Build the demo table with its action columns and validators.
pub fn build_table(config: &DemoConfig, log: DebugLog) -> Result<Table, TableError> {
    let mut table_config = TableConfig::new()
        .id("demo")
        .primary_key("index")
        .debug_log(log)
        .validator("acceptedPapers", Rules::new().numeric("acceptedPapers must be a number"))
        .validator("submittedPapers", Rules::new().numeric("submittedPapers must be a number"));
    for column in actions::columns(config.delay) {
        table_config = table_config.action_column(column);
    }
    Table::new(records(config.rows), table_config)
}

fn action_id(row: usize, column: usize) -> String {
    format!("demo-r{row}-action-{column}")
}

fn cell_id(row: usize, field: &str) -> String {
    format!("demo-r{row}-{field}")
}

/// Drive the table through edits and actions the way a browser would.
pub async fn run(config: &DemoConfig) -> Result<DebugLog, DemoError> {
    let log = DebugLog::new();
    let table = build_table(config, log.clone())?;
    let page = Page::new(table.clone());
    info!("Session {} started with {} rows", page.session_id(), table.len());

    let last = config.rows.saturating_sub(1);

    page.dispatch(Event::click(action_id(0, 0))).await?;
    page.dispatch(Event::change(cell_id(last, "acceptedPapers"), "42"))
        .await?;
    page.dispatch(Event::change(cell_id(last, "submittedPapers"), "many"))
        .await?;

    // An edit arriving while the row is locked is refused by the page.
    let locked = action_id(last, 2);
    let (action, edit) = tokio::join!(page.dispatch(Event::click(locked)), async {
        tokio::time::sleep(config.delay / 2).await;
        page.dispatch(Event::change(cell_id(last, "city"), "Cambridge"))
            .await
    });
    action?;
    if let Err(err) = edit {
        warn!("Edit during locked action refused: {err}");
    }

    page.dispatch(Event::click(action_id(0, 1))).await?;

    info!(
        "Session finished after {} frames, row {} now {}",
        page.frame().number,
        last,
        table.cell_value(last as i64, "acceptedPapers")?
    );
    Ok(log)
}

#[cfg(test)]
mod tests {
    use pagewidgets::Value;

    use super::*;

    fn config() -> DemoConfig {
        DemoConfig {
            rows: 3,
            delay: Duration::from_millis(20),
        }
    }

    #[test]
    fn test_build_table_columns() {
        let table = build_table(&config(), DebugLog::new()).unwrap();
        let columns = table.column_names();
        assert_eq!(
            &columns[..4],
            &["Echo", "EchoTwice", "EchoTwiceDisableInput", "index"]
        );
        assert_eq!(table.len(), 3);
        assert_eq!(table.cell_value(2, "city").unwrap(), Value::from("Boston"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_session() {
        let log = run(&config()).await.unwrap();
        let messages = log.messages();

        // Echo, accepted edit, rejected edit, two locked echoes, two echoes.
        assert_eq!(messages.len(), 7);
        assert!(messages[0].contains("\"index\":0"));
        assert!(messages[1].ends_with("Changed acceptedPapers from '41' to '42'"));
        assert!(messages[2].ends_with("Rejected submittedPapers value 'many'"));
        assert!(messages.iter().all(|m| !m.contains("Cambridge")));
    }
}
