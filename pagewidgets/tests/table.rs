use std::sync::Arc;

use chrono::NaiveDate;
use pagedom::{find_all, Component, DispatchError, Event, HandlerError, HandlerRegistry, Page};
use pagewidgets::table::{ActionColumn, Header, Table, TableConfig};
use pagewidgets::{DebugLog, KeyValue, Record, Rules, SharedRecord, TableError, Value};
use serde_json::json;
use tokio::sync::Notify;

fn people() -> Vec<Record> {
    Record::list_from_json(json!([
        {"id": 1, "name": "Ann", "age": 34},
        {"id": 2, "name": "Bo", "age": 27},
    ]))
    .unwrap()
}

fn echo() -> ActionColumn {
    ActionColumn::from_fn("Echo", |cx| async move {
        let line = format!("{:?}", cx.row.record());
        cx.append(line);
        Ok(())
    })
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_headers_follow_first_record() {
    let records = vec![
        Record::new().with("zeta", 1).with("alpha", "a").with("mid", 2.5),
        Record::new().with("alpha", "b"),
    ];
    let table = Table::new(records, TableConfig::new()).unwrap();

    let fields: Vec<_> = table.headers().iter().map(|h| h.field.as_str()).collect();
    assert_eq!(fields, vec!["zeta", "alpha", "mid"]);
    // Labels default to the field name.
    assert_eq!(table.headers()[1].label, "alpha");
    // Every row has exactly one cell per header.
    for row in table.rows() {
        let cells: Vec<_> = row.cells().map(|c| c.field()).collect();
        assert_eq!(cells, fields);
    }
    assert_eq!(table.rows()[1].cell("zeta").unwrap().value(), Value::Null);
}

#[test]
fn test_explicit_headers_may_be_a_subset() {
    let table = Table::new(
        people(),
        TableConfig::new().headers([("name", "Name")]).header(Header::new("age").label("Age")),
    )
    .unwrap();
    assert_eq!(table.column_names(), vec!["name", "age"]);
    assert!(table.rows()[0].cell("id").is_none());
}

#[test]
fn test_empty_first_record_without_headers_is_config_error() {
    let result = Table::new(vec![Record::new()], TableConfig::new());
    assert!(matches!(result, Err(TableError::Config(_))));

    let empty = Table::new(Vec::<Record>::new(), TableConfig::new()).unwrap();
    assert!(empty.is_empty());
    assert!(empty.headers().is_empty());
}

#[test]
fn test_duplicate_primary_key() {
    let records = vec![
        Record::new().with("id", 1).with("name", "Ann"),
        Record::new().with("id", 1).with("name", "Bo"),
    ];
    let err = Table::new(records, TableConfig::new().primary_key("id")).unwrap_err();
    assert_eq!(
        err,
        TableError::DuplicateKey {
            field: "id".into(),
            key: KeyValue::Int(1),
        }
    );
}

#[test]
fn test_keys_of_different_types_do_not_collide() {
    let records = vec![
        Record::new().with("id", 1.0).with("name", "Ann"),
        Record::new().with("id", "1").with("name", "Bo"),
    ];
    let table = Table::new(records, TableConfig::new().primary_key("id")).unwrap();
    assert_eq!(table.cell_value(1.0, "name").unwrap(), Value::from("Ann"));
    assert_eq!(table.cell_value("1", "name").unwrap(), Value::from("Bo"));
}

#[test]
fn test_missing_primary_key_field() {
    let records = vec![
        Record::new().with("id", 1).with("name", "Ann"),
        Record::new().with("name", "Bo"),
    ];
    let err = Table::new(records, TableConfig::new().primary_key("id")).unwrap_err();
    assert_eq!(
        err,
        TableError::MissingField {
            field: "id".into(),
            row: 1,
        }
    );
}

#[test]
fn test_from_json() {
    let table = Table::from_json(
        json!([{"id": "a", "v": 1}, {"id": "b", "v": 2}]),
        TableConfig::new().primary_key("id"),
    )
    .unwrap();
    assert_eq!(table.cell_value("b", "v").unwrap(), Value::Int(2));
    assert!(Table::from_json(json!({"id": 1}), TableConfig::new()).is_err());
}

// ============================================================================
// Keyed access
// ============================================================================

#[test]
fn test_ann_and_bo() {
    let table = Table::new(people(), TableConfig::new().primary_key("id")).unwrap();

    assert_eq!(table.cell_value(2, "name").unwrap(), Value::from("Bo"));

    table.update_cell(1, "name", "Anna").unwrap();
    assert_eq!(table.cell_value(1, "name").unwrap(), Value::from("Anna"));
    // Display only: the record keeps its value.
    assert_eq!(table.row(1).unwrap().get("name"), Some(Value::from("Ann")));

    assert_eq!(
        table.cell_value(3, "name"),
        Err(TableError::UnknownKey(KeyValue::Int(3)))
    );
    assert_eq!(
        table.cell_value(1, "email"),
        Err(TableError::UnknownField("email".into()))
    );
}

#[test]
fn test_keyed_access_requires_primary_key() {
    let table = Table::new(people(), TableConfig::new()).unwrap();
    assert_eq!(table.update_cell(1, "name", "Anna"), Err(TableError::NoPrimaryKey));
    assert_eq!(table.cell_value(1, "name"), Err(TableError::NoPrimaryKey));
    assert!(table.row_at(1).is_some());
}

#[test]
fn test_commit_cell_writes_record() {
    let log = DebugLog::new();
    let table = Table::new(
        people(),
        TableConfig::new().primary_key("id").debug_log(log.clone()),
    )
    .unwrap();

    table.commit_cell(2, "age", 28).unwrap();
    assert_eq!(table.row(2).unwrap().get("age"), Some(Value::Int(28)));
    assert_eq!(table.cell_value(2, "age").unwrap(), Value::Int(28));
    assert!(log.last().unwrap().ends_with("Changed age from '27' to '28'"));
}

#[test]
fn test_primary_key_edit_moves_index_entry() {
    let table = Table::new(people(), TableConfig::new().primary_key("id")).unwrap();

    table.commit_cell(1, "id", 3).unwrap();
    assert_eq!(table.cell_value(3, "name").unwrap(), Value::from("Ann"));
    assert_eq!(table.row(1).unwrap_err(), TableError::UnknownKey(KeyValue::Int(1)));

    // Taking another row's key is refused and leaves the record alone.
    let err = table.commit_cell(3, "id", 2).unwrap_err();
    assert!(matches!(err, TableError::DuplicateKey { .. }));
    assert_eq!(table.row(3).unwrap().get("id"), Some(Value::Int(3)));
}

// ============================================================================
// Cells
// ============================================================================

#[test]
fn test_round_trip_edit_is_shared_with_caller() {
    let records: Vec<SharedRecord> = people().into_iter().map(Record::shared).collect();
    let log = DebugLog::new();
    let table = Table::new(records.clone(), TableConfig::new().debug_log(log.clone())).unwrap();

    let cell = table.rows()[0].cell("name").unwrap();
    cell.commit("Anna").unwrap();

    assert_eq!(records[0].read(|r| r.get("name").cloned()), Some(Value::from("Anna")));
    assert_eq!(cell.value(), Value::from("Anna"));

    let last = log.last().unwrap();
    assert!(last.contains("name"));
    assert!(last.contains("'Ann'"));
    assert!(last.contains("'Anna'"));
    assert!(table.rows()[0].is_modified());
    assert!(!table.rows()[1].is_modified());
}

#[test]
fn test_commit_keeps_value_type() {
    let birthday = NaiveDate::from_ymd_opt(1990, 5, 1).unwrap();
    let table = Table::new(
        vec![Record::new().with("name", "Ann").with("age", 34).with("born", birthday)],
        TableConfig::new(),
    )
    .unwrap();
    let row = &table.rows()[0];

    row.cell("age").unwrap().commit("35").unwrap();
    assert_eq!(row.get("age"), Some(Value::Int(35)));

    row.cell("born").unwrap().commit("1991-06-02").unwrap();
    assert_eq!(
        row.get("born"),
        Some(Value::Date(NaiveDate::from_ymd_opt(1991, 6, 2).unwrap()))
    );

    // Unparseable text is kept as a string.
    row.cell("age").unwrap().commit("unknown").unwrap();
    assert_eq!(row.get("age"), Some(Value::from("unknown")));
}

#[test]
fn test_validation_rejects_commit() {
    let log = DebugLog::new();
    let table = Table::new(
        people(),
        TableConfig::new()
            .debug_log(log.clone())
            .validator("age", Rules::new().numeric("age must be a number")),
    )
    .unwrap();
    let cell = table.rows()[0].cell("age").unwrap();

    let err = cell.commit("old").unwrap_err();
    assert!(matches!(err, TableError::Validation(ref e) if e.field == "age"));
    assert_eq!(table.rows()[0].get("age"), Some(Value::Int(34)));
    assert_eq!(cell.invalid_message().as_deref(), Some("age must be a number"));
    assert!(log.last().unwrap().ends_with("Rejected age value 'old'"));

    cell.commit("40").unwrap();
    assert!(!cell.is_invalid());
}

#[test]
fn test_set_display_only_leaves_record() {
    let table = Table::new(people(), TableConfig::new()).unwrap();
    let row = &table.rows()[0];
    let cell = row.cell("name").unwrap();

    cell.set_display_only(Value::Markup("<a href='/people/1'>Ann</a>".into()));
    assert_eq!(row.get("name"), Some(Value::from("Ann")));
    assert!(!row.is_modified());

    cell.set_and_commit("Annie").unwrap();
    assert_eq!(row.get("name"), Some(Value::from("Annie")));
}

#[test]
fn test_update_record_returns_previous() {
    let table = Table::new(people(), TableConfig::new()).unwrap();
    let row = &table.rows()[1];
    assert_eq!(row.update_record("name", "Bob").unwrap(), Value::from("Bo"));
    assert_eq!(row.update_record("nickname", "B").unwrap(), Value::Null);
    // The cell is not touched by a direct record update.
    assert_eq!(row.cell("name").unwrap().value(), Value::from("Bo"));
}

#[test]
fn test_detached_row() {
    let table = Table::new(people(), TableConfig::new()).unwrap();
    let row = table.rows()[0].clone();
    drop(table);
    assert_eq!(row.update_record("name", "x"), Err(TableError::Detached));
    assert!(row.debug_log().is_none());
}

// ============================================================================
// Input lock
// ============================================================================

#[test]
fn test_input_lock_round_trip() {
    let table = Table::new(
        people(),
        TableConfig::new().headers([Header::new("id").read_only(), Header::new("name"), Header::new("age")]),
    )
    .unwrap();
    let row = &table.rows()[0];
    let editable: Vec<_> = row.cells().map(|c| c.is_editable()).collect();
    assert_eq!(editable, vec![false, true, true]);

    row.set_input_enabled(false);
    assert!(row.cells().filter(|c| c.is_editable()).all(|c| c.is_disabled()));
    assert!(!row.cell("id").unwrap().is_disabled());

    row.set_input_enabled(true);
    assert!(row.cells().all(|c| !c.is_disabled()));
    let after: Vec<_> = row.cells().map(|c| c.is_editable()).collect();
    assert_eq!(after, editable);
}

#[test]
fn test_input_locks_nest() {
    let table = Table::new(people(), TableConfig::new()).unwrap();
    let row = &table.rows()[0];

    let outer = row.lock_inputs();
    let inner = row.lock_inputs();
    drop(inner);
    assert!(!row.is_input_enabled());
    drop(outer);
    assert!(row.is_input_enabled());
    // Other rows are untouched.
    assert!(table.rows()[1].is_input_enabled());
}

#[test]
fn test_allow_input_false_renders_static_cells() {
    let table = Table::new(people(), TableConfig::new().allow_input(false)).unwrap();
    assert!(table.rows()[0].cells().all(|c| !c.is_editable()));
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_column_order_actions_first() {
    let twice = ActionColumn::from_fn("Echo twice", |_cx| async { Ok(()) });
    let table = Table::new(
        people(),
        TableConfig::new()
            .id("people")
            .action_column(echo())
            .action_column(twice),
    )
    .unwrap();

    assert_eq!(
        table.column_names(),
        vec!["Echo", "Echo twice", "id", "name", "age"]
    );

    let registry = HandlerRegistry::new();
    let root = table.render(&registry);
    let headings: Vec<_> = find_all(&root, |e| e.tag == "th")
        .into_iter()
        .map(|e| e.text_content())
        .collect();
    assert_eq!(headings, vec!["Echo", "Echo twice", "id", "name", "age"]);

    let first_row = find_all(&root, |e| e.tag == "tr" && e.id == "people-r0");
    let controls: Vec<_> = first_row[0]
        .child_elements()
        .iter()
        .map(|td| td.child_elements()[0].id.clone())
        .collect();
    assert_eq!(
        controls,
        vec![
            "people-r0-action-0",
            "people-r0-action-1",
            "people-r0-id",
            "people-r0-name",
            "people-r0-age",
        ]
    );
}

#[test]
fn test_static_cells_are_escaped() {
    let records = vec![
        Record::new()
            .with("comment", "<script>alert(1)</script>")
            .with("link", Value::Markup("<a href='/x'>x</a>".into())),
    ];
    let table = Table::new(records, TableConfig::new().id("t").allow_input(false)).unwrap();
    let root = table.render(&HandlerRegistry::new());

    let comment = pagedom::find_element(&root, "t-r0-comment").unwrap();
    assert_eq!(comment.inner_markup(), "&lt;script&gt;alert(1)&lt;/script&gt;");
    let link = pagedom::find_element(&root, "t-r0-link").unwrap();
    assert_eq!(link.inner_markup(), "<a href='/x'>x</a>");
}

#[test]
fn test_date_cells_render_iso_dates() {
    let records = vec![Record::new().with("born", NaiveDate::from_ymd_opt(1990, 5, 1).unwrap())];
    let table = Table::new(records, TableConfig::new().id("d")).unwrap();
    let root = table.render(&HandlerRegistry::new());

    let input = pagedom::find_element(&root, "d-r0-born").unwrap();
    assert_eq!(input.value.as_deref(), Some("1990-05-01"));
    assert_eq!(input.get_attr("type").map(String::as_str), Some("date"));
}

// ============================================================================
// Events
// ============================================================================

#[tokio::test]
async fn test_change_event_commits() {
    let log = DebugLog::new();
    let table = Table::new(
        people(),
        TableConfig::new().id("people").debug_log(log.clone()),
    )
    .unwrap();
    let page = Page::new(table.clone());

    page.dispatch(Event::change("people-r0-name", "Anna"))
        .await
        .unwrap();

    assert_eq!(table.rows()[0].get("name"), Some(Value::from("Anna")));
    let frame = page.frame();
    assert_eq!(frame.find("people-r0-name").unwrap().value.as_deref(), Some("Anna"));
    assert!(frame.find("people-r0").unwrap().has_class("modified"));
    assert_eq!(log.len(), 1);
}

#[tokio::test]
async fn test_rejected_change_marks_input() {
    let table = Table::new(
        people(),
        TableConfig::new()
            .id("people")
            .validator("age", Rules::new().numeric("age must be a number")),
    )
    .unwrap();
    let page = Page::new(table.clone());

    // Rejection is shown on the page, not raised to the caller.
    page.dispatch(Event::change("people-r1-age", "old")).await.unwrap();

    assert_eq!(table.rows()[1].get("age"), Some(Value::Int(27)));
    assert!(page.frame().find("people-r1-age").unwrap().has_class("is-invalid"));
}

#[tokio::test]
async fn test_action_click_runs_handler() {
    let log = DebugLog::new();
    let table = Table::new(
        people(),
        TableConfig::new()
            .id("people")
            .action_column(echo())
            .debug_log(log.clone()),
    )
    .unwrap();
    let page = Page::new(table);

    page.dispatch(Event::click("people-r1-action-0")).await.unwrap();

    let entry = log.last().unwrap();
    assert!(entry.contains("Bo"));
    assert!(page.frame().root.text_content().contains("Bo"));
}

#[tokio::test]
async fn test_action_error_propagates_and_releases_lock() {
    let failing = ActionColumn::from_fn("Fail", |cx| async move {
        let _lock = cx.row.lock_inputs();
        Err(HandlerError::failed("lookup failed"))
    });
    let table = Table::new(
        people(),
        TableConfig::new().id("people").action_column(failing),
    )
    .unwrap();
    let page = Page::new(table.clone());

    let err = page
        .dispatch(Event::click("people-r0-action-0"))
        .await
        .unwrap_err();
    assert_eq!(err, DispatchError::Handler(HandlerError::failed("lookup failed")));
    assert!(table.rows()[0].is_input_enabled());
    assert!(!page.frame().find("people-r0-name").unwrap().disabled);
}

#[tokio::test]
async fn test_input_lock_held_across_suspension() {
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());

    let (s, r) = (started.clone(), release.clone());
    let slow = ActionColumn::from_fn("Slow", move |cx| {
        let (started, release) = (s.clone(), r.clone());
        async move {
            let _lock = cx.row.lock_inputs();
            cx.append("first");
            cx.page.update();
            started.notify_one();
            release.notified().await;
            cx.append("second");
            Ok(())
        }
    });
    let log = DebugLog::new();
    let table = Table::new(
        people(),
        TableConfig::new()
            .id("people")
            .action_column(slow)
            .debug_log(log.clone()),
    )
    .unwrap();
    let page = Page::new(table.clone());

    let (result, ()) = tokio::join!(page.dispatch(Event::click("people-r0-action-0")), async {
        started.notified().await;
        assert!(page.frame().find("people-r0-name").unwrap().disabled);
        assert_eq!(log.render(), vec!["first"]);
        assert_eq!(
            page.dispatch(Event::change("people-r0-name", "x")).await,
            Err(DispatchError::Disabled("people-r0-name".into()))
        );
        // Other rows stay editable.
        assert!(!page.frame().find("people-r1-name").unwrap().disabled);
        release.notify_one();
    });

    result.unwrap();
    assert!(!page.frame().find("people-r0-name").unwrap().disabled);
    assert_eq!(log.render(), vec!["second", "first"]);
    assert_eq!(table.rows()[0].get("name"), Some(Value::from("Ann")));
}

#[test]
fn test_commit_refused_while_locked() {
    let log = DebugLog::new();
    let table = Table::new(
        people(),
        TableConfig::new().id("people").primary_key("id").debug_log(log.clone()),
    )
    .unwrap();
    let row = &table.rows()[0];
    let cell = row.cell("name").unwrap();

    let lock = row.lock_inputs();
    assert_eq!(cell.commit("Mallory"), Err(TableError::Disabled("people-r0-name".into())));
    assert_eq!(
        table.commit_cell(1, "name", "Mallory"),
        Err(TableError::Disabled("people-r0-name".into()))
    );
    assert_eq!(row.get("name"), Some(Value::from("Ann")));
    assert_eq!(cell.value(), Value::from("Ann"));
    assert!(log.is_empty());

    drop(lock);
    cell.commit("Mallory").unwrap();
    assert_eq!(row.get("name"), Some(Value::from("Mallory")));
}

#[tokio::test]
async fn test_edit_refused_while_locked_before_update() {
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());

    let (s, r) = (started.clone(), release.clone());
    let quiet = ActionColumn::from_fn("Quiet", move |cx| {
        let (started, release) = (s.clone(), r.clone());
        async move {
            // No page update: the last frame still shows the input enabled.
            let _lock = cx.row.lock_inputs();
            started.notify_one();
            release.notified().await;
            Ok(())
        }
    });
    let table = Table::new(
        people(),
        TableConfig::new().id("people").action_column(quiet),
    )
    .unwrap();
    let page = Page::new(table.clone());

    let (result, ()) = tokio::join!(page.dispatch(Event::click("people-r0-action-0")), async {
        started.notified().await;
        assert!(!page.frame().find("people-r0-name").unwrap().disabled);
        page.dispatch(Event::change("people-r0-name", "Mallory"))
            .await
            .unwrap();
        assert_eq!(table.rows()[0].get("name"), Some(Value::from("Ann")));
        release.notify_one();
    });

    result.unwrap();
    assert_eq!(table.rows()[0].get("name"), Some(Value::from("Ann")));
    let frame = page.frame();
    assert_eq!(frame.find("people-r0-name").unwrap().value.as_deref(), Some("Ann"));
}

#[tokio::test]
async fn test_debug_log_starts_collapsed() {
    let log = DebugLog::new();
    let table = Table::new(people(), TableConfig::new().debug_log(log.clone())).unwrap();
    let page = Page::new(table);

    let body_id = format!("{}-body", log.collapsible().id());
    assert!(page.frame().find(&body_id).unwrap().hidden);

    page.dispatch(Event::click(log.collapsible().toggle_id()))
        .await
        .unwrap();
    assert!(!page.frame().find(&body_id).unwrap().hidden);
}
