//! Table rendering and event wiring.

use pagedom::{handler, Component, Element, EventKind, HandlerError, HandlerRegistry};

use super::{ActionColumn, Cell, Row, Table};
use crate::error::TableError;
use crate::value::Value;

impl Component for Table {
    fn render(&self, registry: &HandlerRegistry) -> Element {
        log::trace!("Rendering table {}", self.id());

        let header = Element::new("tr").children(
            self.action_columns()
                .iter()
                .map(|c| c.name().to_string())
                .chain(self.headers().iter().map(|h| h.label.clone()))
                .map(|label| Element::new("th").child(Element::text(label))),
        );

        let body = Element::new("tbody").children(
            self.rows()
                .iter()
                .map(|row| self.render_row(row, registry)),
        );

        let table = Element::new("table")
            .id(format!("{}-table", self.id()))
            .class("table is-bordered is-striped")
            .child(Element::new("thead").child(header))
            .child(body);

        let mut root = Element::div().id(self.id()).class("table-container").child(table);
        if let Some(log) = self.debug_log() {
            root = root.child(log.build(registry));
        }
        root
    }
}

impl Table {
    fn render_row(&self, row: &Row, registry: &HandlerRegistry) -> Element {
        let mut tr = Element::new("tr")
            .id(row.id())
            .data("row", row.index().to_string());
        if row.is_modified() {
            tr = tr.class("modified");
        }

        let actions = self
            .action_columns()
            .iter()
            .enumerate()
            .map(|(i, column)| action_control(row, column, i, registry));
        let cells = row.cells().map(|cell| cell_control(cell, registry));

        tr.children(actions.chain(cells).map(|control| Element::new("td").child(control)))
    }
}

fn action_control(row: &Row, column: &ActionColumn, position: usize, registry: &HandlerRegistry) -> Element {
    let id = format!("{}-action-{position}", row.id());

    let (bound_row, bound_column) = (row.clone(), column.clone());
    registry.register(
        &id,
        EventKind::Click,
        handler(move |event, page| {
            let (row, column) = (bound_row.clone(), bound_column.clone());
            async move { column.activate(row, event, page).await }
        }),
    );

    Element::button(column.name())
        .id(id)
        .class("button")
        .data("column", column.name())
}

fn cell_control(cell: &Cell, registry: &HandlerRegistry) -> Element {
    let value = cell.value();

    if !cell.is_editable() {
        let content = match &value {
            Value::Markup(markup) => Element::markup(markup.clone()),
            other => Element::text(other.to_string()),
        };
        return content.id(cell.id()).data("field", cell.field());
    }

    let target = cell.clone();
    registry.register(
        cell.id(),
        EventKind::Change,
        handler(move |event, _page| {
            let cell = target.clone();
            async move {
                match cell.commit(event.value_or_empty()) {
                    // Shown on the cell and in the log.
                    Ok(()) | Err(TableError::Validation(_)) => Ok(()),
                    // The next frame shows the record's value again.
                    Err(TableError::Disabled(_)) => Ok(()),
                    Err(err) => Err(HandlerError::from(err)),
                }
            }
        }),
    );

    let mut input = Element::input(value.input_text())
        .id(cell.id())
        .class("input")
        .data("field", cell.field())
        .disabled(cell.is_disabled());
    if value.is_date() {
        input = input.attr("type", "date");
    }
    if let Some(message) = cell.invalid_message() {
        input = input.class("is-invalid").attr("title", message);
    }
    input
}
