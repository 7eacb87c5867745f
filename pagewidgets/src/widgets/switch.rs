//! On/off switch: a checkbox input with a label.

use pagedom::{generate_id, handler, Element, EventKind, Handler, HandlerRegistry};

use crate::state::State;

/// A labelled switch bound to a shared `bool`.
///
/// A `Change` event carries the checkbox state as its value; `"true"`,
/// `"on"` and `"1"` switch it on, anything else switches it off.
#[derive(Clone)]
pub struct Switch {
    id: String,
    label: String,
    checked: State<bool>,
    on_change: Option<Handler>,
}

impl Switch {
    /// An unchecked switch.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: generate_id("switch"),
            label: label.into(),
            checked: State::new(false),
            on_change: None,
        }
    }

    /// Bind the switch to an existing state handle.
    pub fn bind(mut self, checked: State<bool>) -> Self {
        self.checked = checked;
        self
    }

    pub fn checked(self, checked: bool) -> Self {
        self.checked.set(checked);
        self
    }

    /// Handler run after the switch changed.
    pub fn on_change(mut self, handler: Handler) -> Self {
        self.on_change = Some(handler);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn input_id(&self) -> String {
        format!("{}-input", self.id)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_checked(&self) -> bool {
        self.checked.get()
    }

    pub fn set_checked(&self, checked: bool) {
        self.checked.set(checked);
    }

    pub fn build(&self, registry: &HandlerRegistry) -> Element {
        let input_id = self.input_id();
        let checked = self.checked.clone();
        let on_change = self.on_change.clone();
        registry.register(
            &input_id,
            EventKind::Change,
            handler(move |event, page| {
                let checked = checked.clone();
                let on_change = on_change.clone();
                async move {
                    let on = matches!(event.value_or_empty().trim(), "true" | "on" | "1");
                    checked.set(on);
                    match on_change {
                        Some(on_change) => on_change(event, page).await,
                        None => Ok(()),
                    }
                }
            }),
        );

        let mut input = Element::new("input")
            .id(input_id)
            .class("form-check-input")
            .attr("type", "checkbox")
            .attr("role", "switch");
        if self.is_checked() {
            input = input.attr("checked", "checked");
        }

        Element::div()
            .id(&self.id)
            .class("form-check form-switch")
            .child(input)
            .child(Element::span().class("form-check-label").child(Element::text(&self.label)))
    }
}

impl std::fmt::Debug for Switch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Switch")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("checked", &self.is_checked())
            .finish()
    }
}
