//! Collapsible widget - a header button that shows or hides a body.

use pagedom::{generate_id, handler, Element, EventKind, HandlerRegistry};

use crate::state::State;

/// A collapsible section.
///
/// Clicking the header button toggles the body. The body content is supplied
/// at build time, so the same collapsible can wrap content that is rebuilt
/// on every render.
#[derive(Clone, Debug)]
pub struct Collapsible {
    id: String,
    label: String,
    collapsed: State<bool>,
}

impl Collapsible {
    /// Create an expanded collapsible with the given header label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: generate_id("collapsible"),
            label: label.into(),
            collapsed: State::new(false),
        }
    }

    /// Set the initial collapse state.
    pub fn collapsed(self, collapsed: bool) -> Self {
        self.collapsed.set(collapsed);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id of the header button that toggles the body.
    pub fn toggle_id(&self) -> String {
        format!("{}-toggle", self.id)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed.get()
    }

    pub fn set_collapsed(&self, collapsed: bool) {
        self.collapsed.set(collapsed);
    }

    /// Flip the collapse state, returning the new state.
    pub fn toggle(&self) -> bool {
        self.collapsed.update(|c| {
            *c = !*c;
            *c
        })
    }

    /// Build the collapsible element around `body`.
    pub fn build(&self, registry: &HandlerRegistry, body: Vec<Element>) -> Element {
        let collapsed = self.is_collapsed();
        let toggle_id = self.toggle_id();

        let this = self.clone();
        registry.register(
            &toggle_id,
            EventKind::Click,
            handler(move |_event, _page| {
                let this = this.clone();
                async move {
                    this.toggle();
                    Ok(())
                }
            }),
        );

        let mut button = Element::button(&self.label)
            .id(toggle_id)
            .class("accordion-button");
        if collapsed {
            button = button.class("collapsed");
        }

        Element::div()
            .id(&self.id)
            .class("accordion")
            .child(button)
            .child(
                Element::div()
                    .id(format!("{}-body", self.id))
                    .class("accordion-body")
                    .hidden(collapsed)
                    .children(body),
            )
    }
}
