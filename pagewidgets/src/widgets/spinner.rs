//! Loading spinner.

use pagedom::{generate_id, Element};

use crate::state::State;

/// A `role="status"` spinner, hidden while idle.
#[derive(Clone, Debug)]
pub struct Spinner {
    id: String,
    text: String,
    active: State<bool>,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinner {
    /// An active spinner announcing "Loading...".
    pub fn new() -> Self {
        Self {
            id: generate_id("spinner"),
            text: "Loading...".into(),
            active: State::new(true),
        }
    }

    /// Screen-reader text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn start(&self) {
        self.active.set(true);
    }

    pub fn stop(&self) {
        self.active.set(false);
    }

    pub fn build(&self) -> Element {
        Element::div()
            .id(&self.id)
            .class("spinner-border")
            .attr("role", "status")
            .hidden(!self.is_active())
            .child(
                Element::span()
                    .class("visually-hidden")
                    .child(Element::text(&self.text)),
            )
    }
}
