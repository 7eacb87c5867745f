//! Dismissible alert message.

use std::fmt;

use pagedom::{generate_id, handler, Element, EventKind, HandlerRegistry};

use crate::state::State;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlertKind {
    Primary,
    Success,
    Info,
    #[default]
    Warning,
    Danger,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Primary => "primary",
            AlertKind::Success => "success",
            AlertKind::Info => "info",
            AlertKind::Warning => "warning",
            AlertKind::Danger => "danger",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
struct AlertState {
    kind: AlertKind,
    text: String,
    dismissed: bool,
}

/// An alert with a close button. Dismissing hides it until the next
/// [`show`](Alert::show).
#[derive(Clone, Debug)]
pub struct Alert {
    id: String,
    state: State<AlertState>,
}

impl Default for Alert {
    fn default() -> Self {
        Self::new()
    }
}

impl Alert {
    /// An empty, hidden alert.
    pub fn new() -> Self {
        Self {
            id: generate_id("alert"),
            state: State::new(AlertState {
                dismissed: true,
                ..Default::default()
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn close_id(&self) -> String {
        format!("{}-close", self.id)
    }

    /// Show `text` with the given kind.
    pub fn show(&self, kind: AlertKind, text: impl Into<String>) {
        let text = text.into();
        self.state.update(|s| {
            s.kind = kind;
            s.text = text;
            s.dismissed = false;
        });
    }

    pub fn dismiss(&self) {
        self.state.update(|s| s.dismissed = true);
    }

    pub fn is_visible(&self) -> bool {
        self.state.read(|s| !s.dismissed)
    }

    pub fn kind(&self) -> AlertKind {
        self.state.read(|s| s.kind)
    }

    pub fn text(&self) -> String {
        self.state.read(|s| s.text.clone())
    }

    pub fn build(&self, registry: &HandlerRegistry) -> Element {
        let state = self.state.get();
        let close_id = self.close_id();

        let this = self.clone();
        registry.register(
            &close_id,
            EventKind::Click,
            handler(move |_event, _page| {
                let this = this.clone();
                async move {
                    this.dismiss();
                    Ok(())
                }
            }),
        );

        Element::div()
            .id(&self.id)
            .class(format!("alert alert-{} alert-dismissible", state.kind))
            .attr("role", "alert")
            .hidden(state.dismissed)
            .child(Element::text(state.text))
            .child(
                Element::new("button")
                    .id(close_id)
                    .class("btn-close")
                    .attr("aria-label", "Close"),
            )
    }
}
