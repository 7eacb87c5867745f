//! DebugLog widget - an append-only message list shown newest first.

use chrono::Local;
use pagedom::{Element, HandlerRegistry};

use super::Collapsible;
use crate::state::State;

/// Append-only log of messages attached to a table.
///
/// Clones share the same messages. Rendering never mutates the log; it only
/// shows the messages most-recent-first inside a collapsible "Log" section.
#[derive(Clone, Debug)]
pub struct DebugLog {
    messages: State<Vec<String>>,
    collapsible: Collapsible,
}

impl Default for DebugLog {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugLog {
    pub fn new() -> Self {
        Self {
            messages: State::new(Vec::new()),
            collapsible: Collapsible::new("Log").collapsed(true),
        }
    }

    /// Append a message.
    pub fn append(&self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("DebugLog: {message}");
        self.messages.update(|m| m.push(message));
    }

    /// Append a message prefixed with the current local time in ISO form.
    pub fn log(&self, message: impl AsRef<str>) {
        self.append(format!("{} {}", timestamp(), message.as_ref()));
    }

    /// Messages newest first.
    pub fn render(&self) -> Vec<String> {
        self.messages.read(|m| m.iter().rev().cloned().collect())
    }

    /// Messages in the order they were appended.
    pub fn messages(&self) -> Vec<String> {
        self.messages.get()
    }

    /// The most recent message.
    pub fn last(&self) -> Option<String> {
        self.messages.read(|m| m.last().cloned())
    }

    pub fn len(&self) -> usize {
        self.messages.read(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The collapsible section the log renders into.
    pub fn collapsible(&self) -> &Collapsible {
        &self.collapsible
    }

    /// Build the log element.
    pub fn build(&self, registry: &HandlerRegistry) -> Element {
        let list = Element::new("ul")
            .class("list-none")
            .children(self.render().into_iter().map(|m| Element::new("li").child(Element::text(m))));
        self.collapsible.build(registry, vec![list])
    }
}

/// Current local time as an ISO 8601 timestamp with microseconds.
fn timestamp() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
