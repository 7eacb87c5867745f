use std::fmt;

/// Kind of UI event delivered to a registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Button or element clicked
    Click,
    /// Input value committed (blur or enter), not raised per keystroke
    Change,
    /// Input value changed by a keystroke
    Input,
    /// Element lost focus
    Blur,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Change => "change",
            Self::Input => "input",
            Self::Blur => "blur",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// High-level event with element targeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    /// Id of the originating element.
    pub target: String,
    /// New value for `Change`/`Input` events.
    pub value: Option<String>,
    /// Session the event came from. Stamped by the page on dispatch.
    pub session_id: String,
}

impl Event {
    pub fn new(kind: EventKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            value: None,
            session_id: String::new(),
        }
    }

    pub fn click(target: impl Into<String>) -> Self {
        Self::new(EventKind::Click, target)
    }

    pub fn change(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(EventKind::Change, target).with_value(value)
    }

    pub fn input(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(EventKind::Input, target).with_value(value)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// The event value, or an empty string for events without one.
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}
