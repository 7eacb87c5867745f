//! HideShow widget - a toggle button above content that can be hidden.

use pagedom::{generate_id, handler, Element, EventKind, HandlerRegistry};

use crate::state::State;

const SHOWN_ICON: &str = "▼";
const HIDDEN_ICON: &str = "◀";

/// Content with a visibility toggle.
///
/// The button reads `"<label> ▼"` while the content is shown and
/// `"<label> ◀"` while it is hidden.
#[derive(Clone, Debug)]
pub struct HideShow {
    id: String,
    label_if_shown: String,
    label_if_hidden: Option<String>,
    shown: State<bool>,
}

impl HideShow {
    /// Content is shown initially. `label_if_hidden` falls back to
    /// `label_if_shown` when absent.
    pub fn new(label_if_shown: impl Into<String>, label_if_hidden: Option<String>) -> Self {
        Self {
            id: generate_id("hideshow"),
            label_if_shown: label_if_shown.into(),
            label_if_hidden,
            shown: State::new(true),
        }
    }

    pub fn show_content(self, show: bool) -> Self {
        self.shown.set(show);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn toggle_id(&self) -> String {
        format!("{}-toggle", self.id)
    }

    pub fn is_shown(&self) -> bool {
        self.shown.get()
    }

    pub fn set_shown(&self, shown: bool) {
        self.shown.set(shown);
    }

    pub fn toggle(&self) -> bool {
        self.shown.update(|s| {
            *s = !*s;
            *s
        })
    }

    /// Button text for the current state.
    pub fn status_label(&self) -> String {
        if self.is_shown() {
            format!("{} {SHOWN_ICON}", self.label_if_shown)
        } else {
            let label = self.label_if_hidden.as_ref().unwrap_or(&self.label_if_shown);
            format!("{label} {HIDDEN_ICON}")
        }
    }

    pub fn build(&self, registry: &HandlerRegistry, content: Vec<Element>) -> Element {
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

        Element::div()
            .id(&self.id)
            .child(Element::button(self.status_label()).id(toggle_id))
            .child(
                Element::div()
                    .id(format!("{}-content", self.id))
                    .hidden(!self.is_shown())
                    .children(content),
            )
    }
}
