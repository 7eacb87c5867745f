//! Button widget.

use pagedom::{generate_id, Element, EventKind, Handler, HandlerRegistry};

/// A button widget builder.
///
/// Stateless: build it again on every render.
///
/// # Example
///
/// ```
/// use pagedom::{handler, HandlerRegistry};
/// use pagewidgets::widgets::Button;
///
/// let registry = HandlerRegistry::new();
/// let element = Button::new()
///     .label("Save")
///     .icon("save")
///     .id("save")
///     .on_click(handler(|_event, _page| async { Ok(()) }))
///     .build(&registry);
///
/// assert_eq!(element.text_content(), "Save");
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Button {
    label: Option<String>,
    icon: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    disabled: bool,
    on_click: Option<Handler>,
}

impl Button {
    /// Create a new button builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the button label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the icon shown before the label.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the button id. Required for the click handler to survive
    /// re-renders.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Mark the button as disabled.
    ///
    /// Disabled buttons don't register handlers.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_click(mut self, handler: Handler) -> Self {
        self.on_click = Some(handler);
        self
    }

    /// Build the button element, registering the click handler.
    pub fn build(self, registry: &HandlerRegistry) -> Element {
        let id = self.id.unwrap_or_else(|| generate_id("button"));

        let mut element = Element::new("button").id(&id).class("button");
        for class in self.classes {
            element = element.class(class);
        }
        if let Some(icon) = &self.icon {
            element = element.child(
                Element::new("i")
                    .class("icon")
                    .data("icon", icon.as_str()),
            );
        }
        if let Some(label) = self.label {
            element = element.child(Element::text(label));
        }

        if self.disabled {
            return element.disabled(true);
        }
        if let Some(handler) = self.on_click {
            registry.register(&id, EventKind::Click, handler);
        }
        element
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("label", &self.label)
            .field("id", &self.id)
            .field("disabled", &self.disabled)
            .field("has_on_click", &self.on_click.is_some())
            .finish()
    }
}
