use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Generate a process-unique id with the given prefix.
pub fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// A node in the display tree sent to the connected client.
///
/// Elements are plain data. Components build a fresh tree on every
/// [`update`](crate::Page::update) and register their event handlers
/// against element ids while doing so.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: String,

    // Content
    pub content: Content,

    // Presentation
    pub classes: Vec<String>,
    pub attributes: HashMap<String, String>,

    // Input state
    /// Current value of an input control.
    pub value: Option<String>,

    // State
    /// Disabled elements don't receive events.
    pub disabled: bool,
    pub hidden: bool,

    // Custom data storage (row keys, column names, etc.)
    pub data: HashMap<String, String>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: "div".into(),
            content: Content::None,
            classes: Vec::new(),
            attributes: HashMap::new(),
            value: None,
            disabled: false,
            hidden: false,
            data: HashMap::new(),
        }
    }
}

impl Element {
    /// Create an element with the given tag and an id derived from it.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            id: generate_id(&tag),
            tag,
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    /// Create a text element. The text is escaped when rendered.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            tag: "span".into(),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    /// Create an element carrying trusted markup.
    ///
    /// Only use this for content produced by the application itself, never
    /// for user input.
    pub fn markup(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("markup"),
            tag: "span".into(),
            content: Content::Markup(content.into()),
            ..Default::default()
        }
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self {
            id: generate_id("button"),
            tag: "button".into(),
            content: Content::Text(label.into()),
            ..Default::default()
        }
    }

    /// Create an input control seeded with `value`.
    pub fn input(value: impl Into<String>) -> Self {
        Self {
            id: generate_id("input"),
            tag: "input".into(),
            value: Some(value.into()),
            ..Default::default()
        }
        .attr("type", "text")
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Presentation
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        for c in class.split_whitespace() {
            if !self.classes.iter().any(|existing| existing == c) {
                self.classes.push(c.to_string());
            }
        }
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&String> {
        self.attributes.get(key)
    }

    // Input state
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    // State
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    // Custom data
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    // Content
    pub fn content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }

    /// Direct children, or an empty slice for leaf elements.
    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    /// Concatenated, unescaped text of this element and its descendants.
    pub fn text_content(&self) -> String {
        match &self.content {
            Content::None => String::new(),
            Content::Text(s) | Content::Markup(s) => s.clone(),
            Content::Children(children) => children.iter().map(Element::text_content).collect(),
        }
    }

    /// Flattened inner markup: text escaped, trusted markup verbatim.
    pub fn inner_markup(&self) -> String {
        self.content.inner_markup()
    }
}
