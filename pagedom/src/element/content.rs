use crate::escape::escape_markup;

/// What an element holds between its opening and closing tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    None,
    /// Plain text. Always escaped when turned into markup.
    Text(String),
    /// Trusted, pre-rendered markup. Inserted as-is.
    Markup(String),
    Children(Vec<super::Element>),
}

impl Content {
    /// Inner markup for this content, escaping plain text.
    pub fn inner_markup(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::Text(text) => escape_markup(text),
            Self::Markup(markup) => markup.clone(),
            Self::Children(children) => children.iter().map(|c| c.inner_markup()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(s) | Self::Markup(s) => s.is_empty(),
            Self::Children(c) => c.is_empty(),
        }
    }
}
