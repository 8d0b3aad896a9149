use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a node in a [`crate::Document`]. Never reused within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An element: tag, classes, attributes and optional own text.
///
/// `id` and `class` are kept out of `attributes`; the HTML writer emits
/// them first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: Option<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Builder: sets the element id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder: adds a class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    /// Builder: sets an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder: sets the element's own text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Adds a class unless already present.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    /// Removes a class; returns whether it was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        before != self.classes.len()
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }
}

/// A simple element matcher: tag, `#id`, `.class`, `[attr]`, `[attr=value]`,
/// or all of several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Tag(String),
    Id(String),
    Class(String),
    Attr(String),
    AttrEq(String, String),
    All(Vec<Selector>),
}

impl Selector {
    pub fn tag(tag: &str) -> Self {
        Self::Tag(tag.into())
    }

    pub fn id(id: &str) -> Self {
        Self::Id(id.into())
    }

    pub fn class(class: &str) -> Self {
        Self::Class(class.into())
    }

    pub fn attr(name: &str) -> Self {
        Self::Attr(name.into())
    }

    pub fn attr_eq(name: &str, value: &str) -> Self {
        Self::AttrEq(name.into(), value.into())
    }

    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Tag(tag) => element.tag == *tag,
            Self::Id(id) => element.id.as_deref() == Some(id.as_str()),
            Self::Class(class) => element.has_class(class),
            Self::Attr(name) => element.attributes.contains_key(name),
            Self::AttrEq(name, value) => element.attr(name) == Some(value.as_str()),
            Self::All(parts) => parts.iter().all(|s| s.matches(element)),
        }
    }
}
