//! The operation-dispatch table and the values it hands back to the UI.

use folio_types::{ComponentId, Direction};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A control action, named by the `data-action` attribute of its button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Edit,
    Delete,
    Duplicate,
    MoveUp,
    MoveDown,
    AddChild,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Edit,
        Action::Delete,
        Action::Duplicate,
        Action::MoveUp,
        Action::MoveDown,
        Action::AddChild,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Duplicate => "duplicate",
            Self::MoveUp => "move-up",
            Self::MoveDown => "move-down",
            Self::AddChild => "add-child",
        }
    }

    /// Tooltip of the control button.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Edit => "Bearbeiten",
            Self::Delete => "Löschen",
            Self::Duplicate => "Duplizieren",
            Self::MoveUp => "Nach oben",
            Self::MoveDown => "Nach unten",
            Self::AddChild => "Element hinzufügen",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Edit => "✏️",
            Self::Delete => "🗑️",
            Self::Duplicate => "📋",
            Self::MoveUp => "⬆️",
            Self::MoveDown => "⬇️",
            Self::AddChild => "➕",
        }
    }

    /// The move direction for `move-up` / `move-down`.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::MoveUp => Some(Direction::Up),
            Self::MoveDown => Some(Direction::Down),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("unknown action: {s}"))
    }
}

/// What an action applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Target {
    Component(ComponentId),
    /// A section, by its `data-component` name.
    Section(String),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component(id) => write!(f, "component {id}"),
            Self::Section(name) => write!(f, "section {name}"),
        }
    }
}

/// One input of an edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub multiline: bool,
}

impl FormField {
    const MULTILINE_THRESHOLD: usize = 50;

    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label_for(name),
            value: value.to_string(),
            multiline: name.contains("description")
                || value.chars().count() > Self::MULTILINE_THRESHOLD,
        }
    }
}

/// The form an `edit` action opens. The UI changes the `value`s and hands
/// the form back to [`crate::BuilderSession::apply_form`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditForm {
    pub target: Target,
    pub fields: Vec<FormField>,
}

impl EditForm {
    /// Sets the value of a named field; returns false if the form has no such field.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// Result of an invoked action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An edit form to show.
    Form(EditForm),
    /// A component was created.
    Added(ComponentId),
    /// Components were removed.
    Removed(usize),
    /// Whether a move changed anything.
    Moved(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

/// A non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}

fn label_for(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
