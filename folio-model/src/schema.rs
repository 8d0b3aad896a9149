use crate::FieldMap;
use folio_types::ComponentType;
use serde::{Deserialize, Serialize};

/// Describes a component type's markup shape and the container it lives in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentTemplate {
    pub component_type: ComponentType,
    /// Tag of the instance root element.
    pub root_tag: String,
    /// Editable fields, in markup order.
    pub fields: Vec<FieldSpec>,
    /// Field that receives the copy marker when the component is duplicated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    /// The section whose grid holds instances of this type.
    pub section: SectionSpec,
}

impl ComponentTemplate {
    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// The data a freshly instantiated component shows.
    pub fn default_data(&self) -> FieldMap {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.default.clone()))
            .collect()
    }
}

/// One editable field of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Value of the field element's `data-field` attribute and key in record data.
    pub name: String,
    /// Tag of the field element.
    pub tag: String,
    /// Extra CSS class on the field element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Text shown until the user edits it.
    pub default: String,
    /// Class of a wrapper element shared with adjacent fields of the same group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Hint for edit forms: render as a multi-line input.
    #[serde(default)]
    pub multiline: bool,
}

impl FieldSpec {
    fn simple(name: &str, tag: &str, class: Option<&str>, default: &str) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            class: class.map(Into::into),
            default: default.into(),
            group: None,
            multiline: false,
        }
    }

    /// Shorthand for an `h3` heading field.
    pub fn heading(name: &str, default: &str) -> Self {
        Self::simple(name, "h3", None, default)
    }

    /// Shorthand for an `h4` sub-heading field.
    pub fn subheading(name: &str, default: &str) -> Self {
        Self::simple(name, "h4", None, default)
    }

    /// Shorthand for a multi-line paragraph field.
    pub fn paragraph(name: &str, default: &str) -> Self {
        Self {
            multiline: true,
            ..Self::simple(name, "p", None, default)
        }
    }

    /// Shorthand for an inline `span` field with a class.
    pub fn span(name: &str, class: &str, default: &str) -> Self {
        Self::simple(name, "span", Some(class), default)
    }

    /// Shorthand for a block `div` field with a class.
    pub fn block(name: &str, class: &str, default: &str) -> Self {
        Self::simple(name, "div", Some(class), default)
    }

    /// Places the field inside a wrapper of the given class.
    pub fn in_group(mut self, group: &str) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// Describes a section: a top-level page block wrapping one container grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Value of the section's `data-component` attribute (e.g. "tutorials-section").
    pub name: String,
    /// Class of the grid element that holds the components.
    pub container_class: String,
    /// `data-field` of the section heading.
    pub title_field: String,
    /// Heading text.
    pub title: String,
    /// Classes added to the section element besides `section`.
    #[serde(default)]
    pub extra_classes: Vec<String>,
    /// The component type the section's add-child control creates.
    pub child_type: ComponentType,
    /// Whether the section is part of the initial page skeleton.
    #[serde(default)]
    pub is_static: bool,
    /// Where a synthesized section is inserted.
    pub anchor: SectionAnchor,
}

/// Placement rule for a synthesized section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionAnchor {
    /// Directly after the named section; falls back to `Last` when it is absent.
    After(String),
    /// After the last top-level section of the page.
    Last,
}
