//! Markup conventions shared by the builder page and the site emitter.
//!
//! Components, sections and their controls are recognized by these
//! attributes and classes only; nothing is inferred from tag names.

use crate::Action;
use folio_dom::{Document, DomResult, Element, NodeId};
use folio_model::{ComponentTemplate, FieldMap, SectionSpec, TemplateRegistry};
use folio_types::ComponentId;

pub const ATTR_COMPONENT_ID: &str = "data-component-id";
pub const ATTR_COMPONENT: &str = "data-component";
pub const ATTR_FIELD: &str = "data-field";
pub const ATTR_ACTION: &str = "data-action";
pub const ATTR_CHILD_TYPE: &str = "data-child-type";
pub const ATTR_CONTENTEDITABLE: &str = "contenteditable";

pub const CLASS_COMPONENT: &str = "component";
pub const CLASS_SECTION: &str = "section";
pub const CLASS_CONTROLS: &str = "component-controls";
pub const CLASS_EDITABLE: &str = "editable";
pub const CLASS_FADE_IN: &str = "fade-in";
pub const CLASS_VISIBLE: &str = "visible";
pub const CLASS_PANEL: &str = "baukasten-panel";

/// Id of the page container element.
pub const PAGE_CONTAINER_ID: &str = "website-container";

const COMPONENT_ACTIONS: [Action; 5] = [
    Action::Edit,
    Action::Duplicate,
    Action::MoveUp,
    Action::MoveDown,
    Action::Delete,
];

const SECTION_ACTIONS: [Action; 5] = [
    Action::Edit,
    Action::AddChild,
    Action::MoveUp,
    Action::MoveDown,
    Action::Delete,
];

/// Builds the initial page: header, hero and the static sections.
pub(crate) fn skeleton(registry: &TemplateRegistry) -> DomResult<Document> {
    let mut doc = Document::new(Element::new("main").with_id(PAGE_CONTAINER_ID));
    let root = doc.root();

    let header = doc.append_new(
        root,
        Element::new("header")
            .with_class("header")
            .with_attr(ATTR_COMPONENT, "header"),
    )?;
    let nav = doc.append_new(header, Element::new("nav").with_class("nav"))?;
    doc.append_new(nav, Element::new("div").with_class("logo").with_text("Portfolio"))?;

    let hero = doc.append_new(
        root,
        Element::new("section")
            .with_id("hero")
            .with_class("hero")
            .with_class(CLASS_SECTION)
            .with_attr(ATTR_COMPONENT, folio_model::HERO_SECTION),
    )?;
    let content = doc.append_new(hero, Element::new("div").with_class("hero-content"))?;
    doc.append_new(
        content,
        editable("h1", Some("hero-title"), "hero-title", "Willkommen in meinem Portfolio"),
    )?;
    doc.append_new(
        content,
        editable("p", Some("hero-subtitle"), "hero-subtitle", "Entwickler · Maker · Autor"),
    )?;

    for spec in registry.sections().into_iter().filter(|s| s.is_static) {
        let node = section(&mut doc, spec)?;
        doc.append_child(root, node)?;
    }
    Ok(doc)
}

/// Renders a detached section with its controls, heading and empty grid.
pub(crate) fn section(doc: &mut Document, spec: &SectionSpec) -> DomResult<NodeId> {
    let mut element = Element::new("section")
        .with_id(spec.name.trim_end_matches("-section"))
        .with_class(CLASS_SECTION)
        .with_attr(ATTR_COMPONENT, spec.name.as_str());
    for class in &spec.extra_classes {
        element.add_class(class.as_str());
    }
    let node = doc.create(element);

    let controls = doc.append_new(node, Element::new("div").with_class(CLASS_CONTROLS))?;
    for action in SECTION_ACTIONS {
        let mut button = control_button(action);
        if action == Action::AddChild {
            button.set_attr(ATTR_CHILD_TYPE, spec.child_type.as_str());
        }
        doc.append_new(controls, button)?;
    }

    let container = doc.append_new(node, Element::new("div").with_class("container"))?;
    doc.append_new(
        container,
        editable("h2", Some("section-title"), &spec.title_field, &spec.title),
    )?;
    doc.append_new(
        container,
        Element::new("div").with_class(spec.container_class.as_str()),
    )?;
    Ok(node)
}

/// Renders a detached component instance: root, controls, then one element
/// per template field. Fields absent from `data` show their default.
pub(crate) fn component(
    doc: &mut Document,
    template: &ComponentTemplate,
    id: &ComponentId,
    data: &FieldMap,
) -> DomResult<NodeId> {
    let type_name = template.component_type.as_str();
    let node = doc.create(
        Element::new(template.root_tag.as_str())
            .with_class(type_name)
            .with_class(CLASS_COMPONENT)
            .with_class(CLASS_FADE_IN)
            .with_attr(ATTR_COMPONENT_ID, id.as_str())
            .with_attr(ATTR_COMPONENT, type_name),
    );

    let controls = doc.append_new(node, Element::new("div").with_class(CLASS_CONTROLS))?;
    for action in COMPONENT_ACTIONS {
        doc.append_new(controls, control_button(action))?;
    }

    let mut group: Option<(&str, NodeId)> = None;
    for field in &template.fields {
        let parent = match field.group.as_deref() {
            Some(name) => match group {
                Some((current, wrapper)) if current == name => wrapper,
                _ => {
                    let wrapper = doc.append_new(node, Element::new("div").with_class(name))?;
                    group = Some((name, wrapper));
                    wrapper
                }
            },
            None => {
                group = None;
                node
            }
        };
        let text = data.get(&field.name).unwrap_or(&field.default);
        doc.append_new(
            parent,
            editable(&field.tag, field.class.as_deref(), &field.name, text),
        )?;
    }
    Ok(node)
}

fn editable(tag: &str, class: Option<&str>, field: &str, text: &str) -> Element {
    let mut element = Element::new(tag);
    if let Some(class) = class {
        element.add_class(class);
    }
    element
        .with_class(CLASS_EDITABLE)
        .with_attr(ATTR_FIELD, field)
        .with_text(text)
}

fn control_button(action: Action) -> Element {
    Element::new("button")
        .with_class("control-btn")
        .with_attr(ATTR_ACTION, action.as_str())
        .with_attr("title", action.label())
        .with_text(action.icon())
}
