use crate::schema::{ComponentTemplate, FieldSpec, SectionAnchor, SectionSpec};
use crate::{ModelError, ModelResult};
use folio_types::ComponentType;
use std::collections::BTreeMap;

/// Section holding the hero banner. It carries no components.
pub const HERO_SECTION: &str = "hero-section";

/// Canonical templates keyed by component type. Lookup only; the engine
/// never mutates a registered template.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<ComponentType, ComponentTemplate>,
}

impl TemplateRegistry {
    /// A registry with no templates.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The six built-in portfolio blocks.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for template in builtin_templates() {
            registry.register(template);
        }
        registry
    }

    /// Registers (or replaces) the template for its type, returning the old one.
    pub fn register(&mut self, template: ComponentTemplate) -> Option<ComponentTemplate> {
        self.templates.insert(template.component_type, template)
    }

    /// Resolves the template for a type.
    pub fn get(&self, component_type: ComponentType) -> ModelResult<&ComponentTemplate> {
        self.templates
            .get(&component_type)
            .ok_or(ModelError::TemplateNotFound(component_type))
    }

    pub fn contains(&self, component_type: ComponentType) -> bool {
        self.templates.contains_key(&component_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentTemplate> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Looks up a section spec by its `data-component` name.
    pub fn section(&self, name: &str) -> Option<&SectionSpec> {
        self.iter().map(|t| &t.section).find(|s| s.name == name)
    }

    /// Distinct section specs, static ones first, in palette order.
    pub fn sections(&self) -> Vec<&SectionSpec> {
        let mut out: Vec<&SectionSpec> = Vec::new();
        for spec in self.iter().map(|t| &t.section) {
            if !out.iter().any(|s| s.name == spec.name) {
                out.push(spec);
            }
        }
        out.sort_by_key(|s| !s.is_static);
        out
    }
}

fn section(
    name: &str,
    container_class: &str,
    title: &str,
    child_type: ComponentType,
    is_static: bool,
    anchor: SectionAnchor,
) -> SectionSpec {
    let stem = name.trim_end_matches("-section");
    SectionSpec {
        name: name.into(),
        container_class: container_class.into(),
        title_field: format!("{stem}-title"),
        title: title.into(),
        extra_classes: Vec::new(),
        child_type,
        is_static,
        anchor,
    }
}

fn builtin_templates() -> Vec<ComponentTemplate> {
    let title = Some("title".to_string());
    vec![
        ComponentTemplate {
            component_type: ComponentType::ProjectCard,
            root_tag: "div".into(),
            fields: vec![
                FieldSpec::span("icon", "project-icon", "🚀"),
                FieldSpec::heading("title", "Projekt Titel"),
                FieldSpec::paragraph("description", "Projekt Beschreibung"),
                FieldSpec::span("tech1", "tech-tag", "Rust").in_group("tech-stack"),
                FieldSpec::span("tech2", "tech-tag", "WebAssembly").in_group("tech-stack"),
                FieldSpec::span("tech3", "tech-tag", "Linux").in_group("tech-stack"),
            ],
            display_field: title.clone(),
            section: section(
                "projects-section",
                "projects-grid",
                "Projekte",
                ComponentType::ProjectCard,
                true,
                SectionAnchor::After(HERO_SECTION.into()),
            ),
        },
        ComponentTemplate {
            component_type: ComponentType::SkillItem,
            root_tag: "div".into(),
            fields: vec![
                FieldSpec::span("icon", "skill-icon", "⚡"),
                FieldSpec::heading("title", "Skill"),
                FieldSpec::paragraph("description", "Skill Beschreibung"),
            ],
            display_field: title.clone(),
            section: section(
                "skills-section",
                "skills-grid",
                "Skills",
                ComponentType::SkillItem,
                true,
                SectionAnchor::After("projects-section".into()),
            ),
        },
        ComponentTemplate {
            component_type: ComponentType::TutorialCard,
            root_tag: "div".into(),
            fields: vec![
                FieldSpec::span("icon", "tutorial-icon", "📚").in_group("tutorial-thumbnail"),
                FieldSpec::heading("title", "Tutorial Titel").in_group("tutorial-content"),
                FieldSpec::paragraph("description", "Tutorial Beschreibung")
                    .in_group("tutorial-content"),
                FieldSpec::span("level", "tutorial-level", "Anfänger").in_group("tutorial-meta"),
                FieldSpec::span("duration", "tutorial-duration", "15 Min")
                    .in_group("tutorial-meta"),
            ],
            display_field: title.clone(),
            section: section(
                "tutorials-section",
                "tutorials-grid",
                "Tutorials",
                ComponentType::TutorialCard,
                false,
                SectionAnchor::After("skills-section".into()),
            ),
        },
        ComponentTemplate {
            component_type: ComponentType::SocialLink,
            root_tag: "div".into(),
            fields: vec![
                FieldSpec::span("icon", "social-emoji", "🔗"),
                FieldSpec::subheading("title", "Plattform"),
                FieldSpec::span("handle", "social-handle", "@username"),
                FieldSpec::span("url", "social-url", "https://example.com"),
            ],
            display_field: title.clone(),
            section: section(
                "social-section",
                "social-links-grid",
                "Social Media",
                ComponentType::SocialLink,
                false,
                SectionAnchor::Last,
            ),
        },
        ComponentTemplate {
            component_type: ComponentType::UpdateItem,
            root_tag: "div".into(),
            fields: vec![
                FieldSpec::block("date", "update-date", "📅 Datum"),
                FieldSpec::subheading("title", "Update Titel"),
                FieldSpec::paragraph("description", "Update Beschreibung"),
            ],
            display_field: title.clone(),
            section: SectionSpec {
                extra_classes: vec!["dark-section".into()],
                ..section(
                    "updates-section",
                    "updates-grid",
                    "Neueste Updates",
                    ComponentType::UpdateItem,
                    false,
                    SectionAnchor::Last,
                )
            },
        },
        ComponentTemplate {
            component_type: ComponentType::KnowledgeCategory,
            root_tag: "div".into(),
            fields: vec![
                FieldSpec::span("icon", "knowledge-icon", "🧠"),
                FieldSpec::heading("title", "Wissensbereich"),
                FieldSpec::paragraph("description", "Beschreibung des Wissensbereichs"),
                FieldSpec::span("topic1", "topic-tag", "Thema 1").in_group("knowledge-topics"),
                FieldSpec::span("topic2", "topic-tag", "Thema 2").in_group("knowledge-topics"),
            ],
            display_field: title,
            section: section(
                "knowledge-section",
                "knowledge-grid",
                "Wissensdatenbank",
                ComponentType::KnowledgeCategory,
                false,
                SectionAnchor::Last,
            ),
        },
    ]
}
