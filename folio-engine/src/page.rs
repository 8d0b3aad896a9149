//! The component instance tree: the rendered page and its lookups.

use crate::markup::{self, ATTR_COMPONENT, ATTR_COMPONENT_ID, ATTR_FIELD, CLASS_SECTION};
use crate::{EngineError, EngineResult};
use folio_dom::{Document, DomResult, NodeId, Selector};
use folio_model::{ComponentTemplate, FieldMap, SectionAnchor, SectionSpec, TemplateRegistry};
use folio_types::ComponentId;
use tracing::debug;

/// The live page. Components are the elements carrying `data-component-id`;
/// sections are the top-level `.section` elements.
#[derive(Debug, Clone)]
pub struct Page {
    doc: Document,
}

impl Page {
    /// Renders the initial page skeleton.
    pub fn new(registry: &TemplateRegistry) -> DomResult<Self> {
        Ok(Self {
            doc: markup::skeleton(registry)?,
        })
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub(crate) fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// The page container (`main#website-container`).
    pub fn root(&self) -> NodeId {
        self.doc.root()
    }

    // ── Sections ─────────────────────────────────────────────────

    /// Top-level sections in page order.
    pub fn sections(&self) -> Vec<NodeId> {
        let root = self.doc.root();
        self.doc
            .children(root)
            .iter()
            .copied()
            .filter(|n| self.is_section(*n))
            .collect()
    }

    pub fn section(&self, name: &str) -> Option<NodeId> {
        self.sections()
            .into_iter()
            .find(|n| self.section_name(*n) == Some(name))
    }

    pub fn section_name(&self, node: NodeId) -> Option<&str> {
        self.doc.get(node).and_then(|e| e.attr(ATTR_COMPONENT))
    }

    fn is_section(&self, node: NodeId) -> bool {
        self.doc.matches(
            node,
            &Selector::All(vec![
                Selector::class(CLASS_SECTION),
                Selector::attr(ATTR_COMPONENT),
            ]),
        )
    }

    /// The grid a section's components live in.
    pub fn grid(&self, spec: &SectionSpec) -> Option<NodeId> {
        self.doc
            .find_first(self.doc.root(), &Selector::class(&spec.container_class))
    }

    /// Whether `node` is an attached grid of some registered section, outside
    /// any rendered component.
    pub fn is_grid(&self, node: NodeId, registry: &TemplateRegistry) -> bool {
        let Some(element) = self.doc.get(node) else {
            return false;
        };
        self.doc.is_attached(node)
            && registry
                .sections()
                .iter()
                .any(|spec| element.has_class(&spec.container_class))
            && self
                .doc
                .closest(node, &Selector::attr(ATTR_COMPONENT_ID))
                .is_none()
    }

    /// The section's own heading element. Fields of components inside the
    /// section never match.
    pub fn heading(&self, section: NodeId, spec: &SectionSpec) -> Option<NodeId> {
        self.field(section, &spec.title_field).filter(|node| {
            self.doc
                .closest(*node, &Selector::attr(ATTR_COMPONENT_ID))
                .is_none()
        })
    }

    /// Returns the section's grid, synthesizing the section first if it is
    /// not on the page. The flag tells whether a section was created.
    pub(crate) fn ensure_section(&mut self, spec: &SectionSpec) -> EngineResult<(NodeId, bool)> {
        if let Some(grid) = self.grid(spec) {
            return Ok((grid, false));
        }
        if self.section(&spec.name).is_some() {
            return Err(EngineError::ContainerNotFound(spec.container_class.clone()));
        }

        let anchor = match &spec.anchor {
            SectionAnchor::After(name) => self.section(name),
            SectionAnchor::Last => None,
        }
        .or_else(|| self.sections().last().copied());

        let node = markup::section(&mut self.doc, spec)?;
        match anchor {
            Some(anchor) => self.doc.insert_after(anchor, node)?,
            None => self.doc.append_child(self.doc.root(), node)?,
        }
        debug!("Synthesized section {}", spec.name);

        let grid = self
            .grid(spec)
            .ok_or_else(|| EngineError::ContainerNotFound(spec.container_class.clone()))?;
        Ok((grid, true))
    }

    // ── Components ───────────────────────────────────────────────

    pub fn instance(&self, id: &ComponentId) -> Option<NodeId> {
        self.doc.find_first(
            self.doc.root(),
            &Selector::attr_eq(ATTR_COMPONENT_ID, id.as_str()),
        )
    }

    /// All component nodes in page order.
    pub fn instances(&self) -> Vec<NodeId> {
        self.doc
            .find_all(self.doc.root(), &Selector::attr(ATTR_COMPONENT_ID))
    }

    pub fn instance_id(&self, node: NodeId) -> Option<ComponentId> {
        self.doc
            .get(node)
            .and_then(|e| e.attr(ATTR_COMPONENT_ID))
            .and_then(|s| ComponentId::parse(s).ok())
    }

    /// Ids of all rendered components in page order.
    pub fn instance_ids(&self) -> Vec<ComponentId> {
        self.instances()
            .into_iter()
            .filter_map(|n| self.instance_id(n))
            .collect()
    }

    /// Component nodes inside a subtree, in order.
    pub fn instances_in(&self, scope: NodeId) -> Vec<NodeId> {
        self.doc.find_all(scope, &Selector::attr(ATTR_COMPONENT_ID))
    }

    /// The element rendering a field, searched within `scope`.
    pub fn field(&self, scope: NodeId, name: &str) -> Option<NodeId> {
        self.doc
            .find_first(scope, &Selector::attr_eq(ATTR_FIELD, name))
    }

    /// Reads the rendered value of every schema field of an instance.
    /// Markers not declared by the template are ignored.
    pub fn read_fields(&self, instance: NodeId, template: &ComponentTemplate) -> FieldMap {
        template
            .field_names()
            .filter_map(|name| {
                self.field(instance, name)
                    .map(|node| (name.to_string(), self.doc.text_content(node)))
            })
            .collect()
    }

    pub(crate) fn render_component(
        &mut self,
        template: &ComponentTemplate,
        id: &ComponentId,
        data: &FieldMap,
    ) -> DomResult<NodeId> {
        markup::component(&mut self.doc, template, id, data)
    }

    /// Neighbouring component among the node's siblings.
    pub(crate) fn sibling_instance(&self, node: NodeId, up: bool) -> Option<NodeId> {
        self.sibling_matching(node, up, |page, n| page.instance_id(n).is_some())
    }

    /// Neighbouring top-level section whose name is known to the registry.
    pub(crate) fn sibling_section(
        &self,
        node: NodeId,
        up: bool,
        registry: &TemplateRegistry,
    ) -> Option<NodeId> {
        self.sibling_matching(node, up, |page, n| {
            page.section_name(n)
                .is_some_and(|name| registry.section(name).is_some())
        })
    }

    fn sibling_matching(
        &self,
        node: NodeId,
        up: bool,
        accept: impl Fn(&Self, NodeId) -> bool,
    ) -> Option<NodeId> {
        let mut current = node;
        loop {
            current = if up {
                self.doc.previous_sibling(current)?
            } else {
                self.doc.next_sibling(current)?
            };
            if accept(self, current) {
                return Some(current);
            }
        }
    }

    /// Removes every component and every section that is not part of the
    /// skeleton. Returns the number of components dropped.
    pub(crate) fn clear_dynamic(&mut self, registry: &TemplateRegistry) -> DomResult<usize> {
        let instances = self.instances();
        let count = instances.len();
        for node in instances {
            if self.doc.contains(node) {
                self.doc.remove(node)?;
            }
        }
        for node in self.sections() {
            let dynamic = self
                .section_name(node)
                .and_then(|name| registry.section(name))
                .is_some_and(|spec| !spec.is_static);
            if dynamic {
                self.doc.remove(node)?;
            }
        }
        Ok(count)
    }
}
