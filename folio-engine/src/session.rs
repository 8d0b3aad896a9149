//! The builder session: one configuration store and one page, mutated together.

use crate::action::{Action, EditForm, FormField, Notification, Outcome, Target};
use crate::error::{EngineError, EngineResult, Mismatch};
use crate::import::{ImportSlot, ImportTicket};
use crate::markup::{ATTR_ACTION, ATTR_COMPONENT, ATTR_COMPONENT_ID, ATTR_CONTENTEDITABLE};
use crate::page::Page;
use chrono::{DateTime, Utc};
use folio_dom::{Document, NodeId, Selector};
use folio_model::{
    ComponentRecord, ComponentTemplate, Configuration, ConfigurationStore, FieldMap, Settings,
    TemplateRegistry,
};
use folio_types::{
    ChangeEvent, ChangePayload, Clock, ComponentId, ComponentType, Direction, SystemClock,
    Timestamp,
};
use std::collections::{BTreeSet, VecDeque};
use tracing::{debug, info, warn};

/// Appended to the display field of a duplicated component.
pub const COPY_MARKER: &str = " (Kopie)";

#[derive(Debug, Clone, PartialEq, Eq)]
struct InlineEdit {
    id: ComponentId,
    field: String,
    node: NodeId,
}

/// An explicitly constructed builder: the single writer of both the
/// configuration store and the rendered page.
///
/// Every operation either completes on both sides or fails before touching
/// either. Page order is authoritative; the records' `order` is recomputed
/// from it after every move and before every export.
pub struct BuilderSession {
    registry: TemplateRegistry,
    page: Page,
    store: ConfigurationStore,
    clock: Box<dyn Clock>,
    imports: ImportSlot,
    inline: Option<InlineEdit>,
    events: Vec<ChangeEvent>,
    notifications: VecDeque<Notification>,
}

impl BuilderSession {
    /// Creates a session rendering the page skeleton for `registry`.
    pub fn new(
        registry: TemplateRegistry,
        settings: Settings,
        clock: Box<dyn Clock>,
    ) -> EngineResult<Self> {
        let page = Page::new(&registry)?;
        Ok(Self {
            registry,
            page,
            store: ConfigurationStore::new(settings),
            clock,
            imports: ImportSlot::new(),
            inline: None,
            events: Vec::new(),
            notifications: VecDeque::new(),
        })
    }

    /// A session with the built-in templates, default settings and the system clock.
    pub fn with_defaults() -> EngineResult<Self> {
        Self::new(
            TemplateRegistry::builtin(),
            Settings::default(),
            Box::new(SystemClock),
        )
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn document(&self) -> &Document {
        self.page.document()
    }

    pub fn store(&self) -> &ConfigurationStore {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }

    pub fn records(&self) -> &[ComponentRecord] {
        self.store.records()
    }

    pub fn record(&self, id: &ComponentId) -> Option<&ComponentRecord> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    // ── Component operations ─────────────────────────────────────

    /// Adds a component of `component_type` to its default container,
    /// synthesizing the container's section when it is not on the page.
    /// Fields missing from `initial` keep the template default.
    pub fn add(
        &mut self,
        component_type: ComponentType,
        initial: Option<FieldMap>,
    ) -> EngineResult<ComponentId> {
        let template = self.registry.get(component_type)?.clone();
        let (container, created) = self.page.ensure_section(&template.section)?;
        if created {
            self.record_event(ChangePayload::SectionCreated {
                section: template.section.name.clone(),
            });
        }
        self.place(&template, container, initial.unwrap_or_default())
    }

    /// Adds a component into an explicit container element, which must be a
    /// section grid outside any component.
    pub fn add_to(
        &mut self,
        component_type: ComponentType,
        container: NodeId,
        initial: Option<FieldMap>,
    ) -> EngineResult<ComponentId> {
        let template = self.registry.get(component_type)?.clone();
        if !self.page.is_grid(container, &self.registry) {
            return Err(EngineError::ContainerNotFound(container.to_string()));
        }
        self.place(&template, container, initial.unwrap_or_default())
    }

    /// Writes field values into the instance and its record. Fields not in
    /// `updates` are untouched; fields unknown to the template are ignored.
    pub fn edit(&mut self, id: &ComponentId, updates: &FieldMap) -> EngineResult<()> {
        let instance = self.require_instance(id)?;
        let record = self
            .store
            .get(id)
            .ok_or_else(|| EngineError::NotFound(id.clone()))?;
        let template = self.registry.get(record.component_type)?;

        let accepted = filter_fields(template, updates);
        for (name, value) in &accepted {
            if let Some(node) = self.page.field(instance, name) {
                self.page.document_mut().set_text(node, value.as_str())?;
            }
        }
        let at = self.clock.now();
        self.store.apply_fields(id, &accepted, at)?;

        debug!("Edited {} ({} fields)", id, accepted.len());
        self.record_event(ChangePayload::ComponentUpdated {
            id: id.clone(),
            fields: accepted.into_keys().collect(),
        });
        Ok(())
    }

    /// Removes a component's record and instance. A second call for the same
    /// id fails with [`EngineError::NotFound`].
    pub fn delete(&mut self, id: &ComponentId) -> EngineResult<()> {
        let instance = self.require_instance(id)?;
        self.store.remove(id)?;
        self.page.document_mut().remove(instance)?;
        if self.inline.as_ref().is_some_and(|edit| &edit.id == id) {
            self.inline = None;
        }

        debug!("Deleted {}", id);
        self.record_event(ChangePayload::ComponentRemoved { id: id.clone() });
        Ok(())
    }

    /// Adds a copy of a component to the same container. The display field
    /// gets [`COPY_MARKER`] appended.
    pub fn duplicate(&mut self, id: &ComponentId) -> EngineResult<ComponentId> {
        let instance = self.require_instance(id)?;
        let record = self
            .store
            .get(id)
            .ok_or_else(|| EngineError::NotFound(id.clone()))?;
        let template = self.registry.get(record.component_type)?.clone();
        let container = self
            .document()
            .parent(instance)
            .ok_or_else(|| EngineError::ContainerNotFound(instance.to_string()))?;

        let mut data = record.data.clone();
        if let Some(field) = &template.display_field {
            if let Some(value) = data.get_mut(field) {
                value.push_str(COPY_MARKER);
            }
        }
        let copy = self.place(&template, container, data)?;
        debug!("Duplicated {} as {}", id, copy);
        Ok(copy)
    }

    /// Swaps a component with its neighbour. Returns `Ok(false)` without
    /// changing anything when there is no neighbour in that direction.
    pub fn move_component(&mut self, id: &ComponentId, direction: Direction) -> EngineResult<bool> {
        let instance = self.require_instance(id)?;
        let up = direction == Direction::Up;
        let Some(neighbour) = self.page.sibling_instance(instance, up) else {
            debug!("{} is already at the {} boundary", id, direction);
            return Ok(false);
        };
        self.swap(instance, neighbour, up)?;
        self.recompute_order();

        self.record_event(ChangePayload::ComponentMoved {
            id: id.clone(),
            direction,
        });
        Ok(true)
    }

    // ── Section operations ───────────────────────────────────────

    /// Adds the section's child type into the section's own grid.
    pub fn add_child(&mut self, section: &str) -> EngineResult<ComponentId> {
        let spec = self
            .registry
            .section(section)
            .ok_or_else(|| EngineError::SectionNotFound(section.to_string()))?
            .clone();
        let node = self
            .page
            .section(section)
            .ok_or_else(|| EngineError::SectionNotFound(section.to_string()))?;
        let grid = self
            .document()
            .find_first(node, &Selector::class(&spec.container_class))
            .ok_or_else(|| EngineError::ContainerNotFound(spec.container_class.clone()))?;
        self.add_to(spec.child_type, grid, None)
    }

    /// Writes a section's heading text. Headings live only in the page.
    pub fn edit_section(&mut self, section: &str, updates: &FieldMap) -> EngineResult<()> {
        let node = self.require_section(section)?;
        let spec = self
            .registry
            .section(section)
            .ok_or_else(|| EngineError::SectionNotFound(section.to_string()))?;
        for name in updates.keys().filter(|name| **name != spec.title_field) {
            debug!("Section {} has no field {}", section, name);
        }
        let Some(value) = updates.get(&spec.title_field) else {
            return Ok(());
        };
        match self.page.heading(node, spec) {
            Some(heading) => self.page.document_mut().set_text(heading, value.as_str())?,
            None => debug!("Section {} has no heading", section),
        }
        Ok(())
    }

    /// Swaps a section with the neighbouring section. Silent no-op at the boundary.
    pub fn move_section(&mut self, section: &str, direction: Direction) -> EngineResult<bool> {
        let node = self.require_section(section)?;
        let up = direction == Direction::Up;
        let Some(neighbour) = self.page.sibling_section(node, up, &self.registry) else {
            debug!("Section {} is already at the {} boundary", section, direction);
            return Ok(false);
        };
        self.swap(node, neighbour, up)?;
        self.recompute_order();

        self.record_event(ChangePayload::SectionMoved {
            section: section.to_string(),
            direction,
        });
        Ok(true)
    }

    /// Removes a section together with every component in it. Returns the
    /// number of components removed.
    pub fn delete_section(&mut self, section: &str) -> EngineResult<usize> {
        let node = self.require_section(section)?;
        let ids: Vec<ComponentId> = self
            .page
            .instances_in(node)
            .into_iter()
            .filter_map(|n| self.page.instance_id(n))
            .collect();

        for id in &ids {
            if self.store.contains(id) {
                self.store.remove(id)?;
            }
        }
        self.page.document_mut().remove(node)?;
        if self
            .inline
            .as_ref()
            .is_some_and(|edit| !self.document().contains(edit.node))
        {
            self.inline = None;
        }

        debug!("Deleted section {} with {} components", section, ids.len());
        for id in &ids {
            self.record_event(ChangePayload::ComponentRemoved { id: id.clone() });
        }
        self.record_event(ChangePayload::SectionRemoved {
            section: section.to_string(),
        });
        Ok(ids.len())
    }

    // ── Bulk operations ──────────────────────────────────────────

    /// Rewrites every record's `order` from page order. Returns the number
    /// of records that had no rendered instance.
    pub fn recompute_order(&mut self) -> usize {
        let ids = self.page.instance_ids();
        let unplaced = self.store.reorder(ids.iter());
        if unplaced > 0 {
            warn!("{} records have no rendered instance", unplaced);
        }
        unplaced
    }

    /// Replaces every component and the settings with the given configuration.
    ///
    /// Records are replayed ascending by `order` (missing counts as 0, ties
    /// keep document position). Ids and timestamps are preserved; an id seen
    /// twice gets a fresh one. Fails before any change if a record's type has
    /// no template.
    pub fn reload(&mut self, configuration: Configuration) -> EngineResult<usize> {
        for record in &configuration.components {
            self.registry.get(record.component_type)?;
        }

        self.inline = None;
        let removed = self.page.clear_dynamic(&self.registry)?;
        self.store.clear();
        self.store.set_settings(configuration.settings);

        let mut records = configuration.components;
        records.sort_by_key(ComponentRecord::sort_key);
        let count = records.len();

        for record in records {
            let template = self.registry.get(record.component_type)?.clone();
            let (container, created) = self.page.ensure_section(&template.section)?;
            if created {
                self.record_event(ChangePayload::SectionCreated {
                    section: template.section.name.clone(),
                });
            }
            let id = if self.store.contains(&record.id) {
                let fresh = self.fresh_id(record.created_at);
                warn!("Duplicate id {} in configuration, assigned {}", record.id, fresh);
                fresh
            } else {
                record.id
            };

            let mut data = template.default_data();
            data.extend(filter_fields(&template, &record.data));
            let node = self.page.render_component(&template, &id, &data)?;
            self.page.document_mut().append_child(container, node)?;
            self.store.insert(ComponentRecord {
                id,
                component_type: record.component_type,
                data,
                order: None,
                created_at: record.created_at,
                modified_at: record.modified_at,
            })?;
        }
        self.recompute_order();

        info!("Reloaded {} components (replaced {})", count, removed);
        self.record_event(ChangePayload::Reloaded { components: count });
        Ok(count)
    }

    /// Serializes the session after recomputing page order.
    pub fn export_document(&mut self) -> EngineResult<String> {
        self.recompute_order();
        let at = self.export_time();
        let text = folio_codec::encode(&self.store.snapshot(), at)?;
        info!("Exported {} components", self.store.len());
        Ok(text)
    }

    /// File name for an export made now.
    pub fn export_filename(&self) -> String {
        folio_codec::export_filename(self.export_time())
    }

    /// The configuration as it would be exported.
    pub fn snapshot(&mut self) -> Configuration {
        self.recompute_order();
        self.store.snapshot()
    }

    /// Decodes and reloads a document. Nothing changes if decoding fails.
    pub fn import_document(&mut self, text: &str) -> EngineResult<usize> {
        let now = self.clock.now();
        let configuration = folio_codec::decode(text, now)?;
        self.reload(configuration)
    }

    /// Registers the start of an asynchronous file read.
    pub fn begin_import(&mut self) -> ImportTicket {
        self.imports.begin()
    }

    /// Delivers the text of a finished read. Returns `Ok(None)` if a later
    /// import has started since (the stale result is dropped).
    pub fn complete_import(
        &mut self,
        ticket: ImportTicket,
        text: &str,
    ) -> EngineResult<Option<usize>> {
        if !self.imports.complete(ticket) {
            warn!("Dropping stale import {:?}", ticket);
            return Ok(None);
        }
        match self.import_document(text) {
            Ok(count) => {
                self.notify(Notification::success(format!(
                    "Konfiguration mit {count} Komponenten importiert"
                )));
                Ok(Some(count))
            }
            Err(err) => {
                self.notify(Notification::error(format!("Import fehlgeschlagen: {err}")));
                Err(err)
            }
        }
    }

    /// The user closed the file dialog without choosing a file.
    pub fn abandon_import(&mut self, ticket: ImportTicket) {
        self.imports.abandon(ticket);
    }

    // ── Settings ─────────────────────────────────────────────────

    pub fn set_colors(&mut self, primary: Option<&str>, accent: Option<&str>) {
        if let Some(primary) = primary {
            self.store.set_primary_color(primary);
        }
        if let Some(accent) = accent {
            self.store.set_accent_color(accent);
        }
        self.record_event(ChangePayload::SettingsChanged);
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.store.set_dark_mode(dark_mode);
        self.record_event(ChangePayload::SettingsChanged);
    }

    // ── Inline editing ───────────────────────────────────────────

    /// Makes a field editable in place. An inline edit already in progress
    /// is finished first.
    pub fn begin_inline_edit(&mut self, id: &ComponentId, field: &str) -> EngineResult<()> {
        self.finish_inline_edit()?;
        let instance = self.require_instance(id)?;
        let node = self
            .page
            .field(instance, field)
            .filter(|_| self.declares_field(id, field))
            .ok_or_else(|| EngineError::FieldNotFound {
                id: id.clone(),
                field: field.to_string(),
            })?;
        self.page
            .document_mut()
            .element_mut(node)?
            .set_attr(ATTR_CONTENTEDITABLE, "true");
        self.inline = Some(InlineEdit {
            id: id.clone(),
            field: field.to_string(),
            node,
        });
        Ok(())
    }

    /// Replaces the rendered text of the field being edited. The record is
    /// only updated when the edit finishes.
    pub fn type_inline_text(&mut self, text: &str) -> EngineResult<()> {
        let node = self.inline.as_ref().ok_or(EngineError::NoInlineEdit)?.node;
        self.page.document_mut().set_text(node, text)?;
        Ok(())
    }

    /// Ends the inline edit (blur or Enter) and folds the rendered text into
    /// the record. Returns false if no edit was in progress.
    pub fn finish_inline_edit(&mut self) -> EngineResult<bool> {
        let Some(edit) = self.inline.take() else {
            return Ok(false);
        };
        let Ok(element) = self.page.document_mut().element_mut(edit.node) else {
            return Ok(false);
        };
        element.remove_attr(ATTR_CONTENTEDITABLE);
        let value = self.document().text_content(edit.node);
        let mut updates = FieldMap::new();
        updates.insert(edit.field, value);
        self.edit(&edit.id, &updates)?;
        Ok(true)
    }

    /// The component and field being edited in place, if any.
    pub fn inline_edit(&self) -> Option<(&ComponentId, &str)> {
        self.inline
            .as_ref()
            .map(|edit| (&edit.id, edit.field.as_str()))
    }

    // ── Dispatch ─────────────────────────────────────────────────

    /// Runs an action against a component or section and queues a
    /// notification describing the result.
    pub fn invoke(&mut self, action: Action, target: &Target) -> EngineResult<Outcome> {
        let result = self.run(action, target);
        let notification = match &result {
            Ok(outcome) => outcome_notification(action, outcome),
            Err(err) => Some(Notification::error(err.to_string())),
        };
        if let Some(notification) = notification {
            self.notify(notification);
        }
        result
    }

    /// Delegated click handling: resolves the control button and the
    /// component or section around `node`. Returns `Ok(None)` when the
    /// click did not land on a control.
    pub fn dispatch_click(&mut self, node: NodeId) -> EngineResult<Option<Outcome>> {
        let Some((action, target)) = self.resolve_click(node) else {
            return Ok(None);
        };
        debug!("Dispatching {} on {}", action, target);
        self.invoke(action, &target).map(Some)
    }

    /// Opens the edit form for a component or section.
    pub fn edit_form(&self, target: &Target) -> EngineResult<EditForm> {
        let fields = match target {
            Target::Component(id) => {
                let record = self
                    .store
                    .get(id)
                    .ok_or_else(|| EngineError::NotFound(id.clone()))?;
                let template = self.registry.get(record.component_type)?;
                template
                    .field_names()
                    .map(|name| FormField::new(name, record.field(name).unwrap_or_default()))
                    .collect()
            }
            Target::Section(name) => {
                let node = self.require_section(name)?;
                let spec = self
                    .registry
                    .section(name)
                    .ok_or_else(|| EngineError::SectionNotFound(name.clone()))?;
                let value = self
                    .page
                    .heading(node, spec)
                    .map(|f| self.document().text_content(f))
                    .unwrap_or_default();
                vec![FormField::new(&spec.title_field, &value)]
            }
        };
        Ok(EditForm {
            target: target.clone(),
            fields,
        })
    }

    /// Saves an edit form.
    pub fn apply_form(&mut self, form: &EditForm) -> EngineResult<()> {
        let updates: FieldMap = form
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect();
        let result = match &form.target {
            Target::Component(id) => self.edit(id, &updates),
            Target::Section(name) => self.edit_section(name, &updates),
        };
        match &result {
            Ok(()) => self.notify(Notification::success("Änderungen gespeichert")),
            Err(err) => self.notify(Notification::error(err.to_string())),
        }
        result
    }

    // ── Observation ──────────────────────────────────────────────

    /// Verifies that every record has exactly one rendered instance of the
    /// same type and vice versa.
    pub fn check_reconciliation(&self) -> Result<(), Mismatch> {
        let mut seen = BTreeSet::new();
        for node in self.page.instances() {
            let Some(id) = self.page.instance_id(node) else {
                continue;
            };
            if !seen.insert(id.clone()) {
                return Err(Mismatch::DuplicateInstance(id));
            }
            let Some(record) = self.store.get(&id) else {
                return Err(Mismatch::OrphanInstance(id));
            };
            let rendered = self
                .document()
                .get(node)
                .and_then(|e| e.attr(ATTR_COMPONENT))
                .unwrap_or_default();
            if rendered != record.component_type.as_str() {
                return Err(Mismatch::TypeMismatch {
                    id,
                    rendered: rendered.to_string(),
                    stored: record.component_type,
                });
            }
        }
        match self.store.ids().find(|id| !seen.contains(*id)) {
            Some(id) => Err(Mismatch::MissingInstance(id.clone())),
            None => Ok(()),
        }
    }

    pub fn events(&self) -> &[ChangeEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    // ── Internals ────────────────────────────────────────────────

    fn place(
        &mut self,
        template: &ComponentTemplate,
        container: NodeId,
        initial: FieldMap,
    ) -> EngineResult<ComponentId> {
        let created_at = self.clock.now();
        let id = self.fresh_id(created_at);
        let mut data = template.default_data();
        data.extend(filter_fields(template, &initial));

        let node = self.page.render_component(template, &id, &data)?;
        self.page.document_mut().append_child(container, node)?;
        self.store.insert(ComponentRecord::new(
            id.clone(),
            template.component_type,
            data,
            created_at,
        ))?;

        debug!("Added {} ({})", id, template.component_type);
        self.record_event(ChangePayload::ComponentAdded {
            id: id.clone(),
            component_type: template.component_type,
        });
        Ok(id)
    }

    fn run(&mut self, action: Action, target: &Target) -> EngineResult<Outcome> {
        match (action, target) {
            (Action::Edit, _) => self.edit_form(target).map(Outcome::Form),
            (Action::Delete, Target::Component(id)) => self.delete(id).map(|()| Outcome::Removed(1)),
            (Action::Delete, Target::Section(name)) => {
                self.delete_section(name).map(Outcome::Removed)
            }
            (Action::Duplicate, Target::Component(id)) => self.duplicate(id).map(Outcome::Added),
            (Action::MoveUp, Target::Component(id)) => {
                self.move_component(id, Direction::Up).map(Outcome::Moved)
            }
            (Action::MoveDown, Target::Component(id)) => {
                self.move_component(id, Direction::Down).map(Outcome::Moved)
            }
            (Action::MoveUp, Target::Section(name)) => {
                self.move_section(name, Direction::Up).map(Outcome::Moved)
            }
            (Action::MoveDown, Target::Section(name)) => {
                self.move_section(name, Direction::Down).map(Outcome::Moved)
            }
            (Action::AddChild, Target::Section(name)) => self.add_child(name).map(Outcome::Added),
            (Action::Duplicate, Target::Section(_)) | (Action::AddChild, Target::Component(_)) => {
                Err(EngineError::Unsupported {
                    action: action.to_string(),
                    target: target.to_string(),
                })
            }
        }
    }

    fn resolve_click(&self, node: NodeId) -> Option<(Action, Target)> {
        let doc = self.document();
        let button = doc.closest(node, &Selector::attr(ATTR_ACTION))?;
        let action = match doc.get(button)?.attr(ATTR_ACTION)?.parse::<Action>() {
            Ok(action) => action,
            Err(err) => {
                debug!("Ignoring click: {}", err);
                return None;
            }
        };
        if let Some(instance) = doc.closest(button, &Selector::attr(ATTR_COMPONENT_ID)) {
            return Some((action, Target::Component(self.page.instance_id(instance)?)));
        }
        let section = doc.closest(button, &Selector::attr(ATTR_COMPONENT))?;
        let name = self.page.section_name(section)?;
        Some((action, Target::Section(name.to_string())))
    }

    fn swap(&mut self, node: NodeId, neighbour: NodeId, up: bool) -> EngineResult<()> {
        let doc = self.page.document_mut();
        if up {
            doc.insert_before(neighbour, node)?;
        } else {
            doc.insert_after(neighbour, node)?;
        }
        Ok(())
    }

    /// Draws ids until one is unused by both the store and the page.
    fn fresh_id(&self, seed: Timestamp) -> ComponentId {
        loop {
            let id = ComponentId::generate(seed);
            if !self.store.contains(&id) && self.page.instance(&id).is_none() {
                return id;
            }
            warn!("Generated id {} collides, drawing again", id);
        }
    }

    fn require_instance(&self, id: &ComponentId) -> EngineResult<NodeId> {
        self.page
            .instance(id)
            .ok_or_else(|| EngineError::NotFound(id.clone()))
    }

    fn require_section(&self, name: &str) -> EngineResult<NodeId> {
        self.page
            .section(name)
            .ok_or_else(|| EngineError::SectionNotFound(name.to_string()))
    }

    fn declares_field(&self, id: &ComponentId, field: &str) -> bool {
        self.store
            .get(id)
            .and_then(|r| self.registry.get(r.component_type).ok())
            .is_some_and(|t| t.has_field(field))
    }

    fn export_time(&self) -> DateTime<Utc> {
        let now = self.clock.now();
        DateTime::from_timestamp_millis(now.as_millis()).unwrap_or_else(Utc::now)
    }

    fn record_event(&mut self, payload: ChangePayload) {
        let timestamp = self.clock.now();
        self.events.push(ChangeEvent::new(timestamp, payload));
    }

    fn notify(&mut self, notification: Notification) {
        debug!("Notify {:?}: {}", notification.level, notification.message);
        self.notifications.push_back(notification);
    }
}

fn filter_fields(template: &ComponentTemplate, updates: &FieldMap) -> FieldMap {
    updates
        .iter()
        .filter(|(name, _)| {
            let known = template.has_field(name);
            if !known {
                debug!("Ignoring unknown field {} for {}", name, template.component_type);
            }
            known
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

fn outcome_notification(action: Action, outcome: &Outcome) -> Option<Notification> {
    match (action, outcome) {
        (_, Outcome::Form(_)) => None,
        (Action::Duplicate, Outcome::Added(_)) => {
            Some(Notification::success("Komponente dupliziert"))
        }
        (_, Outcome::Added(_)) => Some(Notification::success("Komponente hinzugefügt")),
        (_, Outcome::Removed(n)) if *n > 1 => Some(Notification::success(format!(
            "Bereich mit {n} Komponenten gelöscht"
        ))),
        (_, Outcome::Removed(_)) => Some(Notification::success("Gelöscht")),
        (_, Outcome::Moved(true)) => Some(Notification::success("Verschoben")),
        (_, Outcome::Moved(false)) => Some(Notification::info("Bereits am Rand")),
    }
}
