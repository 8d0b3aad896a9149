use crate::{ComponentRecord, Configuration, FieldMap, ModelError, ModelResult, Settings};
use folio_types::{ComponentId, Timestamp};

/// The authoritative ordered list of component records plus page settings.
///
/// Ids are unique for the lifetime of the store. The `order` of each record
/// is a cache of its position in the instance tree and is only written by
/// [`ConfigurationStore::reorder`].
#[derive(Debug, Clone, Default)]
pub struct ConfigurationStore {
    settings: Settings,
    records: Vec<ComponentRecord>,
}

impl ConfigurationStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            records: Vec::new(),
        }
    }

    // ── Records ──────────────────────────────────────────────────

    /// Appends a record. Fails if a record with the same id exists.
    pub fn insert(&mut self, record: ComponentRecord) -> ModelResult<()> {
        if self.contains(&record.id) {
            return Err(ModelError::DuplicateId(record.id));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn get(&self, id: &ComponentId) -> Option<&ComponentRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.position(id).is_some()
    }

    /// Removes and returns a record.
    pub fn remove(&mut self, id: &ComponentId) -> ModelResult<ComponentRecord> {
        let index = self
            .position(id)
            .ok_or_else(|| ModelError::NotFound(id.clone()))?;
        Ok(self.records.remove(index))
    }

    /// Writes the given field values into a record and stamps `lastModified`.
    /// Fields not named in `updates` are left as they are.
    pub fn apply_fields(
        &mut self,
        id: &ComponentId,
        updates: &FieldMap,
        at: Timestamp,
    ) -> ModelResult<()> {
        let record = self.get_mut(id)?;
        for (field, value) in updates {
            record.data.insert(field.clone(), value.clone());
        }
        record.modified_at = Some(at);
        Ok(())
    }

    /// Rewrites `order` from a page-order id sequence and sorts the records
    /// to match. Records missing from the sequence keep their relative order
    /// after the placed ones; their count is returned.
    pub fn reorder<'a>(&mut self, page_order: impl IntoIterator<Item = &'a ComponentId>) -> usize {
        let mut placed = Vec::with_capacity(self.records.len());
        for id in page_order {
            if let Some(index) = self.position(id) {
                placed.push(self.records.remove(index));
            }
        }
        let unplaced = self.records.len();
        placed.append(&mut self.records);
        for (index, record) in placed.iter_mut().enumerate() {
            record.order = Some(index as i64);
        }
        self.records = placed;
        unplaced
    }

    /// Drops every record. Settings are kept.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[ComponentRecord] {
        &self.records
    }

    pub fn ids(&self) -> impl Iterator<Item = &ComponentId> {
        self.records.iter().map(|r| &r.id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ── Settings ─────────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn set_primary_color(&mut self, color: impl Into<String>) {
        self.settings.colors.primary = color.into();
    }

    pub fn set_accent_color(&mut self, color: impl Into<String>) {
        self.settings.colors.accent = color.into();
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.settings.dark_mode = dark_mode;
    }

    /// Copies the store into a serializable configuration.
    pub fn snapshot(&self) -> Configuration {
        Configuration::new(self.settings.clone(), self.records.clone())
    }

    fn position(&self, id: &ComponentId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }

    fn get_mut(&mut self, id: &ComponentId) -> ModelResult<&mut ComponentRecord> {
        self.records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| ModelError::NotFound(id.clone()))
    }
}
