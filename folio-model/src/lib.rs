//! Component model for the folio builder.
//!
//! Defines the data side of the builder:
//! - [`ComponentTemplate`] / [`TemplateRegistry`] — the per-type field schema
//!   and the section each type lives in
//! - [`ComponentRecord`] — one component's id, type, field data and timestamps
//! - [`Configuration`] — settings plus the ordered records, the export shape
//! - [`ConfigurationStore`] — the single source of truth the engine writes

mod config;
mod record;
mod registry;
mod schema;
mod store;

pub use config::{Colors, Configuration, DEFAULT_ACCENT, DEFAULT_PRIMARY, Settings};
pub use record::{ComponentRecord, FieldMap};
pub use registry::{HERO_SECTION, TemplateRegistry};
pub use schema::{ComponentTemplate, FieldSpec, SectionAnchor, SectionSpec};
pub use store::ConfigurationStore;

use folio_types::{ComponentId, ComponentType};

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by the registry and the configuration store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("template for {0} not found")]
    TemplateNotFound(ComponentType),

    #[error("component {0} already exists")]
    DuplicateId(ComponentId),

    #[error("component {0} not found")]
    NotFound(ComponentId),
}
