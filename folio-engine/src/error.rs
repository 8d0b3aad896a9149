//! Error types for the synchronization engine.

use folio_codec::CodecError;
use folio_dom::DomError;
use folio_model::ModelError;
use folio_types::{ComponentId, ComponentType};
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by builder operations.
///
/// Every variant is recoverable: the operation that raised it left the
/// store and the page untouched.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No template is registered for the requested type.
    #[error("template for {0} not found")]
    TemplateNotFound(ComponentType),

    /// The target container does not exist and could not be created.
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    /// No live component carries this id.
    #[error("component {0} not found")]
    NotFound(ComponentId),

    #[error("section {0} not found")]
    SectionNotFound(String),

    #[error("component {id} has no field {field}")]
    FieldNotFound { id: ComponentId, field: String },

    #[error("action {action} is not available on {target}")]
    Unsupported { action: String, target: String },

    #[error("no inline edit in progress")]
    NoInlineEdit,

    /// The import document could not be read.
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("tree error: {0}")]
    Dom(#[from] DomError),

    #[error("store error: {0}")]
    Model(ModelError),
}

impl From<ModelError> for EngineError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::TemplateNotFound(t) => Self::TemplateNotFound(t),
            ModelError::NotFound(id) => Self::NotFound(id),
            other => Self::Model(other),
        }
    }
}

/// A broken link between the store and the page, reported by
/// [`crate::BuilderSession::check_reconciliation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Mismatch {
    #[error("record {0} has no rendered instance")]
    MissingInstance(ComponentId),

    #[error("instance {0} has no record")]
    OrphanInstance(ComponentId),

    #[error("component {0} is rendered more than once")]
    DuplicateInstance(ComponentId),

    #[error("instance {id} is rendered as {rendered}, stored as {stored}")]
    TypeMismatch {
        id: ComponentId,
        rendered: String,
        stored: ComponentType,
    },
}
