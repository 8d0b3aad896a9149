//! Core type definitions for the folio portfolio builder.
//!
//! This crate defines the small, dependency-free vocabulary shared by the
//! rest of the workspace:
//! - Component identifiers and their generator
//! - Millisecond timestamps and the [`Clock`] seam
//! - The [`ComponentType`] tag and move [`Direction`]
//! - Change events emitted by the synchronization engine

mod component_type;
mod event;
mod ids;
mod timestamp;

pub use component_type::{ComponentType, Direction};
pub use event::{ChangeEvent, ChangePayload};
pub use ids::{COMPONENT_ID_PREFIX, ComponentId};
pub use timestamp::{Clock, ManualClock, SystemClock, Timestamp};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid component id: {0:?}")]
    InvalidId(String),

    #[error("unknown component type: {0}")]
    UnknownComponentType(String),

    #[error("invalid direction: {0} (expected up or down)")]
    InvalidDirection(String),
}
