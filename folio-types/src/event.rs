//! Change events emitted by the synchronization engine.
//!
//! Each event describes one completed state transition of the
//! (configuration store, instance tree) pair. A presentation layer that
//! observes the model replays these instead of diffing the tree.

use crate::{ComponentId, ComponentType, Direction, Timestamp};
use serde::{Deserialize, Serialize};

/// The transition that happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "data")]
pub enum ChangePayload {
    /// A component was added (absent -> present).
    ComponentAdded {
        id: ComponentId,
        component_type: ComponentType,
    },

    /// Field values of a component changed.
    ComponentUpdated {
        id: ComponentId,
        /// Names of the fields that were written.
        fields: Vec<String>,
    },

    /// A component was deleted (present -> absent).
    ComponentRemoved { id: ComponentId },

    /// A component swapped places with a sibling.
    ComponentMoved {
        id: ComponentId,
        direction: Direction,
    },

    /// A section was synthesized for a container that did not exist yet.
    SectionCreated { section: String },

    /// A section and everything in it was removed.
    SectionRemoved { section: String },

    /// A section swapped places with a neighbouring section.
    SectionMoved {
        section: String,
        direction: Direction,
    },

    /// Colors or dark mode changed.
    SettingsChanged,

    /// The whole page was rebuilt from a configuration.
    Reloaded { components: usize },
}

/// A change event with the time it was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub timestamp: Timestamp,
    pub payload: ChangePayload,
}

impl ChangeEvent {
    #[must_use]
    pub fn new(timestamp: Timestamp, payload: ChangePayload) -> Self {
        Self { timestamp, payload }
    }

    /// The component this event concerns, if any.
    #[must_use]
    pub fn component_id(&self) -> Option<&ComponentId> {
        match &self.payload {
            ChangePayload::ComponentAdded { id, .. }
            | ChangePayload::ComponentUpdated { id, .. }
            | ChangePayload::ComponentRemoved { id }
            | ChangePayload::ComponentMoved { id, .. } => Some(id),
            _ => None,
        }
    }
}
