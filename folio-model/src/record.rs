use folio_types::{ComponentId, ComponentType, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name to field text.
pub type FieldMap = BTreeMap<String, String>;

/// The stored counterpart of one rendered component.
///
/// The serde layout is the component entry of the configuration document:
/// `{"id", "type", "data", "order", "timestamp", "lastModified"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: ComponentId,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(default)]
    pub data: FieldMap,
    /// Position in page order. Derived from the instance tree, never hand-maintained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(rename = "timestamp")]
    pub created_at: Timestamp,
    #[serde(
        rename = "lastModified",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub modified_at: Option<Timestamp>,
}

impl ComponentRecord {
    pub fn new(
        id: ComponentId,
        component_type: ComponentType,
        data: FieldMap,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            component_type,
            data,
            order: None,
            created_at,
            modified_at: None,
        }
    }

    /// Returns a field's text.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.data.get(name).map(String::as_str)
    }

    /// Order used when replaying a configuration; a missing order sorts as 0.
    pub fn sort_key(&self) -> i64 {
        self.order.unwrap_or(0)
    }
}
