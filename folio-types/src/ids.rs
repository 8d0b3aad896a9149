//! Identifier types used throughout the folio core.
//!
//! Component ids are opaque strings. Generated ids combine the creation
//! time with a random base36 suffix (`component-<millis>-<suffix>`); ids
//! read from an imported document are kept verbatim.

use crate::{Error, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Prefix of every generated component id.
pub const COMPONENT_ID_PREFIX: &str = "component-";

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Unique identifier of a component instance and its record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    /// Generates a new id seeded with the given creation time.
    #[must_use]
    pub fn generate(now: Timestamp) -> Self {
        Self(format!(
            "{COMPONENT_ID_PREFIX}{}-{}",
            now.as_millis(),
            random_suffix()
        ))
    }

    /// Wraps an existing id string (e.g. one read from a document).
    ///
    /// Empty or whitespace-only strings are rejected.
    pub fn parse(s: &str) -> Result<Self, Error> {
        if s.trim().is_empty() {
            return Err(Error::InvalidId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the id has the generated `component-...` shape.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.0.starts_with(COMPONENT_ID_PREFIX)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ComponentId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ComponentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn random_suffix() -> String {
    let mut bits = Uuid::new_v4().as_u128();
    let mut out = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        out.push(BASE36[(bits % 36) as usize] as char);
        bits /= 36;
    }
    out
}
