use crate::ComponentRecord;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PRIMARY: &str = "#3b82f6";
pub const DEFAULT_ACCENT: &str = "#8b5cf6";

/// Theme colors as CSS color strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colors {
    #[serde(default = "default_primary")]
    pub primary: String,
    #[serde(default = "default_accent")]
    pub accent: String,
}

fn default_primary() -> String {
    DEFAULT_PRIMARY.into()
}

fn default_accent() -> String {
    DEFAULT_ACCENT.into()
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            accent: default_accent(),
        }
    }
}

/// Global page settings carried alongside the components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub colors: Colors,
    #[serde(rename = "darkMode", default = "default_dark_mode")]
    pub dark_mode: bool,
}

fn default_dark_mode() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            colors: Colors::default(),
            dark_mode: default_dark_mode(),
        }
    }
}

/// Serializable snapshot of the whole page: settings plus ordered components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(flatten)]
    pub settings: Settings,
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
}

impl Configuration {
    pub fn new(settings: Settings, components: Vec<ComponentRecord>) -> Self {
        Self {
            settings,
            components,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(Settings::default(), Vec::new())
    }
}
