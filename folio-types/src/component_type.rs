use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of content block a portfolio page can hold.
///
/// Serialized with the kebab-case names used in `data-template` attributes
/// and in the configuration document (`"project-card"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentType {
    ProjectCard,
    SkillItem,
    TutorialCard,
    SocialLink,
    UpdateItem,
    KnowledgeCategory,
}

impl ComponentType {
    /// Every component type, in palette order.
    pub const ALL: [ComponentType; 6] = [
        ComponentType::ProjectCard,
        ComponentType::SkillItem,
        ComponentType::TutorialCard,
        ComponentType::SocialLink,
        ComponentType::UpdateItem,
        ComponentType::KnowledgeCategory,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectCard => "project-card",
            Self::SkillItem => "skill-item",
            Self::TutorialCard => "tutorial-card",
            Self::SocialLink => "social-link",
            Self::UpdateItem => "update-item",
            Self::KnowledgeCategory => "knowledge-category",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownComponentType(s.to_string()))
    }
}

/// Direction of a move among siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(Error::InvalidDirection(other.to_string())),
        }
    }
}
