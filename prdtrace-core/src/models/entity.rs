use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of entity a PRD belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Scenario,
    Resource,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scenario => "scenario",
            Self::Resource => "resource",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "scenario" => Some(Self::Scenario),
            "resource" => Some(Self::Resource),
            _ => None,
        }
    }
}

/// Identifies the owner of a PRD and its requirement tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub entity_type: EntityType,
    pub name: String,
}

impl EntityRef {
    pub fn new(entity_type: EntityType, name: impl Into<String>) -> Self {
        Self {
            entity_type,
            name: name.into(),
        }
    }

    /// Composite key used by the caches, e.g. `scenario:app-monitor`.
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.entity_type.as_str(), self.name)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.entity_type.as_str(), self.name)
    }
}
