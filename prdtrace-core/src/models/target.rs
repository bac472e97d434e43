use serde::{Deserialize, Serialize};

use super::entity::EntityType;

/// A ship-readiness checklist item parsed out of a PRD.
///
/// Targets are **derived**: they are rebuilt from the document on every parse.
/// The only way to change one is to edit the list and splice it back into the
/// document through the serializer.
///
/// `linked_requirements` holds explicit `[req:...]` tags after parsing and is
/// extended with heuristic matches by the linkage resolver. Order is
/// first-seen; duplicates are never added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperationalTarget {
    pub id: String,
    pub entity_type: EntityType,
    pub entity_name: String,
    pub category: String,
    /// `P0`, `P1`, `P2`, or whatever free-form tier the document used. May be empty.
    pub criticality: String,
    pub title: String,
    pub notes: String,
    pub status: TargetStatus,
    /// Human-readable location, e.g. `Functional Requirements > Must Have > Login`.
    pub path: String,
    #[serde(default)]
    pub linked_requirements: Vec<String>,
    #[serde(default)]
    pub layout: TargetLayout,
}

impl OperationalTarget {
    pub fn is_complete(&self) -> bool {
        self.status == TargetStatus::Complete
    }

    /// Append a requirement id unless it is already linked.
    pub fn link_requirement(&mut self, requirement_id: &str) -> bool {
        if self.linked_requirements.iter().any(|id| id == requirement_id) {
            return false;
        }
        self.linked_requirements.push(requirement_id.to_string());
        true
    }
}

/// Completion state derived from the checkbox.
///
/// - `Pending`: `[ ]`
/// - `Complete`: `[x]` or `[X]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    #[default]
    Pending,
    Complete,
}

impl TargetStatus {
    pub fn checkbox(&self) -> &'static str {
        match self {
            Self::Pending => "[ ]",
            Self::Complete => "[x]",
        }
    }
}

/// Which document grammar a target came from (and is written back in).
///
/// - `Legacy`: `### Functional Requirements` with `- **Category (P0)**` groups
/// - `Modern`: `## Operational Targets` with per-tier subheadings and short codes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetLayout {
    #[default]
    Legacy,
    Modern,
}

/// A client edit for a single target. All fields except `id` are optional.
///
/// Updates whose `id` matches no existing target create a new target with
/// defaults for every field left unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetUpdate {
    pub id: String,
    pub title: Option<String>,
    pub category: Option<String>,
    pub criticality: Option<String>,
    pub notes: Option<String>,
    pub status: Option<TargetStatus>,
    pub linked_requirements: Option<Vec<String>>,
}
