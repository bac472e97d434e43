use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::EntityRef;
use super::requirement::RequirementRecord;
use super::template::TemplateReport;

/// Traceability summary for one entity: targets, requirements and template health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub entity: EntityRef,
    pub generated_at: DateTime<Utc>,
    pub target_count: usize,
    pub completed_count: usize,
    pub completion_by_criticality: BTreeMap<String, TierCompletion>,
    pub linked_target_count: usize,
    /// Ids of targets with no linked requirement.
    pub unlinked_targets: Vec<String>,
    pub requirement_count: usize,
    pub unmatched_requirements: Vec<RequirementRecord>,
    pub template: TemplateReport,
}

/// Completion counts for one criticality tier.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierCompletion {
    pub total: usize,
    pub complete: usize,
}
