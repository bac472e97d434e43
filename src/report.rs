//! Traceability report combining targets, requirements and template health.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use prdtrace_core::models::{
    EntityRef, OperationalTarget, QualityReport, RequirementGroup, TierCompletion,
};

use crate::linkage::link_targets_and_requirements;
use crate::parser::parse_targets;
use crate::template::validate_template;

const UNSPECIFIED_TIER: &str = "unspecified";

/// Build a [`QualityReport`] from raw PRD text and a loaded requirement tree.
pub fn build_quality_report(
    entity: &EntityRef,
    text: &str,
    tree: &RequirementGroup,
    generated_at: DateTime<Utc>,
) -> QualityReport {
    let targets = parse_targets(text, entity.entity_type, &entity.name);
    let linkage = link_targets_and_requirements(targets, tree);

    let unlinked_targets: Vec<String> = linkage
        .targets
        .iter()
        .filter(|t| t.linked_requirements.is_empty())
        .map(|t| t.id.clone())
        .collect();

    QualityReport {
        entity: entity.clone(),
        generated_at,
        target_count: linkage.targets.len(),
        completed_count: linkage.targets.iter().filter(|t| t.is_complete()).count(),
        completion_by_criticality: completion_by_tier(&linkage.targets),
        linked_target_count: linkage.targets.len() - unlinked_targets.len(),
        unlinked_targets,
        requirement_count: linkage.requirements.len(),
        unmatched_requirements: linkage.unmatched,
        template: validate_template(text),
    }
}

fn completion_by_tier(targets: &[OperationalTarget]) -> BTreeMap<String, TierCompletion> {
    let mut tiers: BTreeMap<String, TierCompletion> = BTreeMap::new();
    for target in targets {
        let tier = if target.criticality.is_empty() {
            UNSPECIFIED_TIER.to_string()
        } else {
            target.criticality.clone()
        };
        let entry = tiers.entry(tier).or_default();
        entry.total += 1;
        if target.is_complete() {
            entry.complete += 1;
        }
    }
    tiers
}
