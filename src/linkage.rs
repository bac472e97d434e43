//! Bidirectional linkage between operational targets and requirement records.
//!
//! Two strategies run independently:
//!
//! 1. **Explicit**: a target that already carries `[req:...]` ids keeps exactly
//!    those ids and is never compared heuristically.
//! 2. **Heuristic**: a requirement's `prd_ref` (`Section > Category > Title`)
//!    is compared against every remaining target's category and title after
//!    stripping case, whitespace and punctuation.
//!
//! Matching is many-to-many. Requirements that end up with no target are
//! returned separately as orphans.

use prdtrace_core::models::{OperationalTarget, RequirementGroup, RequirementRecord};
use serde::{Deserialize, Serialize};

use crate::markdown::normalize_key;

/// Output of [`link_targets_and_requirements`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Linkage {
    /// Input targets with `linked_requirements` filled in.
    pub targets: Vec<OperationalTarget>,
    /// Every requirement in the tree, pre-order, with `linked_targets` filled in.
    pub requirements: Vec<RequirementRecord>,
    /// Requirements with no linked target, sorted by id.
    pub unmatched: Vec<RequirementRecord>,
}

/// Resolve links between `targets` and every requirement in `tree`.
pub fn link_targets_and_requirements(
    mut targets: Vec<OperationalTarget>,
    tree: &RequirementGroup,
) -> Linkage {
    let mut requirements = tree.flatten();
    let explicit: Vec<bool> = targets
        .iter()
        .map(|t| !t.linked_requirements.is_empty())
        .collect();

    for target in targets.iter().filter(|t| !t.linked_requirements.is_empty()) {
        for requirement_id in &target.linked_requirements {
            for record in requirements.iter_mut().filter(|r| &r.id == requirement_id) {
                push_unique(&mut record.linked_targets, &target.id);
            }
        }
    }

    let keys: Vec<TargetKey> = targets.iter().map(TargetKey::from).collect();
    for record in &mut requirements {
        let Some(reference) = PrdReference::parse(&record.prd_ref) else {
            continue;
        };
        for (idx, target) in targets.iter_mut().enumerate() {
            if explicit[idx] || !reference.matches(&keys[idx]) {
                continue;
            }
            target.link_requirement(&record.id);
            push_unique(&mut record.linked_targets, &target.id);
        }
    }

    let mut unmatched: Vec<RequirementRecord> = requirements
        .iter()
        .filter(|r| r.linked_targets.is_empty())
        .cloned()
        .collect();
    unmatched.sort_by(|a, b| a.id.cmp(&b.id));

    tracing::debug!(
        targets = targets.len(),
        requirements = requirements.len(),
        unmatched = unmatched.len(),
        "resolved target linkage"
    );

    Linkage {
        targets,
        requirements,
        unmatched,
    }
}

fn push_unique(ids: &mut Vec<String>, id: &str) {
    if !ids.iter().any(|existing| existing == id) {
        ids.push(id.to_string());
    }
}

struct TargetKey {
    category: String,
    title: String,
}

impl From<&OperationalTarget> for TargetKey {
    fn from(target: &OperationalTarget) -> Self {
        Self {
            category: normalize_key(&target.category),
            title: normalize_key(&target.title),
        }
    }
}

/// Normalized category and title segments of a `prd_ref`.
#[derive(Debug, PartialEq, Eq)]
struct PrdReference {
    category: String,
    title: String,
}

impl PrdReference {
    /// Category is the second path component, title the last one.
    /// References without a usable title never match anything.
    fn parse(prd_ref: &str) -> Option<Self> {
        let parts: Vec<&str> = prd_ref
            .split('>')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        let title = normalize_key(parts.last()?);
        if title.is_empty() {
            return None;
        }
        let category = if parts.len() > 1 {
            normalize_key(parts[1])
        } else {
            String::new()
        };
        Some(Self { category, title })
    }

    // Either-side-empty and mutual containment admit false positives for short
    // category names; kept as-is so existing PRDs resolve the same way.
    fn matches(&self, target: &TargetKey) -> bool {
        if target.title.is_empty() {
            return false;
        }
        let category_ok = self.category.is_empty()
            || target.category.is_empty()
            || target.category.contains(&self.category)
            || self.category.contains(&target.category);
        let title_ok =
            target.title.contains(&self.title) || self.title.contains(&target.title);
        category_ok && title_ok
    }
}
