use std::collections::BTreeMap;

use prdtrace_core::models::{Severity, StructureReport, StructureViolation, TemplateLayout};

use super::schema::{
    heading_matches, HeadingSpec, LEGACY_CATALOG, MODERN_CATALOG, OPERATIONAL_TARGETS_KEY,
    OVERVIEW_KEY,
};
use super::suggestions::{suggestion_for, suggestion_key};
use super::{percent, Heading};

/// Flat structure check against both section vocabularies.
///
/// Decision rule:
/// 1. Canonical modern overview *and* targets headings present: modern result.
/// 2. Otherwise whichever catalog is fully satisfied, modern first.
/// 3. Otherwise the higher compliance percentage; ties go to modern.
pub fn check_structure(text: &str) -> StructureReport {
    let headings = super::collect_headings(text);
    let modern = score_catalog(&headings, MODERN_CATALOG, TemplateLayout::Modern);
    if has_modern_signal(&headings) {
        return modern;
    }
    let legacy = score_catalog(&headings, LEGACY_CATALOG, TemplateLayout::Legacy);
    select(modern, legacy)
}

fn has_modern_signal(headings: &[Heading]) -> bool {
    let present = |key: &str| {
        headings
            .iter()
            .any(|h| h.level == 2 && heading_matches(&h.normalized, key))
    };
    present(OVERVIEW_KEY) && present(OPERATIONAL_TARGETS_KEY)
}

fn select(modern: StructureReport, legacy: StructureReport) -> StructureReport {
    if modern.is_fully_compliant {
        modern
    } else if legacy.is_fully_compliant || legacy.compliance_percent > modern.compliance_percent {
        legacy
    } else {
        modern
    }
}

pub(crate) fn score_catalog(
    headings: &[Heading],
    catalog: &[HeadingSpec],
    layout: TemplateLayout,
) -> StructureReport {
    let mut found_required = 0;
    let mut total_required = 0;
    let mut violations = Vec::new();
    let mut optional_present = Vec::new();
    let mut suggestions = BTreeMap::new();

    for spec in catalog {
        let present = headings
            .iter()
            .any(|h| h.level == spec.level && heading_matches(&h.normalized, spec.key));
        match (spec.required, present) {
            (true, true) => {
                total_required += 1;
                found_required += 1;
            }
            (true, false) => {
                total_required += 1;
                violations.push(missing(spec));
                suggestions.insert(suggestion_key(spec), suggestion_for(spec, &[]));
            }
            (false, true) => optional_present.push(spec.title.to_string()),
            (false, false) => {}
        }
    }

    let compliance_percent = percent(found_required, total_required);
    StructureReport {
        layout,
        found_required,
        total_required,
        compliance_percent,
        is_fully_compliant: found_required == total_required,
        violations,
        optional_present,
        suggestions,
    }
}

pub(crate) fn missing(spec: &HeadingSpec) -> StructureViolation {
    let message = match spec.parent {
        Some(parent) => format!(
            "Missing required subsection '{} {}' under '{}'",
            "#".repeat(spec.level),
            spec.title,
            parent
        ),
        None => format!(
            "Missing required section '{} {}'",
            "#".repeat(spec.level),
            spec.title
        ),
    };
    StructureViolation {
        title: spec.title.to_string(),
        level: spec.level,
        parent: spec.parent.map(str::to_string),
        severity: Severity::Error,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY_DOC: &str = "\
## 🎯 Capability Definition
## 📊 Success Metrics
### Functional Requirements
## 🏗️ Technical Architecture
## 🔄 Integration Requirements
## ✅ Validation Criteria
## 💰 Value Proposition
";

    #[test]
    fn empty_document_misses_every_required_heading() {
        let report = check_structure("");
        assert_eq!(report.layout, TemplateLayout::Modern);
        assert_eq!(report.compliance_percent, 0.0);
        assert!(!report.is_fully_compliant);
        assert_eq!(report.violations.len(), 9);
        assert_eq!(report.suggestions.len(), 9);
    }

    #[test]
    fn complete_legacy_document_selects_legacy() {
        let report = check_structure(LEGACY_DOC);
        assert_eq!(report.layout, TemplateLayout::Legacy);
        assert!(report.is_fully_compliant);
        assert_eq!(report.compliance_percent, 100.0);
        assert_eq!(report.optional_present, vec!["💰 Value Proposition"]);
    }

    #[test]
    fn modern_signal_short_circuits() {
        let report = check_structure(&format!(
            "## Overview\n## Operational Targets\n{}",
            LEGACY_DOC
        ));
        assert_eq!(report.layout, TemplateLayout::Modern);
        assert_eq!(report.found_required, 2);
    }

    #[test]
    fn higher_score_wins_when_neither_complies() {
        let report = check_structure("## Success Metrics\n## Validation Criteria\n## Overview\n");
        assert_eq!(report.layout, TemplateLayout::Legacy);
        assert_eq!(report.found_required, 2);
        assert_eq!(report.total_required, 6);
    }

    #[test]
    fn level_must_match() {
        let report = check_structure("### Overview\n");
        assert_eq!(report.found_required, 0);
    }

    #[test]
    fn subsection_violation_names_parent() {
        let report = check_structure("## Overview\n## Operational Targets\n### P0 – Must ship\n");
        let p1 = report
            .violations
            .iter()
            .find(|v| v.title.contains("P1"))
            .expect("P1 violation");
        assert_eq!(p1.parent.as_deref(), Some("🎯 Operational Targets"));
        assert_eq!(p1.severity, Severity::Error);
    }
}
