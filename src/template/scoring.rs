use std::collections::BTreeMap;

use prdtrace_core::models::{
    ContentIssue, Severity, StructureViolation, TemplateLayout, TemplateReport,
};

use super::schema::{
    heading_matches, ContentRule, HeadingSpec, SectionSchema, LEGACY_CATALOG, MODERN_SCHEMA,
    OVERVIEW_KEY,
};
use super::sections::{split_sections, SectionSpan};
use super::structure::missing;
use super::suggestions::{suggestion_for, suggestion_key};
use super::{percent, round2};

const STRUCTURE_WEIGHT: f64 = 60.0;
const CONTENT_WEIGHT: f64 = 40.0;

/// Hierarchical, scored validation against the modern template.
///
/// Documents without a modern overview heading that do carry legacy headings
/// are out of scope and receive a perfect score. Anything else, including an
/// empty document, is scored against [`MODERN_SCHEMA`].
pub fn validate_template(text: &str) -> TemplateReport {
    let spans = split_sections(text);
    if !has_overview(&spans) && looks_legacy(&spans) {
        tracing::debug!("legacy PRD layout, skipping modern template scoring");
        return TemplateReport::perfect(TemplateLayout::Legacy);
    }

    let mut tally = Tally::default();
    for section in MODERN_SCHEMA {
        tally.check_section(section, &spans);
    }
    tally.into_report()
}

fn has_overview(spans: &[SectionSpan<'_>]) -> bool {
    spans
        .iter()
        .any(|s| s.level == 2 && heading_matches(&s.normalized, OVERVIEW_KEY))
}

fn looks_legacy(spans: &[SectionSpan<'_>]) -> bool {
    spans.iter().any(|s| {
        LEGACY_CATALOG
            .iter()
            .any(|spec| s.level == spec.level && heading_matches(&s.normalized, spec.key))
    })
}

fn find_span(spans: &[SectionSpan<'_>], spec: &HeadingSpec) -> Option<usize> {
    spans
        .iter()
        .position(|s| s.level == spec.level && heading_matches(&s.normalized, spec.key))
}

#[derive(Default)]
struct Tally {
    found: usize,
    total: usize,
    violations: Vec<StructureViolation>,
    issues: Vec<ContentIssue>,
    suggestions: BTreeMap<String, String>,
}

impl Tally {
    fn check_section(&mut self, section: &SectionSchema, spans: &[SectionSpan<'_>]) {
        if !section.spec.required {
            return;
        }
        let required_subs: Vec<HeadingSpec> = section
            .subsections
            .iter()
            .filter(|sub| sub.spec.required)
            .map(|sub| sub.spec)
            .collect();

        self.total += 1;
        let Some(idx) = find_span(spans, &section.spec) else {
            self.violations.push(missing(&section.spec));
            self.total += required_subs.len();
            self.violations.extend(required_subs.iter().map(missing));
            self.suggestions.insert(
                suggestion_key(&section.spec),
                suggestion_for(&section.spec, &required_subs),
            );
            return;
        };
        self.found += 1;
        self.check_rules(section.spec.title, section.rules, &spans[idx].body);

        // Subsections are the deeper spans up to the next span at this level or above.
        let children: Vec<SectionSpan<'_>> = spans[idx + 1..]
            .iter()
            .take_while(|s| s.level > section.spec.level)
            .cloned()
            .collect();
        for sub in section.subsections {
            let found = find_span(&children, &sub.spec);
            if sub.spec.required {
                self.total += 1;
            }
            match found {
                Some(child) => {
                    if sub.spec.required {
                        self.found += 1;
                    }
                    self.check_rules(sub.spec.title, sub.rules, &children[child].body);
                }
                None if sub.spec.required => {
                    self.violations.push(missing(&sub.spec));
                    self.suggestions
                        .insert(suggestion_key(&sub.spec), suggestion_for(&sub.spec, &[]));
                }
                None => {}
            }
        }
    }

    fn check_rules(&mut self, section: &str, rules: &[ContentRule], body: &str) {
        for rule in rules {
            let passed = match rule.check(body) {
                Ok(passed) => passed,
                Err(e) => {
                    tracing::warn!(section, rule = rule.name, "skipping content rule: {}", e);
                    continue;
                }
            };
            if passed {
                continue;
            }
            self.issues.push(ContentIssue {
                section: section.to_string(),
                rule: rule.name.to_string(),
                severity: if rule.required {
                    Severity::Error
                } else {
                    Severity::Warning
                },
                message: rule.message.to_string(),
            });
        }
    }

    fn into_report(self) -> TemplateReport {
        let structural = percent(self.found, self.total);
        let non_blocking = self
            .issues
            .iter()
            .filter(|i| i.severity != Severity::Error)
            .count();
        let content = percent(non_blocking, self.issues.len());
        let overall = round2((structural * STRUCTURE_WEIGHT + content * CONTENT_WEIGHT) / 100.0);
        let has_errors = self.issues.iter().any(|i| i.severity == Severity::Error);

        TemplateReport {
            layout: TemplateLayout::Modern,
            structural_compliance: structural,
            content_compliance: content,
            overall_score: overall,
            is_fully_compliant: self.violations.is_empty() && !has_errors,
            violations: self.violations,
            content_issues: self.issues,
            suggestions: self.suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLETE: &str = "\
# Demo PRD

## 🎯 Overview
**Purpose**: Watch every scenario. Primary users are operators.

## 🎯 Operational Targets

### 🔴 P0 – Must ship for viability
- [ ] OT-P0-001 | Health checks

### 🟠 P1 – Should have post-launch
- [ ] OT-P1-001 | Alerts

### 🟢 P2 – Future / expanded scope
- [ ] OT-P2-001 | Forecasts

## 🧱 Tech Direction Snapshot
Rust service with a small UI.

## 🤝 Dependencies & Launch Plan
- postgres

## 🎨 UX & Branding
Calm dashboard.

## ⚠️ Risks & Open Questions
- Alert fatigue
";

    #[test]
    fn complete_document_scores_100() {
        let report = validate_template(COMPLETE);
        assert_eq!(report.layout, TemplateLayout::Modern);
        assert!(report.is_fully_compliant, "{:?}", report);
        assert_eq!(report.overall_score, 100.0);
        assert!(report.violations.is_empty());
        assert!(report.content_issues.is_empty());
    }

    #[test]
    fn empty_document_is_scored_against_modern_schema() {
        let report = validate_template("");
        assert_eq!(report.structural_compliance, 0.0);
        assert_eq!(report.violations.len(), 9);
        assert_eq!(report.content_compliance, 100.0);
        assert_eq!(report.overall_score, 40.0);
        assert!(!report.is_fully_compliant);
        assert!(report.suggestions.contains_key("operational targets"));
    }

    #[test]
    fn legacy_document_gets_perfect_score() {
        let report = validate_template("## Capability Definition\nstuff\n### Functional Requirements\n");
        assert_eq!(report.layout, TemplateLayout::Legacy);
        assert_eq!(report.overall_score, 100.0);
        assert!(report.is_fully_compliant);
    }

    #[test]
    fn required_rule_failure_is_an_error() {
        let text = COMPLETE.replace("- [ ] OT-P0-001 | Health checks", "Nothing yet");
        let report = validate_template(&text);
        assert_eq!(report.structural_compliance, 100.0);
        assert_eq!(report.content_issues.len(), 1);
        assert_eq!(report.content_issues[0].severity, Severity::Error);
        assert_eq!(report.content_compliance, 0.0);
        assert_eq!(report.overall_score, 60.0);
        assert!(!report.is_fully_compliant);
    }

    #[test]
    fn advisory_rule_failure_is_a_warning() {
        let text = COMPLETE.replace("- Alert fatigue", "Alert fatigue");
        let report = validate_template(&text);
        assert_eq!(report.content_issues.len(), 1);
        assert_eq!(report.content_issues[0].severity, Severity::Warning);
        assert_eq!(report.content_compliance, 100.0);
        assert!(report.is_fully_compliant);
    }

    #[test]
    fn missing_subsection_counts_against_structure() {
        let text = COMPLETE.replace("### 🟢 P2 – Future / expanded scope\n- [ ] OT-P2-001 | Forecasts\n", "");
        let report = validate_template(&text);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].parent.as_deref(), Some("🎯 Operational Targets"));
        assert!((report.structural_compliance - 88.89).abs() < 0.01);
        assert!(report.suggestions.contains_key("p2 future / expanded scope"));
    }
}
