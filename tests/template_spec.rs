use prdtrace::models::{Severity, TemplateLayout};
use prdtrace::{check_structure, validate_template};
use speculate2::speculate;

const MODERN_PRD: &str = "\
# App Monitor

## 🎯 Overview
**Purpose**: Keep every scenario healthy. Primary users are operators.

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
- redis

## 🎨 UX & Branding
Calm dashboard.

## ⚠️ Risks & Open Questions
- Alert fatigue

## 📎 Appendix
Links.
";

const LEGACY_PRD: &str = "\
# Old PRD

## 🎯 Capability Definition
Stuff.

## 📊 Success Metrics
Numbers.

### Functional Requirements
- **Must Have (P0)**
  - [ ] Login

## 🏗️ Technical Architecture
Boxes.

## 🔄 Integration Requirements
APIs.

## ✅ Validation Criteria
Tests.

## 🔗 References
Links.
";

speculate! {
    describe "validate_template" {
        it "gives a complete modern document a perfect score" {
            let report = validate_template(MODERN_PRD);

            assert_eq!(report.layout, TemplateLayout::Modern);
            assert_eq!(report.structural_compliance, 100.0);
            assert_eq!(report.content_compliance, 100.0);
            assert_eq!(report.overall_score, 100.0);
            assert!(report.is_fully_compliant);
        }

        it "does not require the optional appendix" {
            let text = MODERN_PRD.replace("## 📎 Appendix\nLinks.\n", "");
            let report = validate_template(&text);
            assert_eq!(report.overall_score, 100.0);
        }

        it "accepts headings without their emoji" {
            let text = MODERN_PRD.replace("## 🎨 UX & Branding", "## UX & Branding");
            let report = validate_template(&text);
            assert!(report.violations.is_empty(), "{:?}", report.violations);
        }

        it "accepts headings with trailing punctuation" {
            let text = MODERN_PRD
                .replace("## 🎯 Overview", "## Overview:")
                .replace("### 🔴 P0 – Must ship for viability", "### P0: Must ship");
            let report = validate_template(&text);
            assert!(report.violations.is_empty(), "{:?}", report.violations);
            assert_eq!(report.overall_score, 100.0);
        }

        it "counts a missing required section and suggests boilerplate" {
            let text = MODERN_PRD.replace("## 🎨 UX & Branding\nCalm dashboard.\n", "");
            let report = validate_template(&text);

            assert_eq!(report.violations.len(), 1);
            assert_eq!(report.violations[0].title, "🎨 UX & Branding");
            assert_eq!(report.violations[0].severity, Severity::Error);
            assert!((report.structural_compliance - 88.89).abs() < 0.01);
            assert!(report.suggestions.contains_key("ux & branding"));
            assert!(!report.is_fully_compliant);
        }

        it "scores a missing targets section with its tiers" {
            let text = MODERN_PRD.replace("## 🎯 Operational Targets", "## Targets");
            let report = validate_template(&text);

            // Section plus three tiers.
            assert_eq!(report.violations.len(), 4);
            let suggestion = report.suggestions.get("operational targets").expect("suggestion");
            assert!(suggestion.contains("P0"));
        }

        it "reports a missing purpose as a blocking content issue" {
            let text = MODERN_PRD.replace("**Purpose**: Keep", "Keep");
            let report = validate_template(&text);

            assert_eq!(report.structural_compliance, 100.0);
            assert_eq!(report.content_issues.len(), 1);
            assert_eq!(report.content_issues[0].section, "🎯 Overview");
            assert_eq!(report.content_issues[0].severity, Severity::Error);
            assert_eq!(report.overall_score, 60.0);
        }

        it "leaves legacy documents alone" {
            let report = validate_template(LEGACY_PRD);
            assert_eq!(report.layout, TemplateLayout::Legacy);
            assert_eq!(report.overall_score, 100.0);
        }
    }

    describe "check_structure" {
        it "picks the modern catalog for modern documents" {
            let report = check_structure(MODERN_PRD);

            assert_eq!(report.layout, TemplateLayout::Modern);
            assert!(report.is_fully_compliant);
            assert_eq!(report.found_required, 9);
            assert_eq!(report.optional_present, vec!["📎 Appendix"]);
        }

        it "picks the legacy catalog for legacy documents" {
            let report = check_structure(LEGACY_PRD);

            assert_eq!(report.layout, TemplateLayout::Legacy);
            assert!(report.is_fully_compliant);
            assert_eq!(report.compliance_percent, 100.0);
            assert_eq!(report.optional_present, vec!["🔗 References"]);
        }

        it "falls back to modern on an empty document" {
            let report = check_structure("");

            assert_eq!(report.layout, TemplateLayout::Modern);
            assert_eq!(report.compliance_percent, 0.0);
            assert_eq!(report.violations.len(), 9);
        }

        it "prefers the better partial match" {
            let text = "## Capability Definition\nx\n## Success Metrics\ny\n";
            let report = check_structure(text);

            assert_eq!(report.layout, TemplateLayout::Legacy);
            assert!((report.compliance_percent - 33.33).abs() < 0.01);
            assert_eq!(report.suggestions.len(), 4);
        }
    }
}
