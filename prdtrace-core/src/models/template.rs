use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How serious a template finding is.
///
/// - `Error`: blocks compliance
/// - `Warning`: advisory only
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// Which section vocabulary a document was judged against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TemplateLayout {
    Modern,
    Legacy,
}

/// A required heading that the document does not have.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StructureViolation {
    pub title: String,
    pub level: usize,
    /// Parent section title for subsections.
    pub parent: Option<String>,
    pub severity: Severity,
    pub message: String,
}

/// A content rule that failed inside a present section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentIssue {
    pub section: String,
    pub rule: String,
    pub severity: Severity,
    pub message: String,
}

/// Result of the flat (v1) structure check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureReport {
    pub layout: TemplateLayout,
    pub found_required: usize,
    pub total_required: usize,
    pub compliance_percent: f64,
    pub is_fully_compliant: bool,
    pub violations: Vec<StructureViolation>,
    pub optional_present: Vec<String>,
    /// Ready-to-paste markdown keyed by normalized section title.
    pub suggestions: BTreeMap<String, String>,
}

/// Result of the hierarchical, scored (v2) validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateReport {
    pub layout: TemplateLayout,
    pub structural_compliance: f64,
    pub content_compliance: f64,
    /// `0.6 * structural + 0.4 * content`, rounded to two decimals.
    pub overall_score: f64,
    pub is_fully_compliant: bool,
    pub violations: Vec<StructureViolation>,
    pub content_issues: Vec<ContentIssue>,
    pub suggestions: BTreeMap<String, String>,
}

impl TemplateReport {
    /// A perfect report, used for documents outside the modern template's scope.
    pub fn perfect(layout: TemplateLayout) -> Self {
        Self {
            layout,
            structural_compliance: 100.0,
            content_compliance: 100.0,
            overall_score: 100.0,
            is_fully_compliant: true,
            violations: Vec::new(),
            content_issues: Vec::new(),
            suggestions: BTreeMap::new(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count()
            + self
                .content_issues
                .iter()
                .filter(|i| i.severity == Severity::Error)
                .count()
    }
}
