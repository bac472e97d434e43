//! Static template definitions.
//!
//! The flat catalogs drive the structure check; [`MODERN_SCHEMA`] drives the
//! scored validation with subsections and content rules.

use std::sync::LazyLock;

use prdtrace_core::{Result, TraceError};
use regex::Regex;

/// A heading in a flat catalog.
#[derive(Debug, Clone, Copy)]
pub struct HeadingSpec {
    /// Display title used in violations and suggestions.
    pub title: &'static str,
    /// Normalized prefix a heading must equal or start with.
    pub key: &'static str,
    pub level: usize,
    pub required: bool,
    pub parent: Option<&'static str>,
}

const fn heading(title: &'static str, key: &'static str, level: usize, required: bool) -> HeadingSpec {
    HeadingSpec {
        title,
        key,
        level,
        required,
        parent: None,
    }
}

const fn tier(title: &'static str, key: &'static str) -> HeadingSpec {
    HeadingSpec {
        title,
        key,
        level: 3,
        required: true,
        parent: Some(OPERATIONAL_TARGETS),
    }
}

pub const OVERVIEW_KEY: &str = "overview";
pub const OPERATIONAL_TARGETS_KEY: &str = "operational targets";

const OPERATIONAL_TARGETS: &str = "🎯 Operational Targets";

const OVERVIEW: HeadingSpec = heading("🎯 Overview", OVERVIEW_KEY, 2, true);
const TARGETS: HeadingSpec = heading(OPERATIONAL_TARGETS, OPERATIONAL_TARGETS_KEY, 2, true);
const P0: HeadingSpec = tier("🔴 P0 – Must ship for viability", "p0");
const P1: HeadingSpec = tier("🟠 P1 – Should have post-launch", "p1");
const P2: HeadingSpec = tier("🟢 P2 – Future / expanded scope", "p2");
const TECH_DIRECTION: HeadingSpec =
    heading("🧱 Tech Direction Snapshot", "tech direction snapshot", 2, true);
const DEPENDENCIES: HeadingSpec =
    heading("🤝 Dependencies & Launch Plan", "dependencies & launch plan", 2, true);
const UX_BRANDING: HeadingSpec = heading("🎨 UX & Branding", "ux & branding", 2, true);
const RISKS: HeadingSpec = heading("⚠️ Risks & Open Questions", "risks & open questions", 2, true);
const APPENDIX: HeadingSpec = heading("📎 Appendix", "appendix", 2, false);

pub static MODERN_CATALOG: &[HeadingSpec] = &[
    OVERVIEW,
    TARGETS,
    P0,
    P1,
    P2,
    TECH_DIRECTION,
    DEPENDENCIES,
    UX_BRANDING,
    RISKS,
    APPENDIX,
];

pub static LEGACY_CATALOG: &[HeadingSpec] = &[
    heading("🎯 Capability Definition", "capability definition", 2, true),
    heading("📊 Success Metrics", "success metrics", 2, true),
    heading("Functional Requirements", "functional requirements", 3, true),
    heading("🏗️ Technical Architecture", "technical architecture", 2, true),
    heading("🔄 Integration Requirements", "integration requirements", 2, true),
    heading("✅ Validation Criteria", "validation criteria", 2, true),
    heading("💰 Value Proposition", "value proposition", 2, false),
    heading("🚨 Risk Mitigation", "risk mitigation", 2, false),
    heading("📝 Implementation Notes", "implementation notes", 2, false),
    heading("🔗 References", "references", 2, false),
];

/// Whether a normalized heading satisfies a catalog key.
///
/// The key must be the whole heading or be followed by a space or ASCII
/// punctuation, so `p0: must ship` and `overview:` match but `p01` does not.
pub fn heading_matches(normalized: &str, key: &str) -> bool {
    normalized.strip_prefix(key).is_some_and(|rest| {
        rest.is_empty() || rest.starts_with(|c: char| c == ' ' || c.is_ascii_punctuation())
    })
}

static CHECKLIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[-*+]\s+\[[ xX]\]").unwrap());

/// What a content rule looks for in a section body.
#[derive(Debug, Clone, Copy)]
pub enum RuleKind {
    /// Case-insensitive substring.
    Contains(&'static str),
    Regex(&'static str),
    /// At least one `- [ ]` / `- [x]` line.
    Checklist,
}

#[derive(Debug, Clone, Copy)]
pub struct ContentRule {
    pub name: &'static str,
    pub kind: RuleKind,
    /// A failing required rule is an error; otherwise a warning.
    pub required: bool,
    pub message: &'static str,
}

impl ContentRule {
    pub fn check(&self, body: &str) -> Result<bool> {
        match self.kind {
            RuleKind::Contains(needle) => {
                Ok(body.to_lowercase().contains(&needle.to_lowercase()))
            }
            RuleKind::Checklist => Ok(CHECKLIST_RE.is_match(body)),
            RuleKind::Regex(pattern) => Regex::new(pattern)
                .map(|re| re.is_match(body))
                .map_err(|source| TraceError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SubsectionSchema {
    pub spec: HeadingSpec,
    pub rules: &'static [ContentRule],
}

#[derive(Debug, Clone, Copy)]
pub struct SectionSchema {
    pub spec: HeadingSpec,
    pub subsections: &'static [SubsectionSchema],
    pub rules: &'static [ContentRule],
}

const NOT_EMPTY: ContentRule = ContentRule {
    name: "not_empty",
    kind: RuleKind::Regex(r"\S"),
    required: false,
    message: "Section has no content",
};

const HAS_LIST: ContentRule = ContentRule {
    name: "has_list",
    kind: RuleKind::Regex(r"(?m)^\s*[-*+]\s+\S"),
    required: false,
    message: "Section should list its items as bullets",
};

const fn checklist(required: bool) -> ContentRule {
    ContentRule {
        name: "checklist",
        kind: RuleKind::Checklist,
        required,
        message: "Tier should contain at least one `- [ ]` target",
    }
}

pub static MODERN_SCHEMA: &[SectionSchema] = &[
    SectionSchema {
        spec: OVERVIEW,
        subsections: &[],
        rules: &[
            ContentRule {
                name: "purpose",
                kind: RuleKind::Contains("purpose"),
                required: true,
                message: "Overview must state the purpose",
            },
            ContentRule {
                name: "users",
                kind: RuleKind::Regex(r"(?i)\busers?\b"),
                required: false,
                message: "Overview should name its primary users",
            },
        ],
    },
    SectionSchema {
        spec: TARGETS,
        subsections: &[
            SubsectionSchema {
                spec: P0,
                rules: &[checklist(true)],
            },
            SubsectionSchema {
                spec: P1,
                rules: &[checklist(false)],
            },
            SubsectionSchema {
                spec: P2,
                rules: &[checklist(false)],
            },
        ],
        rules: &[],
    },
    SectionSchema {
        spec: TECH_DIRECTION,
        subsections: &[],
        rules: &[NOT_EMPTY],
    },
    SectionSchema {
        spec: DEPENDENCIES,
        subsections: &[],
        rules: &[NOT_EMPTY, HAS_LIST],
    },
    SectionSchema {
        spec: UX_BRANDING,
        subsections: &[],
        rules: &[NOT_EMPTY],
    },
    SectionSchema {
        spec: RISKS,
        subsections: &[],
        rules: &[HAS_LIST],
    },
    SectionSchema {
        spec: APPENDIX,
        subsections: &[],
        rules: &[],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::normalize_title;

    #[test]
    fn keys_match_their_display_titles() {
        for spec in MODERN_CATALOG.iter().chain(LEGACY_CATALOG) {
            assert!(
                heading_matches(&normalize_title(spec.title), spec.key),
                "{} does not match key {}",
                spec.title,
                spec.key
            );
        }
    }

    #[test]
    fn modern_schema_has_nine_required_headings() {
        let required: usize = MODERN_SCHEMA
            .iter()
            .filter(|s| s.spec.required)
            .map(|s| 1 + s.subsections.iter().filter(|sub| sub.spec.required).count())
            .sum();
        assert_eq!(required, 9);
    }

    #[test]
    fn prefix_match_needs_word_boundary() {
        assert!(heading_matches("p0 must ship for viability", "p0"));
        assert!(heading_matches("overview", "overview"));
        assert!(!heading_matches("p01 something", "p0"));
        assert!(!heading_matches("overviews", "overview"));
    }

    #[test]
    fn prefix_match_accepts_punctuation_boundary() {
        assert!(heading_matches("p0: must ship", "p0"));
        assert!(heading_matches("overview:", "overview"));
        assert!(heading_matches("risks & open questions?", "risks & open questions"));
        assert!(!heading_matches("p0x: later", "p0"));
    }

    #[test]
    fn rules_check_their_kind() {
        assert!(checklist(true).check("- [x] done").unwrap());
        assert!(!checklist(true).check("- done").unwrap());
        assert!(NOT_EMPTY.check("text").unwrap());
        assert!(!NOT_EMPTY.check(" \n ").unwrap());
        let bad = ContentRule {
            name: "bad",
            kind: RuleKind::Regex("("),
            required: false,
            message: "",
        };
        assert!(bad.check("x").is_err());
    }
}
