//! PRD template validation.
//!
//! Two generations run side by side:
//!
//! - [`check_structure`]: flat heading presence against the modern and legacy
//!   catalogs, picking the better fit.
//! - [`validate_template`]: hierarchical check of the modern template with
//!   subsections and content rules, scored as
//!   `0.6 * structural + 0.4 * content`.
//!
//! Non-compliance is always reported as data, never as an error.

mod schema;
mod scoring;
mod sections;
mod structure;
mod suggestions;

pub use schema::{
    ContentRule, HeadingSpec, RuleKind, SectionSchema, SubsectionSchema, LEGACY_CATALOG,
    MODERN_CATALOG, MODERN_SCHEMA,
};
pub use scoring::validate_template;
pub use structure::check_structure;

use crate::markdown::{self, normalize_title, TokenKind};

/// A level-2 or level-3 heading, normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Heading {
    pub level: usize,
    pub normalized: String,
}

pub(crate) fn collect_headings(text: &str) -> Vec<Heading> {
    markdown::tokenize(text)
        .into_iter()
        .filter_map(|token| match token.kind {
            TokenKind::Heading { level, text } if (2..=3).contains(&level) => Some(Heading {
                level,
                normalized: normalize_title(text),
            }),
            _ => None,
        })
        .collect()
}

/// `part / whole * 100`, rounded to two decimals; 100 when `whole` is zero.
pub(crate) fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 100.0;
    }
    round2(part as f64 * 100.0 / whole as f64)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
