use std::sync::LazyLock;

use prdtrace_core::models::{OperationalTarget, TargetLayout, TargetStatus};
use regex::Regex;

use super::item::split_item;
use super::{target_path, Owner, MODERN_SECTION};
use crate::markdown::{self, Token, TokenKind};

static TIER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(P\d)\b").unwrap());
static TIER_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\((P\d)\)\s*$").unwrap());

/// Parse the `Operational Targets` section. `None` when the section is absent.
pub(crate) fn parse(tokens: &[Token<'_>], owner: &Owner<'_>) -> Option<Vec<OperationalTarget>> {
    let heading = markdown::find_heading(tokens, MODERN_SECTION, &[2, 3])?;
    let level = tokens[heading].heading_level()?;

    let mut targets = Vec::new();
    let mut tier: Option<(String, String)> = None;

    for token in &tokens[heading + 1..] {
        match token.kind {
            TokenKind::Heading { level: l, .. } if l <= level => break,
            TokenKind::Heading { text, .. } => {
                tier = Some((text.to_string(), criticality_of(text)));
            }
            TokenKind::ChecklistItem { checked, text } => {
                let Some((category, criticality)) = &tier else {
                    continue;
                };
                let Some(target) = build_target(owner, category, criticality, checked, text)
                else {
                    continue;
                };
                targets.push(target);
            }
            _ => {}
        }
    }

    Some(targets)
}

fn build_target(
    owner: &Owner<'_>,
    category: &str,
    criticality: &str,
    checked: bool,
    text: &str,
) -> Option<OperationalTarget> {
    let item = split_item(text);
    if item.body.is_empty() {
        return None;
    }

    let segments: Vec<&str> = item.body.split('|').map(str::trim).collect();
    let (id, title, extra) = match segments.as_slice() {
        [code, title, rest @ ..] if !code.is_empty() => {
            let title = if title.is_empty() { *code } else { *title };
            let extra: Vec<&str> = rest.iter().copied().filter(|s| !s.is_empty()).collect();
            (code.to_string(), title.to_string(), extra.join(" | "))
        }
        _ => (
            owner.derived_id(category, &item.body),
            item.body.clone(),
            String::new(),
        ),
    };

    Some(OperationalTarget {
        id,
        entity_type: owner.entity_type,
        entity_name: owner.entity_name.to_string(),
        category: category.to_string(),
        criticality: criticality.to_string(),
        path: target_path(TargetLayout::Modern, category, &title),
        title,
        notes: item.notes.unwrap_or(extra),
        status: if checked {
            TargetStatus::Complete
        } else {
            TargetStatus::Pending
        },
        linked_requirements: item.requirement_ids,
        layout: TargetLayout::Modern,
    })
}

/// Criticality of a tier heading, upper-cased: a trailing `(P<digit>)`,
/// else the first `P<digit>` token. Empty if none.
pub(crate) fn criticality_of(heading: &str) -> String {
    TIER_SUFFIX_RE
        .captures(heading)
        .or_else(|| TIER_RE.captures(heading))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_uppercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_comes_from_heading() {
        assert_eq!(criticality_of("🔴 P0 – Must ship for viability"), "P0");
        assert_eq!(criticality_of("p2 future"), "P2");
        assert_eq!(criticality_of("Stretch goals"), "");
    }

    #[test]
    fn trailing_tier_overrides_heading_token() {
        assert_eq!(criticality_of("🔴 P0 – Must ship for viability (P1)"), "P1");
        assert_eq!(criticality_of("Stretch goals (p2)"), "P2");
    }
}
