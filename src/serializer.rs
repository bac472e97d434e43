//! Renders operational targets back into PRD markdown.
//!
//! Rendering is grammar-fixed (header casing, ordering and annotation
//! placement never vary), so parsing a rewritten document and rewriting it
//! again reproduces the same targets block byte for byte.

use prdtrace_core::models::{
    EntityType, OperationalTarget, TargetLayout, TargetStatus, TargetUpdate,
};

use crate::markdown::{self, Token, TokenKind};
use crate::parser::{criticality_of, document_layout, target_path, LEGACY_SECTION, MODERN_SECTION};

const LEGACY_HEADING: &str = "### Functional Requirements";
const MODERN_HEADING: &str = "## 🎯 Operational Targets";
const UNCATEGORIZED: &str = "Uncategorized";
const TIER_LEVEL: usize = 3;

/// Layout a target list is written in: modern if any target is modern.
pub fn layout_of(targets: &[OperationalTarget]) -> TargetLayout {
    if targets.iter().any(|t| t.layout == TargetLayout::Modern) {
        TargetLayout::Modern
    } else {
        TargetLayout::Legacy
    }
}

/// Render `targets` grouped by category and criticality in first-seen
/// order, without the section heading.
pub fn serialize_targets(targets: &[OperationalTarget]) -> String {
    render(targets, layout_of(targets), TIER_LEVEL, Vec::new())
}

/// Replace the targets section of `original` with a fresh rendering of
/// `targets`, or append one if the document has none.
///
/// The section is picked the way the parser picks it (modern first, then
/// legacy) and every target is rendered in that section's grammar. Only a
/// document with neither section falls back to the targets' own layout.
/// The replaced span runs from the section heading to the next heading at
/// the same or a higher level. The original heading line, any prose before
/// the first category and, in modern sections, every tier heading are kept.
pub fn replace_targets_section(original: &str, targets: &[OperationalTarget]) -> String {
    let layout = document_layout(original).unwrap_or_else(|| layout_of(targets));
    let (key, default_heading) = match layout {
        TargetLayout::Legacy => (LEGACY_SECTION, LEGACY_HEADING),
        TargetLayout::Modern => (MODERN_SECTION, MODERN_HEADING),
    };
    let tokens = markdown::tokenize(original);

    let Some(idx) = markdown::find_heading(&tokens, key, &[2, 3]) else {
        let mut out = original.trim_end().to_string();
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(default_heading);
        out.push_str("\n\n");
        out.push_str(&render(targets, layout, TIER_LEVEL, Vec::new()));
        return out;
    };

    let level = tokens[idx].heading_level().unwrap_or(2);
    let start = tokens[idx].start;
    let end = markdown::section_end(&tokens, idx, original.len());
    let section = &tokens[idx + 1..];
    let preamble = preamble(section, end);
    let tiers = match layout {
        TargetLayout::Modern => existing_tiers(section, end),
        TargetLayout::Legacy => Vec::new(),
    };
    let body = render(targets, layout, (level + 1).min(6), tiers);

    let mut out = String::with_capacity(original.len() + body.len());
    out.push_str(&original[..start]);
    out.push_str(tokens[idx].line);
    out.push_str("\n\n");
    if !preamble.is_empty() {
        out.push_str(&preamble);
        out.push_str("\n\n");
    }
    out.push_str(&body);
    if end < original.len() {
        out.push('\n');
    }
    out.push_str(&original[end..]);
    out
}

/// Merge client edits into `existing`.
///
/// Edits for known ids overwrite only the fields they set. Edits for unknown
/// ids append a new pending target in `layout`, which callers take from the
/// document being edited.
pub fn apply_target_updates(
    mut existing: Vec<OperationalTarget>,
    updates: &[TargetUpdate],
    layout: TargetLayout,
    entity_type: EntityType,
    entity_name: &str,
) -> Vec<OperationalTarget> {
    for update in updates {
        match existing.iter_mut().find(|t| t.id == update.id) {
            Some(target) => apply_update(target, update),
            None => {
                let mut target = OperationalTarget {
                    id: update.id.clone(),
                    entity_type,
                    entity_name: entity_name.to_string(),
                    category: UNCATEGORIZED.to_string(),
                    criticality: String::new(),
                    title: update.id.clone(),
                    notes: String::new(),
                    status: TargetStatus::Pending,
                    path: String::new(),
                    linked_requirements: Vec::new(),
                    layout,
                };
                apply_update(&mut target, update);
                existing.push(target);
            }
        }
    }
    existing
}

fn apply_update(target: &mut OperationalTarget, update: &TargetUpdate) {
    if let Some(title) = &update.title {
        target.title = title.clone();
    }
    if let Some(category) = &update.category {
        target.category = category.clone();
    }
    if let Some(criticality) = &update.criticality {
        target.criticality = criticality.clone();
    }
    if let Some(notes) = &update.notes {
        target.notes = notes.clone();
    }
    if let Some(status) = update.status {
        target.status = status;
    }
    if let Some(linked) = &update.linked_requirements {
        target.linked_requirements = linked.clone();
    }
    target.path = target_path(target.layout, &target.category, &target.title);
}

/// One rendered header and the targets listed under it.
struct Group<'a> {
    key: String,
    header: String,
    targets: Vec<&'a OperationalTarget>,
}

fn render(
    targets: &[OperationalTarget],
    layout: TargetLayout,
    tier_level: usize,
    tiers: Vec<(usize, &str)>,
) -> String {
    let mut out = String::new();
    for (i, group) in group_targets(targets, layout, tier_level, tiers).iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&group.header);
        for target in &group.targets {
            match layout {
                TargetLayout::Legacy => {
                    out.push_str("  ");
                    out.push_str(&item_line(target, None));
                }
                TargetLayout::Modern => out.push_str(&item_line(target, Some(&target.id))),
            }
        }
    }
    out
}

fn group_targets<'a>(
    targets: &'a [OperationalTarget],
    layout: TargetLayout,
    tier_level: usize,
    tiers: Vec<(usize, &str)>,
) -> Vec<Group<'a>> {
    let mut groups: Vec<Group<'a>> = tiers
        .into_iter()
        .map(|(level, title)| Group {
            key: title.to_string(),
            header: tier_header(level, title),
            targets: Vec::new(),
        })
        .collect();

    for target in targets {
        let (key, header) = match layout {
            TargetLayout::Legacy => {
                let header = legacy_header(target);
                (header.clone(), header)
            }
            TargetLayout::Modern => {
                let title = tier_title(target);
                (title.clone(), tier_header(tier_level, &title))
            }
        };
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.targets.push(target),
            None => groups.push(Group {
                key,
                header,
                targets: vec![target],
            }),
        }
    }
    groups
}

fn category_of(target: &OperationalTarget) -> &str {
    if target.category.trim().is_empty() {
        UNCATEGORIZED
    } else {
        target.category.as_str()
    }
}

fn legacy_header(target: &OperationalTarget) -> String {
    let category = category_of(target);
    if target.criticality.is_empty() {
        format!("- **{}**\n", category)
    } else {
        format!("- **{} ({})**\n", category, target.criticality)
    }
}

/// Tier heading text for a modern target. The criticality is appended as
/// `(P<n>)` when the category alone would parse to a different one.
fn tier_title(target: &OperationalTarget) -> String {
    let category = category_of(target);
    if target.criticality.is_empty() || criticality_of(category) == target.criticality {
        category.to_string()
    } else {
        format!("{} ({})", category, target.criticality)
    }
}

fn tier_header(level: usize, title: &str) -> String {
    format!("{} {}\n", "#".repeat(level), title)
}

/// Tier headings inside a modern section, in document order.
fn existing_tiers<'a>(section: &[Token<'a>], end: usize) -> Vec<(usize, &'a str)> {
    section
        .iter()
        .take_while(|t| t.start < end)
        .filter_map(|t| match t.kind {
            TokenKind::Heading { level, text } => Some((level, text)),
            _ => None,
        })
        .collect()
}

fn item_line(target: &OperationalTarget, code: Option<&str>) -> String {
    let mut line = format!("- {} ", target.status.checkbox());
    if let Some(code) = code {
        line.push_str(code);
        line.push_str(" | ");
    }
    line.push_str(&target.title);
    if !target.notes.is_empty() {
        line.push_str(&format!(" _({})_", target.notes));
    }
    if !target.linked_requirements.is_empty() {
        line.push_str(&format!(" `[req:{}]`", target.linked_requirements.join(",")));
    }
    line.push('\n');
    line
}

/// Prose between the section heading and its first category, trimmed.
fn preamble(section: &[Token<'_>], end: usize) -> String {
    let lines: Vec<&str> = section
        .iter()
        .take_while(|t| t.start < end)
        .take_while(|t| matches!(t.kind, TokenKind::Plain))
        .map(|t| t.line)
        .collect();
    lines.join("\n").trim().to_string()
}
