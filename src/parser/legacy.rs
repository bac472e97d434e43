use prdtrace_core::models::{OperationalTarget, TargetLayout, TargetStatus};

use super::item::split_item;
use super::{target_path, Owner, LEGACY_SECTION};
use crate::markdown::{self, Token, TokenKind};

/// Parse the `Functional Requirements` block. `None` when the block is absent.
pub(crate) fn parse(tokens: &[Token<'_>], owner: &Owner<'_>) -> Option<Vec<OperationalTarget>> {
    let heading = markdown::find_heading(tokens, LEGACY_SECTION, &[2, 3])?;
    let level = tokens[heading].heading_level()?;

    let mut targets = Vec::new();
    let mut current: Option<(String, String)> = None;

    for token in &tokens[heading + 1..] {
        match token.kind {
            TokenKind::Heading { level: l, .. } if l <= level => break,
            TokenKind::CategoryHeader { label } => {
                current = Some(markdown::split_category_label(label));
            }
            TokenKind::ChecklistItem { checked, text } => {
                let Some((category, criticality)) = &current else {
                    continue;
                };
                let item = split_item(text);
                if item.body.is_empty() {
                    continue;
                }
                targets.push(OperationalTarget {
                    id: owner.derived_id(category, &item.body),
                    entity_type: owner.entity_type,
                    entity_name: owner.entity_name.to_string(),
                    category: category.clone(),
                    criticality: criticality.clone(),
                    path: target_path(TargetLayout::Legacy, category, &item.body),
                    title: item.body,
                    notes: item.notes.unwrap_or_default(),
                    status: if checked {
                        TargetStatus::Complete
                    } else {
                        TargetStatus::Pending
                    },
                    linked_requirements: item.requirement_ids,
                    layout: TargetLayout::Legacy,
                });
            }
            _ => {}
        }
    }

    Some(targets)
}
