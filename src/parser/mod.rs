//! Operational target parser.
//!
//! Two document generations are understood:
//!
//! - **Legacy**: a `### Functional Requirements` block with
//!   `- **Category (P0)**` bullets, each followed by checklist items.
//! - **Modern**: a `## Operational Targets` section with one subheading per
//!   tier and items of the form `- [ ] OT-P0-001 | Title`, optionally tagged
//!   with `` `[req:ID,...]` ``.
//!
//! Parsing never fails. Lines that fit neither grammar are skipped and a
//! document without a targets section parses to an empty list.

mod item;
mod legacy;
mod modern;
mod slug;

pub use slug::slugify;
pub(crate) use modern::criticality_of;

use prdtrace_core::models::{EntityType, OperationalTarget, TargetLayout};

use crate::markdown;

/// Heading that opens the legacy targets block (normalized).
pub const LEGACY_SECTION: &str = "functional requirements";
/// Heading that opens the modern targets section (normalized).
pub const MODERN_SECTION: &str = "operational targets";

/// Extract every operational target from `text`, in document order.
///
/// When a document carries both layouts the modern section wins.
pub fn parse_targets(
    text: &str,
    entity_type: EntityType,
    entity_name: &str,
) -> Vec<OperationalTarget> {
    let tokens = markdown::tokenize(text);
    let owner = Owner {
        entity_type,
        entity_name,
    };

    if let Some(targets) = modern::parse(&tokens, &owner) {
        tracing::debug!(count = targets.len(), entity = entity_name, "parsed modern targets");
        return targets;
    }
    if let Some(targets) = legacy::parse(&tokens, &owner) {
        tracing::debug!(count = targets.len(), entity = entity_name, "parsed legacy targets");
        return targets;
    }

    tracing::debug!(entity = entity_name, "no targets section found");
    Vec::new()
}

/// Layout of the targets section `text` carries, with the same precedence as
/// [`parse_targets`]. `None` when the document has neither section.
pub fn document_layout(text: &str) -> Option<TargetLayout> {
    let tokens = markdown::tokenize(text);
    if markdown::find_heading(&tokens, MODERN_SECTION, &[2, 3]).is_some() {
        Some(TargetLayout::Modern)
    } else if markdown::find_heading(&tokens, LEGACY_SECTION, &[2, 3]).is_some() {
        Some(TargetLayout::Legacy)
    } else {
        None
    }
}

/// Human-readable location of a target, e.g. `Functional Requirements > Must Have > Login`.
pub fn target_path(layout: TargetLayout, category: &str, title: &str) -> String {
    let section = match layout {
        TargetLayout::Legacy => "Functional Requirements",
        TargetLayout::Modern => "Operational Targets",
    };
    format!("{} > {} > {}", section, category, title)
}

/// Entity a parse run attributes its targets to.
pub(crate) struct Owner<'a> {
    pub entity_type: EntityType,
    pub entity_name: &'a str,
}

impl Owner<'_> {
    /// Stable identifier for items without an explicit short code.
    pub fn derived_id(&self, category: &str, title: &str) -> String {
        slugify(&format!("{}-{}-{}", self.entity_name, category, title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prdtrace_core::models::{TargetLayout, TargetStatus};

    const LEGACY: &str = "\
# Demo PRD

### Functional Requirements

- **Must Have (P0)**
  - [ ] Visual workflow builder
  - [x] Run history _(kept for 30 days)_
- **Nice to Have**
  - [X] Dark mode

### Performance Criteria
- [ ] Not a target
";

    const MODERN: &str = "\
## 🎯 Operational Targets

### 🔴 P0 – Must ship for viability
- [ ] OT-P0-001 | Visual workflow builder | drag and drop `[req:REQ-1,REQ-2]`
- [x] OT-P0-002 | Run history _(30 days)_

### 🟠 P1 – Should have post-launch
- [ ] OT-P1-001 | Sharing

## 🧱 Tech Direction Snapshot
- [ ] Not a target
";

    #[test]
    fn legacy_items_follow_category_headers() {
        let targets = parse_targets(LEGACY, EntityType::Scenario, "demo");
        assert_eq!(targets.len(), 3);

        let builder = &targets[0];
        assert_eq!(builder.id, "demo-must-have-visual-workflow-builder");
        assert_eq!(builder.category, "Must Have");
        assert_eq!(builder.criticality, "P0");
        assert_eq!(builder.status, TargetStatus::Pending);
        assert_eq!(builder.layout, TargetLayout::Legacy);
        assert_eq!(
            builder.path,
            "Functional Requirements > Must Have > Visual workflow builder"
        );

        assert_eq!(targets[1].notes, "kept for 30 days");
        assert_eq!(targets[1].title, "Run history");
        assert!(targets[1].is_complete());

        assert_eq!(targets[2].category, "Nice to Have");
        assert_eq!(targets[2].criticality, "");
        assert!(targets[2].is_complete());
    }

    #[test]
    fn modern_items_use_short_codes_and_explicit_tags() {
        let targets = parse_targets(MODERN, EntityType::Scenario, "demo");
        assert_eq!(targets.len(), 3);

        let first = &targets[0];
        assert_eq!(first.id, "OT-P0-001");
        assert_eq!(first.title, "Visual workflow builder");
        assert_eq!(first.notes, "drag and drop");
        assert_eq!(first.criticality, "P0");
        assert_eq!(first.category, "🔴 P0 – Must ship for viability");
        assert_eq!(first.linked_requirements, vec!["REQ-1", "REQ-2"]);
        assert_eq!(first.layout, TargetLayout::Modern);

        assert_eq!(targets[1].notes, "30 days");
        assert!(targets[1].is_complete());
        assert_eq!(targets[2].criticality, "P1");
    }

    #[test]
    fn missing_section_yields_empty_list() {
        let targets = parse_targets("# Nothing here\n- [ ] stray", EntityType::Resource, "x");
        assert!(targets.is_empty());
    }

    #[test]
    fn document_layout_prefers_modern_section() {
        assert_eq!(document_layout(LEGACY), Some(TargetLayout::Legacy));
        assert_eq!(document_layout(MODERN), Some(TargetLayout::Modern));
        let both = format!("{}\n{}", LEGACY, MODERN);
        assert_eq!(document_layout(&both), Some(TargetLayout::Modern));
        assert_eq!(document_layout("# Nothing\n"), None);
    }

    #[test]
    fn items_before_any_category_are_skipped() {
        let text = "### Functional Requirements\n- [ ] orphan\n- **Core (P0)**\n- [ ] kept\n";
        let targets = parse_targets(text, EntityType::Scenario, "demo");
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].title, "kept");
    }
}
