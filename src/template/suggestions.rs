use crate::markdown::normalize_title;

use super::schema::HeadingSpec;

/// Ready-to-paste markdown for a missing heading, including boilerplate for
/// the sections the template knows about.
pub(crate) fn suggestion_for(spec: &HeadingSpec, subsections: &[HeadingSpec]) -> String {
    let mut block = render(spec);
    for sub in subsections {
        block.push('\n');
        block.push_str(&render(sub));
    }
    block
}

/// Key under which a suggestion is stored in a report.
pub(crate) fn suggestion_key(spec: &HeadingSpec) -> String {
    normalize_title(spec.title)
}

fn render(spec: &HeadingSpec) -> String {
    format!(
        "{} {}\n\n{}\n",
        "#".repeat(spec.level),
        spec.title,
        boilerplate(spec.key).unwrap_or_else(|| format!("- _Describe {} here._", spec.key))
    )
}

fn boilerplate(key: &str) -> Option<String> {
    let body = match key {
        "overview" => {
            "- **Purpose**: What this delivers and why it matters.\n\
             - **Primary users**: Who relies on it.\n\
             - **Deployment surfaces**: CLI, API, UI."
        }
        "operational targets" => "Targets are grouped by tier below.",
        "p0" => "- [ ] OT-P0-001 | Core capability | What must work before launch",
        "p1" => "- [ ] OT-P1-001 | Follow-up capability | What should land soon after launch",
        "p2" => "- [ ] OT-P2-001 | Future capability | Longer-term expansion",
        "tech direction snapshot" => {
            "- Preferred stack:\n- Data and storage:\n- Integration strategy:"
        }
        "dependencies & launch plan" => {
            "- Required resources:\n- Scenario dependencies:\n- Launch sequencing:"
        }
        "ux & branding" => "Describe the look, feel and accessibility expectations.",
        "risks & open questions" => "- Risk:\n- Open question:",
        "functional requirements" => {
            "- **Must Have (P0)**\n  - [ ] Core capability\n- **Should Have (P1)**\n  - [ ] Follow-up capability"
        }
        "success metrics" => "- Completion target:\n- Quality target:",
        _ => return None,
    };
    Some(body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::schema::{LEGACY_CATALOG, MODERN_CATALOG};

    #[test]
    fn known_sections_get_boilerplate() {
        let overview = suggestion_for(&MODERN_CATALOG[0], &[]);
        assert!(overview.starts_with("## 🎯 Overview\n\n- **Purpose**"));
    }

    #[test]
    fn subsections_are_appended() {
        let block = suggestion_for(&MODERN_CATALOG[1], &MODERN_CATALOG[2..5]);
        assert!(block.contains("### 🔴 P0 – Must ship for viability"));
        assert!(block.contains("- [ ] OT-P2-001"));
    }

    #[test]
    fn unknown_sections_get_placeholder_bullet() {
        let block = suggestion_for(&LEGACY_CATALOG[9], &[]);
        assert_eq!(block, "## 🔗 References\n\n- _Describe references here._\n");
        assert_eq!(suggestion_key(&LEGACY_CATALOG[9]), "references");
    }
}
