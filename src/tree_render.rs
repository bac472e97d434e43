//! ASCII tree rendering for requirement groups.

use prdtrace_core::models::{RequirementGroup, RequirementRecord};

const PENDING: char = '◇';
const IN_PROGRESS: char = '○';
const COMPLETE: char = '●';
const DEPRECATED: char = '✗';

/// Get the status symbol for a requirement's free-form status.
fn status_symbol(status: &str) -> char {
    match status.to_ascii_lowercase().as_str() {
        "complete" | "completed" | "implemented" | "done" => COMPLETE,
        "in_progress" | "in-progress" | "partial" => IN_PROGRESS,
        "deprecated" | "removed" => DEPRECATED,
        _ => PENDING,
    }
}

enum Node<'a> {
    Group(&'a RequirementGroup),
    Requirement(&'a RequirementRecord),
}

impl<'a> Node<'a> {
    /// A group's own requirements come before its child groups.
    fn children(&self) -> Vec<Node<'a>> {
        match *self {
            Node::Group(group) => group
                .requirements
                .iter()
                .map(Node::Requirement)
                .chain(group.children.iter().map(Node::Group))
                .collect(),
            Node::Requirement(_) => Vec::new(),
        }
    }

    fn label(&self) -> String {
        match self {
            Node::Group(group) => format!("{} ({})", group.name, group.id),
            Node::Requirement(record) if record.title.is_empty() => {
                format!("{} {}", status_symbol(&record.status), record.id)
            }
            Node::Requirement(record) => format!(
                "{} {} {}",
                status_symbol(&record.status),
                record.id,
                record.title
            ),
        }
    }
}

/// Render a requirement tree as ASCII art with status symbols.
///
/// Example output:
/// ```text
/// Demo
/// ├── ● REQ-001 Login
/// └── Billing (billing.json)
///     └── ◇ BILL-001 Invoices
/// ```
pub fn render_tree(root: &RequirementGroup) -> String {
    let mut output = String::new();
    output.push_str(&root.name);
    output.push('\n');

    let children = Node::Group(root).children();
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        render_node(&mut output, child, "", is_last);
    }
    output
}

/// Recursively render a node and its children.
fn render_node(output: &mut String, node: &Node<'_>, prefix: &str, is_last: bool) {
    let branch = if is_last { "└── " } else { "├── " };
    output.push_str(prefix);
    output.push_str(branch);
    output.push_str(&node.label());
    output.push('\n');

    let continuation = if is_last { "    " } else { "│   " };
    let child_prefix = format!("{}{}", prefix, continuation);

    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        let child_is_last = i == children.len() - 1;
        render_node(output, child, &child_prefix, child_is_last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, status: &str) -> RequirementRecord {
        RequirementRecord {
            id: id.to_string(),
            title: title.to_string(),
            status: status.to_string(),
            ..RequirementRecord::default()
        }
    }

    fn group(
        id: &str,
        name: &str,
        requirements: Vec<RequirementRecord>,
        children: Vec<RequirementGroup>,
    ) -> RequirementGroup {
        RequirementGroup {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            requirements,
            children,
        }
    }

    #[test]
    fn test_empty_root() {
        let tree = group("index.json", "Demo", vec![], vec![]);
        assert_eq!(render_tree(&tree), "Demo\n");
    }

    #[test]
    fn test_requirements_under_root() {
        let tree = group(
            "index.json",
            "Demo",
            vec![
                record("REQ-001", "Login", "complete"),
                record("REQ-002", "", "in_progress"),
            ],
            vec![],
        );
        assert_eq!(
            render_tree(&tree),
            "Demo\n├── ● REQ-001 Login\n└── ○ REQ-002\n"
        );
    }

    #[test]
    fn test_nested_groups() {
        let tree = group(
            "index.json",
            "Demo",
            vec![record("REQ-001", "Login", "complete")],
            vec![
                group(
                    "billing.json",
                    "Billing",
                    vec![
                        record("BILL-001", "Invoices", "pending"),
                        record("BILL-002", "Refunds", "deprecated"),
                    ],
                    vec![],
                ),
                group("auth.json", "Auth", vec![], vec![]),
            ],
        );
        let expected = "Demo\n├── ● REQ-001 Login\n├── Billing (billing.json)\n│   ├── ◇ BILL-001 Invoices\n│   └── ✗ BILL-002 Refunds\n└── Auth (auth.json)\n";
        assert_eq!(render_tree(&tree), expected);
    }
}
