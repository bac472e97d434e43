use serde::{Deserialize, Serialize};

/// A formally tracked requirement loaded from the requirement tree.
///
/// `prd_ref` is a `>`-delimited path (`Section > Category > Title`) pointing
/// at the target this requirement is meant to implement. `linked_targets` is
/// empty on load and filled in by the linkage resolver.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequirementRecord {
    pub id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub prd_ref: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub criticality: String,
    /// Group id of the file that declared this record.
    #[serde(default)]
    pub source_file: String,
    #[serde(default)]
    pub validation: Vec<ValidationEntry>,
    #[serde(default)]
    pub linked_targets: Vec<String>,
}

/// One validation phase attached to a requirement (a test, a lint, a manual check).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationEntry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "ref", default)]
    pub reference: String,
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub notes: String,
}

/// A node in the requirement tree, backed by one requirement document.
///
/// The import graph that produces the tree is acyclic; the loader refuses
/// to build a tree otherwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequirementGroup {
    /// Path of the backing document, relative to the requirements directory.
    pub id: String,
    pub name: String,
    pub description: String,
    pub requirements: Vec<RequirementRecord>,
    pub children: Vec<RequirementGroup>,
}

impl RequirementGroup {
    /// An empty root, used when an entity has no requirement index yet.
    pub fn empty(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty() && self.children.iter().all(RequirementGroup::is_empty)
    }

    /// All records in pre-order: this group's own records, then each child in order.
    pub fn flatten(&self) -> Vec<RequirementRecord> {
        let mut out = Vec::with_capacity(self.requirement_count());
        self.collect_into(&mut out);
        out
    }

    fn collect_into(&self, out: &mut Vec<RequirementRecord>) {
        out.extend(self.requirements.iter().cloned());
        for child in &self.children {
            child.collect_into(out);
        }
    }

    pub fn requirement_count(&self) -> usize {
        self.requirements.len()
            + self
                .children
                .iter()
                .map(RequirementGroup::requirement_count)
                .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> RequirementRecord {
        RequirementRecord {
            id: id.to_string(),
            ..RequirementRecord::default()
        }
    }

    #[test]
    fn flatten_is_preorder() {
        let tree = RequirementGroup {
            id: "index.json".to_string(),
            requirements: vec![record("A")],
            children: vec![
                RequirementGroup {
                    id: "b.json".to_string(),
                    requirements: vec![record("B1"), record("B2")],
                    children: vec![RequirementGroup {
                        id: "c.json".to_string(),
                        requirements: vec![record("C")],
                        ..RequirementGroup::default()
                    }],
                    ..RequirementGroup::default()
                },
                RequirementGroup {
                    id: "d.json".to_string(),
                    requirements: vec![record("D")],
                    ..RequirementGroup::default()
                },
            ],
            ..RequirementGroup::default()
        };

        let ids: Vec<_> = tree.flatten().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["A", "B1", "B2", "C", "D"]);
        assert_eq!(tree.requirement_count(), 5);
    }

    #[test]
    fn empty_group_has_no_records() {
        let tree = RequirementGroup::empty("index.json", "demo");
        assert!(tree.is_empty());
        assert!(tree.flatten().is_empty());
    }

    #[test]
    fn validation_entry_uses_short_json_keys() {
        let entry: ValidationEntry =
            serde_json::from_str(r#"{"type":"test","ref":"test/a.bats","phase":"unit"}"#)
                .expect("valid json");
        assert_eq!(entry.kind, "test");
        assert_eq!(entry.reference, "test/a.bats");
        assert!(entry.status.is_empty());
    }
}
