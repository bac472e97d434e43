use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};

use prdtrace_core::models::RequirementGroup;
use prdtrace_core::{Result, TraceError};

use super::document::RequirementDocument;
use super::source::FileSource;

/// Load the requirement tree rooted at `<base_dir>/<index_file>`.
///
/// Imports are resolved against `base_dir` and followed depth-first. Every
/// file is marked visited before its imports are followed; reaching a
/// visited file again aborts the whole load with [`TraceError::ImportCycle`].
/// A missing root index yields an empty tree named `root_name`; a missing
/// imported file is skipped with a warning.
pub fn load_requirement_tree(
    files: &dyn FileSource,
    base_dir: &Path,
    index_file: &str,
    root_name: &str,
) -> Result<RequirementGroup> {
    let mut walker = TreeWalker {
        files,
        base_dir,
        visited: HashSet::new(),
    };

    match walker.load_group(index_file, root_name)? {
        Some(tree) => {
            for duplicate in duplicate_ids(&tree) {
                tracing::warn!(
                    id = %duplicate.id,
                    first = %duplicate.first_file,
                    again = %duplicate.second_file,
                    "requirement id declared more than once"
                );
            }
            tracing::debug!(
                root = %base_dir.display(),
                files = walker.visited.len(),
                requirements = tree.requirement_count(),
                "loaded requirement tree"
            );
            Ok(tree)
        }
        None => {
            tracing::debug!(root = %base_dir.display(), "no requirement index, using empty tree");
            Ok(RequirementGroup::empty(index_file, root_name))
        }
    }
}

struct TreeWalker<'a> {
    files: &'a dyn FileSource,
    base_dir: &'a Path,
    visited: HashSet<PathBuf>,
}

impl TreeWalker<'_> {
    fn load_group(&mut self, relative: &str, fallback_name: &str) -> Result<Option<RequirementGroup>> {
        let path = normalize_path(&self.base_dir.join(relative));
        if !self.visited.insert(path.clone()) {
            return Err(TraceError::ImportCycle { path });
        }

        let Some(content) = self.files.read(&path)? else {
            return Ok(None);
        };
        let document: RequirementDocument =
            serde_json::from_str(&content).map_err(|source| TraceError::MalformedDocument {
                path: path.clone(),
                source,
            })?;

        let id = group_id(relative);
        let mut requirements = document.requirements;
        for record in &mut requirements {
            record.source_file = id.clone();
        }

        let mut children = Vec::with_capacity(document.imports.len());
        for import in &document.imports {
            match self.load_group(import, &file_stem(import))? {
                Some(child) => children.push(child),
                None => tracing::warn!(import = %import, from = %id, "imported requirement file not found"),
            }
        }

        Ok(Some(RequirementGroup {
            name: document.metadata.name.unwrap_or_else(|| fallback_name.to_string()),
            description: document.metadata.description.unwrap_or_default(),
            id,
            requirements,
            children,
        }))
    }
}

/// A requirement id declared a second time, with both declaring files.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DuplicateId {
    pub id: String,
    pub first_file: String,
    pub second_file: String,
}

/// Ids that appear more than once in `tree`, in pre-order.
pub(crate) fn duplicate_ids(tree: &RequirementGroup) -> Vec<DuplicateId> {
    let mut first_seen: HashMap<String, String> = HashMap::new();
    let mut duplicates = Vec::new();
    for record in tree.flatten() {
        match first_seen.get(&record.id) {
            Some(first_file) => duplicates.push(DuplicateId {
                id: record.id.clone(),
                first_file: first_file.clone(),
                second_file: record.source_file.clone(),
            }),
            None => {
                first_seen.insert(record.id, record.source_file);
            }
        }
    }
    duplicates
}

/// Resolve `.` and `..` without touching the filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn group_id(relative: &str) -> String {
    let cleaned = normalize_path(Path::new(relative));
    cleaned
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn file_stem(relative: &str) -> String {
    Path::new(relative)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| relative.to_string())
}
