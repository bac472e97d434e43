use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use prdtrace_core::models::{EntityRef, RequirementGroup};
use prdtrace_core::{Result, TraceError};

use super::loader::load_requirement_tree;
use crate::config::EngineConfig;

/// Read access to requirement documents.
///
/// `Ok(None)` means the file does not exist, which callers treat as "empty"
/// rather than a failure.
pub trait FileSource: Send + Sync {
    fn read(&self, path: &Path) -> Result<Option<String>>;
}

/// Reads from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFiles;

impl FileSource for LocalFiles {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(TraceError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// In-memory file map, for embedding callers and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryFiles {
    files: HashMap<PathBuf, String>,
}

impl MemoryFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

impl FileSource for MemoryFiles {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.files.get(path).cloned())
    }
}

/// Supplies the requirement tree for an entity.
pub trait RequirementSource: Send + Sync {
    fn load_tree(&self, entity: &EntityRef) -> Result<RequirementGroup>;
}

/// Loads trees from `<root>/<type>s/<name>/requirements/index.json`.
#[derive(Clone)]
pub struct FileRequirementSource {
    files: Arc<dyn FileSource>,
    config: EngineConfig,
}

impl FileRequirementSource {
    pub fn new(files: Arc<dyn FileSource>, config: EngineConfig) -> Self {
        Self { files, config }
    }

    pub fn local(config: EngineConfig) -> Self {
        Self::new(Arc::new(LocalFiles), config)
    }
}

impl RequirementSource for FileRequirementSource {
    fn load_tree(&self, entity: &EntityRef) -> Result<RequirementGroup> {
        load_requirement_tree(
            self.files.as_ref(),
            &self.config.requirements_dir(entity),
            &self.config.index_file_name,
            &entity.name,
        )
    }
}
