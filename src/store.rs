//! PRD document storage.
//!
//! The engine only needs "read the document for this entity" and "write it
//! back". Where the text lives is up to the implementation.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use prdtrace_core::models::EntityRef;
use prdtrace_core::{Result, TraceError};

use crate::config::EngineConfig;

pub trait DocumentStore: Send + Sync {
    /// `Ok(None)` when the entity has no PRD yet.
    fn read_document(&self, entity: &EntityRef) -> Result<Option<String>>;
    fn write_document(&self, entity: &EntityRef, text: &str) -> Result<()>;
}

/// Reads and writes `<root>/<type>s/<name>/PRD.md`.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    config: EngineConfig,
}

impl FsDocumentStore {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }
}

impl DocumentStore for FsDocumentStore {
    fn read_document(&self, entity: &EntityRef) -> Result<Option<String>> {
        let path = self.config.prd_path(entity);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(TraceError::Io { path, source }),
        }
    }

    fn write_document(&self, entity: &EntityRef, text: &str) -> Result<()> {
        let path = self.config.prd_path(entity);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| TraceError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&path, text).map_err(|source| TraceError::Io { path, source })
    }
}

/// Keeps documents in memory, for embedding callers and tests.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<EntityRef, String>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, entity: EntityRef, text: impl Into<String>) -> Self {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(entity, text.into());
        self
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn read_document(&self, entity: &EntityRef) -> Result<Option<String>> {
        Ok(self
            .documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(entity)
            .cloned())
    }

    fn write_document(&self, entity: &EntityRef, text: &str) -> Result<()> {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(entity.clone(), text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prdtrace_core::models::EntityType;

    #[test]
    fn fs_store_round_trips_and_reports_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsDocumentStore::new(EngineConfig::with_root(dir.path()));
        let entity = EntityRef::new(EntityType::Scenario, "demo");

        assert!(store.read_document(&entity).expect("read").is_none());
        store.write_document(&entity, "# Demo\n").expect("write");
        assert_eq!(
            store.read_document(&entity).expect("read").as_deref(),
            Some("# Demo\n")
        );
        assert!(dir.path().join("scenarios/demo/PRD.md").exists());
    }
}
