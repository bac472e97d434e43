//! Facade tying storage collaborators to the pure operations.
//!
//! The engine owns the two caches (requirement trees and quality reports),
//! both keyed by `<entity_type>:<name>` and expiring after the configured
//! TTL. Writes do not invalidate them; pass `bypass_cache` for fresh data.

use std::sync::Arc;

use prdtrace_core::models::{
    EntityRef, OperationalTarget, QualityReport, RequirementGroup, StructureReport,
    TargetUpdate, TemplateReport,
};
use prdtrace_core::{Result, TraceError};

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::config::EngineConfig;
use crate::linkage::{link_targets_and_requirements, Linkage};
use crate::parser::{document_layout, parse_targets};
use crate::report::build_quality_report;
use crate::requirements::{FileRequirementSource, RequirementSource};
use crate::serializer::{apply_target_updates, layout_of, replace_targets_section};
use crate::store::{DocumentStore, FsDocumentStore};
use crate::template::{check_structure, validate_template};

pub struct TraceEngine {
    documents: Arc<dyn DocumentStore>,
    requirements: Arc<dyn RequirementSource>,
    clock: Arc<dyn Clock>,
    trees: TtlCache<RequirementGroup>,
    reports: TtlCache<QualityReport>,
}

impl TraceEngine {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        requirements: Arc<dyn RequirementSource>,
        clock: Arc<dyn Clock>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            documents,
            requirements,
            trees: TtlCache::new(config.cache_ttl, clock.clone()),
            reports: TtlCache::new(config.cache_ttl, clock.clone()),
            clock,
        }
    }

    /// Filesystem-backed engine using the system clock.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            Arc::new(FsDocumentStore::new(config.clone())),
            Arc::new(FileRequirementSource::local(config.clone())),
            Arc::new(SystemClock),
            config,
        )
    }

    /// The PRD text. Fails when the entity has no document.
    pub fn document_text(&self, entity: &EntityRef) -> Result<String> {
        self.documents
            .read_document(entity)?
            .ok_or_else(|| TraceError::DocumentNotFound {
                entity: entity.to_string(),
            })
    }

    /// Parsed targets; an entity without a PRD has none.
    pub fn targets(&self, entity: &EntityRef) -> Result<Vec<OperationalTarget>> {
        let text = self.documents.read_document(entity)?.unwrap_or_default();
        Ok(parse_targets(&text, entity.entity_type, &entity.name))
    }

    pub fn requirement_tree(
        &self,
        entity: &EntityRef,
        bypass_cache: bool,
    ) -> Result<RequirementGroup> {
        self.trees
            .get_or_try_insert_with(&entity.cache_key(), bypass_cache, || {
                self.requirements.load_tree(entity)
            })
    }

    pub fn linkage(&self, entity: &EntityRef, bypass_cache: bool) -> Result<Linkage> {
        let targets = self.targets(entity)?;
        let tree = self.requirement_tree(entity, bypass_cache)?;
        Ok(link_targets_and_requirements(targets, &tree))
    }

    pub fn validate(&self, entity: &EntityRef) -> Result<TemplateReport> {
        Ok(validate_template(&self.document_text(entity)?))
    }

    pub fn check_structure(&self, entity: &EntityRef) -> Result<StructureReport> {
        Ok(check_structure(&self.document_text(entity)?))
    }

    pub fn quality_report(&self, entity: &EntityRef, bypass_cache: bool) -> Result<QualityReport> {
        self.reports
            .get_or_try_insert_with(&entity.cache_key(), bypass_cache, || {
                let text = self.documents.read_document(entity)?.unwrap_or_default();
                let tree = self.requirement_tree(entity, bypass_cache)?;
                Ok(build_quality_report(entity, &text, &tree, self.clock.now()))
            })
    }

    /// Apply `updates` to the entity's targets and rewrite its PRD.
    ///
    /// Returns the targets as written.
    pub fn update_targets(
        &self,
        entity: &EntityRef,
        updates: &[TargetUpdate],
    ) -> Result<Vec<OperationalTarget>> {
        let original = self.document_text(entity)?;
        let current = parse_targets(&original, entity.entity_type, &entity.name);
        let layout = document_layout(&original).unwrap_or_else(|| layout_of(&current));
        let targets =
            apply_target_updates(current, updates, layout, entity.entity_type, &entity.name);
        let updated = replace_targets_section(&original, &targets);

        self.documents.write_document(entity, &updated)?;
        tracing::info!(
            entity = %entity,
            targets = targets.len(),
            updates = updates.len(),
            "rewrote targets section"
        );
        Ok(targets)
    }
}
