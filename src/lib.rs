//! prdtrace: operational targets, requirement traceability and PRD template checks.
//!
//! The pure operations work on text and trees handed in by the caller:
//!
//! - [`parse_targets`]: markdown to [`OperationalTarget`]s
//! - [`link_targets_and_requirements`]: targets and a requirement tree to links and orphans
//! - [`validate_template`] / [`check_structure`]: template compliance
//! - [`serialize_targets`] / [`replace_targets_section`]: targets back to markdown
//!
//! [`TraceEngine`] wires them to document and requirement storage with caching.
//!
//! [`OperationalTarget`]: prdtrace_core::models::OperationalTarget

pub mod cache;
pub mod config;
pub mod engine;
pub mod linkage;
pub mod markdown;
pub mod parser;
pub mod report;
pub mod requirements;
pub mod serializer;
pub mod store;
pub mod template;
pub mod tree_render;

pub use prdtrace_core::{models, Result, TraceError};

pub use config::EngineConfig;
pub use engine::TraceEngine;
pub use linkage::{link_targets_and_requirements, Linkage};
pub use parser::{document_layout, parse_targets, slugify};
pub use requirements::load_requirement_tree;
pub use serializer::{apply_target_updates, layout_of, replace_targets_section, serialize_targets};
pub use template::{check_structure, validate_template};
