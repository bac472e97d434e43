//! File-backed requirement tree.
//!
//! Each entity keeps a root index document under its requirements directory.
//! Documents declare requirement records and import further documents; the
//! loader follows imports depth-first and builds a [`RequirementGroup`] tree.
//!
//! [`RequirementGroup`]: prdtrace_core::models::RequirementGroup

mod document;
mod loader;
mod source;

pub use document::{DocumentMetadata, RequirementDocument};
pub use loader::load_requirement_tree;
pub use source::{FileRequirementSource, FileSource, LocalFiles, MemoryFiles, RequirementSource};
