//! Domain models for prdtrace.
//!
//! # Core Concepts
//!
//! ## Document-derived
//!
//! - [`OperationalTarget`]: A checklist item in a PRD, tagged with a priority tier.
//!   Recreated on every parse; never stored on its own.
//! - [`TargetUpdate`]: A client edit applied before a targets section is rewritten.
//!
//! ## Formal requirements
//!
//! - [`RequirementGroup`]: A node in the file-backed requirement tree.
//! - [`RequirementRecord`]: A tracked engineering requirement, linked to the
//!   targets it implements.
//!
//! ## Reports
//!
//! - [`StructureReport`] / [`TemplateReport`]: Template compliance results.
//! - [`QualityReport`]: Traceability summary for one entity.

mod entity;
mod report;
mod requirement;
mod target;
mod template;

pub use entity::*;
pub use report::*;
pub use requirement::*;
pub use target::*;
pub use template::*;
