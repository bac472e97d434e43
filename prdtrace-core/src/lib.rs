//! Shared domain model and error types for prdtrace.

pub mod error;
pub mod models;

pub use error::{Result, TraceError};
