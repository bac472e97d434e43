use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading requirement trees or talking to storage.
///
/// Parsing, linking, validation and serialization never fail; malformed
/// markdown is skipped and schema problems are reported as data.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("import cycle detected at {}", path.display())]
    ImportCycle { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed requirement document {}: {source}", path.display())]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no PRD document found for {entity}")]
    DocumentNotFound { entity: String },

    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, TraceError>;
