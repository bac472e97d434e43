use prdtrace_core::models::RequirementRecord;
use serde::{Deserialize, Serialize};

/// On-disk shape of one requirement document.
///
/// ```json
/// {
///   "_metadata": { "name": "Auth", "description": "Login and sessions" },
///   "imports": ["auth/login.json"],
///   "requirements": [{ "id": "REQ-001", "prd_ref": "Functional Requirements > Must Have > Login" }]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequirementDocument {
    #[serde(rename = "_metadata", default)]
    pub metadata: DocumentMetadata,
    /// Paths relative to the requirements directory.
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<RequirementRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
}
