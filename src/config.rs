//! Engine configuration.
//!
//! Values come from environment variables first, then from an optional JSON
//! file at `<config_dir>/prdtrace/config.json`, then from defaults:
//! - `PRDTRACE_ROOT` - directory holding `scenarios/` and `resources/` (default `.`)
//! - `PRDTRACE_CACHE_TTL_SECS` - cache lifetime in seconds (default 90)

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use dirs::config_dir;
use prdtrace_core::models::EntityRef;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "prdtrace";
const CONFIG_FILE: &str = "config.json";

const DEFAULT_TTL_SECS: u64 = 90;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub root: PathBuf,
    /// Lifetime of cached requirement trees and quality reports.
    pub cache_ttl: Duration,
    pub prd_file_name: String,
    pub requirements_dir_name: String,
    pub index_file_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            cache_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            prd_file_name: "PRD.md".to_string(),
            requirements_dir_name: "requirements".to_string(),
            index_file_name: "index.json".to_string(),
        }
    }
}

/// Subset of settings that may be stored in the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FileConfig {
    root: Option<PathBuf>,
    cache_ttl_secs: Option<u64>,
    prd_file_name: Option<String>,
    requirements_dir_name: Option<String>,
    index_file_name: Option<String>,
}

impl EngineConfig {
    /// Load configuration from the environment, falling back to the config file.
    pub fn from_env() -> Self {
        let file = match FileConfig::try_load() {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Failed to load config file, using defaults: {:#}", e);
                FileConfig::default()
            }
        };

        let defaults = Self::default();
        let root = std::env::var("PRDTRACE_ROOT")
            .ok()
            .map(PathBuf::from)
            .or(file.root)
            .unwrap_or(defaults.root);
        let ttl_secs = std::env::var("PRDTRACE_CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .or(file.cache_ttl_secs)
            .unwrap_or(DEFAULT_TTL_SECS);

        Self {
            root,
            cache_ttl: Duration::from_secs(ttl_secs),
            prd_file_name: file.prd_file_name.unwrap_or(defaults.prd_file_name),
            requirements_dir_name: file
                .requirements_dir_name
                .unwrap_or(defaults.requirements_dir_name),
            index_file_name: file.index_file_name.unwrap_or(defaults.index_file_name),
        }
    }

    /// Default layout rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// `<root>/<type>s/<name>`
    pub fn entity_dir(&self, entity: &EntityRef) -> PathBuf {
        self.root
            .join(format!("{}s", entity.entity_type.as_str()))
            .join(&entity.name)
    }

    pub fn prd_path(&self, entity: &EntityRef) -> PathBuf {
        self.entity_dir(entity).join(&self.prd_file_name)
    }

    pub fn requirements_dir(&self, entity: &EntityRef) -> PathBuf {
        self.entity_dir(entity).join(&self.requirements_dir_name)
    }
}

impl FileConfig {
    fn try_load() -> Result<Self> {
        let config_path = get_config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
