//! Core configuration loaded from `.ai/config.yaml`
//!
//! The configuration is loaded once by the engine and passed down to the
//! components that need it. Nothing in this crate caches it globally.

use serde::{Deserialize, Serialize};

use aisync_fs::NormalizedPath;

use crate::{Error, Result};

fn default_memory_bank_path() -> String {
    "memory-bank".to_string()
}

fn default_rules_path() -> String {
    ".ai/rules".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// Project identity section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub name: String,

    /// Project type, e.g. "library" or "application"
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tech_stack: Vec<String>,
}

/// Default paths used by targets and the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default = "default_memory_bank_path")]
    pub memory_bank_path: String,

    #[serde(default = "default_rules_path")]
    pub rules_path: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            memory_bank_path: default_memory_bank_path(),
            rules_path: default_rules_path(),
        }
    }
}

/// Workflow section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(default)]
    pub phases: Vec<String>,
}

/// Core configuration parsed from `.ai/config.yaml`
///
/// An absent or unparseable core configuration is fatal: without it no
/// target can be projected meaningfully, so the run aborts before any side
/// effect.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub project: ProjectInfo,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub workflow: Workflow,

    /// Configuration schema version, surfaced in render contexts
    #[serde(default = "default_version")]
    pub version: String,
}

impl CoreConfig {
    /// Load the core configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file does not exist and `ConfigParse`
    /// if it exists but is not valid YAML.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound { path: path.clone() });
        }

        let content = aisync_fs::io::read_text(path)?;
        serde_yaml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })
    }
}
