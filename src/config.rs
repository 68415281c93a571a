use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::CalmtaskError;
use crate::models::Priority;

/// Optional settings file, e.g.
///
/// ```json
/// { "default_priority": "high", "seed_sample_tasks": true, "log_level": "info" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Priority given to `add` when `--priority` is omitted.
    pub default_priority: Priority,
    pub seed_sample_tasks: bool,
    pub log_level: Option<String>,
}

impl Config {
    /// Load from `path`, or fall back to defaults when no path was given.
    pub fn load(path: Option<&Path>) -> Result<Self, CalmtaskError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path).map_err(|e| {
            CalmtaskError::config(format!("Cannot read config {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
            .map_err(|e| CalmtaskError::config(format!("Invalid config {}: {}", path.display(), e.message)))
    }

    pub fn from_json(content: &str) -> Result<Self, CalmtaskError> {
        serde_json::from_str(content).map_err(|e| CalmtaskError::config(e.to_string()))
    }
}
