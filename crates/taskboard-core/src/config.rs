//! Board configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! toast_ttl_ms = 3000
//! operation_history = 32
//! id_strategy = "sequence"
//! seed_demo_data = true
//!
//! [latency]
//! create_task_ms = 0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Simulated Data Store latency per operation, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub list_tasks_ms: u64,
    pub get_task_ms: u64,
    pub create_task_ms: u64,
    pub update_task_ms: u64,
    pub delete_task_ms: u64,
    pub list_users_ms: u64,
    pub get_user_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            list_tasks_ms: 800,
            get_task_ms: 500,
            create_task_ms: 1000,
            update_task_ms: 800,
            delete_task_ms: 600,
            list_users_ms: 500,
            get_user_ms: 300,
        }
    }
}

impl LatencyConfig {
    /// No artificial delay at all.
    pub fn none() -> Self {
        Self {
            list_tasks_ms: 0,
            get_task_ms: 0,
            create_task_ms: 0,
            update_task_ms: 0,
            delete_task_ms: 0,
            list_users_ms: 0,
            get_user_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Ulid,
    Sequence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub latency: LatencyConfig,
    /// Toast auto-dismiss delay.
    pub toast_ttl_ms: u64,
    /// Finished operations kept for inspection.
    pub operation_history: usize,
    pub id_strategy: IdStrategy,
    pub seed_demo_data: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            latency: LatencyConfig::default(),
            toast_ttl_ms: 3000,
            operation_history: 32,
            id_strategy: IdStrategy::default(),
            seed_demo_data: true,
        }
    }
}

impl BoardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }
}
