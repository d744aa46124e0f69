//! Configuration models loaded from `.pcs/config.toml`.
//!
//! # Example
//!
//! ```toml
//! # .pcs/config.toml
//! [storage]
//! root = "/data/pcs"
//!
//! [logging]
//! format = "json"
//! filter = "pcs=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default tracing filter when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "pcs=info";

/// Unified application configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the storage collaborator.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StorageConfig {
    /// Base directory for relative input paths.
    ///
    /// A relative value is resolved against the project root by the loader.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// Output format of the log subscriber.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,

    /// `tracing_subscriber::EnvFilter` directives.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
