//! Configuration file loader for the `.pcs/` directory.

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use std::path::Path;

/// Directory under the project root holding pcs configuration.
pub const CONFIG_DIR: &str = ".pcs";

/// Name of the configuration file inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Loads configuration from `<root>/.pcs/config.toml`.
///
/// # Arguments
///
/// * `root` - Project root containing the `.pcs/` folder
///
/// # Returns
///
/// The loaded `AppConfig`. A missing `.pcs/` directory or `config.toml`
/// yields the default configuration rather than an error. A relative
/// `storage.root` is resolved against `root`.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - The file exists but cannot be read
/// - The file is not valid TOML or has fields of the wrong type
/// - `logging.filter` is empty
///
/// # Example
///
/// ```rust,no_run
/// use pcs_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Storage root: {:?}", config.storage.root);
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

    if !config_path.exists() {
        return Ok(AppConfig::default());
    }

    let content = tokio::fs::read_to_string(&config_path)
        .await
        .map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path.clone(),
            source,
        })?;

    if config.logging.filter.trim().is_empty() {
        return Err(ConfigError::InvalidConfig {
            path: config_path,
            reason: "logging.filter must not be empty".to_string(),
        });
    }

    if let Some(storage_root) = &config.storage.root {
        if storage_root.is_relative() {
            config.storage.root = Some(root.join(storage_root));
        }
    }

    Ok(config)
}
