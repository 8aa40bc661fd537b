//! CLI configuration: data directory resolution and the optional
//! `config.toml` overrides.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use pantry_core::storage::{StorageConfig, DEFAULT_FALLBACK_QUOTA_BYTES};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PantryConfig {
    #[serde(default)]
    pub storage: StorageSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StorageSection {
    /// Override for the data directory.
    pub data_dir: Option<String>,

    /// Byte quota for the fallback store document.
    pub fallback_max_bytes: Option<u64>,
}

impl PantryConfig {
    /// Load `config.toml` from the platform config directory, if present.
    pub fn load() -> anyhow::Result<Self> {
        let Some(dirs) = ProjectDirs::from("dev", "pantry", "pantry") else {
            return Ok(Self::default());
        };
        let path = dirs.config_dir().join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        let config = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("invalid config file {}: {}", path.display(), e))?;
        Ok(config)
    }
}

/// Platform-appropriate default data directory.
fn default_data_dir() -> anyhow::Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "pantry", "pantry")
        .ok_or_else(|| anyhow::anyhow!("could not determine a data directory for this platform"))?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Resolve the storage configuration from CLI flag, config file, and
/// platform default, in that order of precedence.
pub fn resolve_storage(cli_data_dir: Option<&str>) -> anyhow::Result<StorageConfig> {
    let config = PantryConfig::load()?;

    let data_dir = match cli_data_dir {
        Some(dir) => PathBuf::from(dir),
        None => match config.storage.data_dir {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        },
    };

    let quota = config
        .storage
        .fallback_max_bytes
        .unwrap_or(DEFAULT_FALLBACK_QUOTA_BYTES);

    Ok(StorageConfig::new(data_dir).with_fallback_quota(quota))
}
