//! Optional TOML configuration for the `errands` binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings read from `config.toml`. Every field has a default, so an
/// empty or missing file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Snapshot file holding every errand.
    pub data_file: PathBuf,
    /// Priority for errands submitted without one.
    pub default_priority: i64,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("errands.json"),
            default_priority: errand_engine::DEFAULT_PRIORITY,
            log_filter: "errand_engine=info,errands=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Load `path` if given, else the default location if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Self::default_config_path();
                if default.is_file() {
                    Self::from_file(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// `$XDG_CONFIG_HOME/errands/config.toml`, or `~/.config/errands/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("errands").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("errands")
                .join("config.toml")
        } else {
            PathBuf::from("errands").join("config.toml")
        }
    }
}
