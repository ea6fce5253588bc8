//! # CLI Configuration
//!
//! Optional YAML file selecting the provider kind, a schema directory and
//! a store to bind:
//!
//! ```yaml
//! provider: static
//! schema_dir: ./schemas
//! store: warehouse
//! ```
//!
//! The file is taken from `--config`, else from the `CUBEMETA_CONFIG`
//! environment variable. Without either, defaults apply. A relative
//! `schema_dir` is resolved against the directory of the config file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "CUBEMETA_CONFIG";

fn default_provider() -> String {
    "static".to_string()
}

/// Settings read from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Provider kind looked up in the registry.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Directory holding the three schema files; bundled schemas otherwise.
    #[serde(default)]
    pub schema_dir: Option<PathBuf>,
    /// Name of a store to bind to the provider.
    #[serde(default)]
    pub store: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            schema_dir: None,
            store: None,
        }
    }
}

impl CliConfig {
    /// Load the config named by `explicit` or by `CUBEMETA_CONFIG`.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::load_from(explicit, from_env.as_deref())
    }

    /// Load from `explicit`, else `fallback`, else defaults.
    pub fn load_from(explicit: Option<&Path>, fallback: Option<&Path>) -> Result<Self> {
        match explicit.or(fallback) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config = Self::from_yaml_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        if let (Some(dir), Some(base)) = (&config.schema_dir, path.parent()) {
            if dir.is_relative() {
                config.schema_dir = Some(base.join(dir));
            }
        }
        tracing::debug!(config = %path.display(), provider = %config.provider, "loaded config");
        Ok(config)
    }

    /// Parse config YAML. An empty document yields the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}
