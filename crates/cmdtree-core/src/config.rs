//! Dispatcher configuration
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. User config: `<config dir>/cmdtree/config.toml`
//! 3. Explicit config file supplied by the embedder
//! 4. Environment variables: `CMDTREE_*`
//!
//! # Example Config
//!
//! ```toml
//! help_prefix = "usage: devctl <command> [args...]\n\n"
//! separator_width = 72
//! indent_step = 4
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_HELP_PREFIX: &str = "CMDTREE_HELP_PREFIX";
pub const ENV_SEPARATOR_WIDTH: &str = "CMDTREE_SEPARATOR_WIDTH";
pub const ENV_INDENT_STEP: &str = "CMDTREE_INDENT_STEP";

const MAX_INDENT_STEP: usize = 16;
const MAX_SEPARATOR_WIDTH: usize = 400;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatcherConfig {
    /// Prepended verbatim to every help listing and failure report
    pub help_prefix: String,
    /// Width of the dashed line between a failure and the help listing
    pub separator_width: usize,
    /// Spaces added per level of the help listing
    pub indent_step: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            help_prefix: String::new(),
            separator_width: 80,
            indent_step: 2,
        }
    }
}

/// One layer of overrides; absent fields keep the value below them
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigLayer {
    help_prefix: Option<String>,
    separator_width: Option<usize>,
    indent_step: Option<usize>,
}

impl DispatcherConfig {
    /// Load the full hierarchy, using the platform user config location
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let user = Self::user_config_path();
        Self::load_layers(user.as_deref(), explicit)
    }

    /// Load the hierarchy with an explicit user config location.
    ///
    /// A missing user config is skipped; a missing explicit file is an error.
    pub fn load_layers(user: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = user.filter(|p| p.is_file()) {
            tracing::debug!(path = %path.display(), "loading user config");
            config.merge(read_layer(path)?);
        }

        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config file");
            config.merge(read_layer(path)?);
        }

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.merge(parse_layer(content, "<inline>")?);
        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/cmdtree/config.toml`, if the platform has a home directory
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "cmdtree").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indent_step == 0 || self.indent_step > MAX_INDENT_STEP {
            return Err(ConfigError::Invalid(format!(
                "indent_step must be between 1 and {MAX_INDENT_STEP}, got {}",
                self.indent_step
            )));
        }
        if self.separator_width == 0 || self.separator_width > MAX_SEPARATOR_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "separator_width must be between 1 and {MAX_SEPARATOR_WIDTH}, got {}",
                self.separator_width
            )));
        }
        Ok(())
    }

    fn merge(&mut self, layer: ConfigLayer) {
        if let Some(prefix) = layer.help_prefix {
            self.help_prefix = prefix;
        }
        if let Some(width) = layer.separator_width {
            self.separator_width = width;
        }
        if let Some(step) = layer.indent_step {
            self.indent_step = step;
        }
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        let layer = ConfigLayer {
            help_prefix: std::env::var(ENV_HELP_PREFIX).ok(),
            separator_width: env_usize(ENV_SEPARATOR_WIDTH)?,
            indent_step: env_usize(ENV_INDENT_STEP)?,
        };
        self.merge(layer);
        Ok(())
    }
}

fn env_usize(key: &str) -> Result<Option<usize>, ConfigError> {
    std::env::var(key)
        .ok()
        .map(|raw| {
            raw.trim().parse::<usize>().map_err(|_| {
                ConfigError::Invalid(format!("{key} must be a non-negative integer, got '{raw}'"))
            })
        })
        .transpose()
}

fn read_layer(path: &Path) -> Result<ConfigLayer, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_layer(&content, &path.display().to_string())
}

fn parse_layer(content: &str, origin: &str) -> Result<ConfigLayer, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
        origin: origin.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatcherConfig::default();
        assert_eq!(config.help_prefix, "");
        assert_eq!(config.separator_width, 80);
        assert_eq!(config.indent_step, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() -> Result<(), ConfigError> {
        let config = DispatcherConfig::from_toml_str("indent_step = 4")?;
        assert_eq!(config.indent_step, 4);
        assert_eq!(config.separator_width, 80);
        Ok(())
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = DispatcherConfig::from_toml_str("indent = 4");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            DispatcherConfig::from_toml_str("indent_step = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DispatcherConfig::from_toml_str("separator_width = 10000"),
            Err(ConfigError::Invalid(_))
        ));
    }
}
