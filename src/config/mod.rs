//! Configuration management for ccfilter
//!
//! Holds the per-category display flags and the repetition suppression
//! parameters. Loaded from TOML, overridable through `CCFILTER_*` env vars.

use crate::error::{CcFilterError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Supported configuration schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta", default)]
    pub meta: MetaConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub suppression: SuppressionConfig,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            created_at: current_timestamp(),
            last_modified: current_timestamp(),
        }
    }
}

/// Which line categories are enabled for display coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_full_response: bool,
    pub show_serial_request: bool,
    pub show_serial_response: bool,
    pub show_cctalk_request: bool,
    pub show_cctalk_response: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_full_response: false,
            show_serial_request: false,
            show_serial_response: false,
            show_cctalk_request: true,
            show_cctalk_response: true,
        }
    }
}

/// Repetition suppression parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuppressionConfig {
    /// Repetition count above which lines stop being shown verbatim
    pub threshold: u32,
    /// A summary is emitted whenever the count reaches a multiple of this
    pub step: u32,
    /// Cycle lengths to detect, checked in this order
    pub window_sizes: Vec<usize>,
}

impl Default for SuppressionConfig {
    fn default() -> Self {
        Self {
            threshold: 3,
            step: 40,
            window_sizes: vec![1, 2, 3],
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CcFilterError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CcFilterError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        Self::from_toml_str(&content)?.finalize(std::env::vars())
    }

    /// Load configuration from a file, falling back to defaults when it does not exist
    ///
    /// Both paths apply env overrides and validate the result.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        tracing::debug!(
            "Config file {:?} not found, using defaults. Run 'ccfilter config init' to create one.",
            path
        );
        Self::default().finalize(std::env::vars())
    }

    /// Apply `CCFILTER_*` overrides from `vars`, then validate
    pub fn finalize(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Result<Self> {
        self.apply_overrides(vars);
        ConfigValidator::validate(&self)?;
        Ok(self)
    }

    /// Parse configuration from TOML text without env overrides or validation
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| CcFilterError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Apply `CCFILTER_SECTION__KEY=value` overrides from an arbitrary set of key/value pairs
    pub fn apply_overrides(&mut self, vars: impl IntoIterator<Item = (String, String)>) {
        for (key, value) in vars {
            if let Some(config_key) = key.strip_prefix("CCFILTER_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "DISPLAY__SHOW_FULL_RESPONSE" => {
                self.display.show_full_response = parse_env(path, value)?;
            }
            "DISPLAY__SHOW_SERIAL_REQUEST" => {
                self.display.show_serial_request = parse_env(path, value)?;
            }
            "DISPLAY__SHOW_SERIAL_RESPONSE" => {
                self.display.show_serial_response = parse_env(path, value)?;
            }
            "DISPLAY__SHOW_CCTALK_REQUEST" => {
                self.display.show_cctalk_request = parse_env(path, value)?;
            }
            "DISPLAY__SHOW_CCTALK_RESPONSE" => {
                self.display.show_cctalk_response = parse_env(path, value)?;
            }
            "SUPPRESSION__THRESHOLD" => {
                self.suppression.threshold = parse_env(path, value)?;
            }
            "SUPPRESSION__STEP" => {
                self.suppression.step = parse_env(path, value)?;
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            CcFilterError::Config("Cannot determine config directory".to_string())
        })?;

        Ok(config_dir.join("ccfilter").join("config.toml"))
    }
}

fn parse_env<T: std::str::FromStr>(path: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CcFilterError::InvalidConfigValue {
            path: path.to_string(),
            message: format!(
                "Cannot parse '{}' as {}",
                value,
                std::any::type_name::<T>()
            ),
        })
}
