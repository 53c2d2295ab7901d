//! Configuration management for the voxbridge engine.
//!
//! Handles loading, saving, and providing defaults for engine configuration.
//! Because the engine is loaded into a host process rather than running as
//! its own daemon, there is no fixed config directory; hosts either pass a
//! path explicitly or point the `VOXB_CONFIG` environment variable at a
//! TOML file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a TOML config file to load.
const CONFIG_ENV_VAR: &str = "VOXB_CONFIG";

/// Main configuration struct for the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub inference: InferenceConfig,
    pub logging: LoggingConfig,
}

/// Settings applied to every transcription call.
///
/// Defaults are greedy decoding, English, four worker threads, and no
/// progress printing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Decoding strategy.
    pub sampling: SamplingMode,
    /// Language to recognize. Use "auto" for automatic detection.
    pub language: String,
    /// Number of native worker threads per inference call.
    pub threads: i32,
    /// Print decode progress to stdout.
    pub print_progress: bool,
}

/// Decoding strategy for the speech engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SamplingMode {
    #[default]
    Greedy,
    BeamSearch,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: LogLevel,
}

/// Log verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to a tracing filter directive string for the engine crate.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "voxbridge_engine=error",
            LogLevel::Warn => "voxbridge_engine=warn",
            LogLevel::Info => "voxbridge_engine=info",
            LogLevel::Debug => "voxbridge_engine=debug",
            LogLevel::Trace => "voxbridge_engine=trace",
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingMode::Greedy,
            language: "en".to_string(),
            threads: 4,
            print_progress: false,
        }
    }
}

impl Config {
    /// Load configuration from the file named by `VOXB_CONFIG`.
    /// Returns defaults if the variable is unset.
    pub fn load_from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_from(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file as TOML")
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
