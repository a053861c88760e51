// Rust guideline compliant 2026-02-06

//! Configuration management for hookbatch.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up inside the configuration directory.
pub const CONFIG_FILE: &str = "hookbatch.toml";

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Configuration for batch runs and the host driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum items consumed by a single `run` call.
    #[serde(default = "default_per_run_limit")]
    pub per_run_limit: usize,

    /// Maximum host invocations before the driver gives up.
    #[serde(default = "default_max_invocations")]
    pub max_invocations: u32,

    /// Log level used by the CLI subscriber.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Default slice size.
fn default_per_run_limit() -> usize {
    100
}

/// Default invocation ceiling.
fn default_max_invocations() -> u32 {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            per_run_limit: default_per_run_limit(),
            max_invocations: default_max_invocations(),
            log_level: default_log_level(),
        }
    }
}

impl BatchConfig {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `<dir>/hookbatch.toml`
    /// 3. Environment variables with `HOOKBATCH_` prefix
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory holding `hookbatch.toml`
    ///
    /// # Returns
    ///
    /// A validated `BatchConfig`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file exists but cannot be read
    /// - The configuration file contains invalid TOML
    /// - An environment override cannot be parsed
    /// - A value fails validation
    pub fn load(dir: &Path) -> Result<Self> {
        Self::load_with(dir, |key| std::env::var(key).ok())
    }

    /// Loads configuration using `lookup` in place of the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`BatchConfig::load`].
    pub fn load_with<F>(dir: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            config = toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Invalid config file: {}", e)))?;
        }

        config.apply_overrides(lookup)?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment overrides.
    ///
    /// Supported variables:
    /// - `HOOKBATCH_PER_RUN_LIMIT` - Items per `run` call (> 0)
    /// - `HOOKBATCH_MAX_INVOCATIONS` - Driver invocation ceiling (> 0)
    /// - `HOOKBATCH_LOG_LEVEL` - error, warn, info, debug, or trace
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("HOOKBATCH_PER_RUN_LIMIT") {
            self.per_run_limit = val.trim().parse().map_err(|_| {
                Error::Config("HOOKBATCH_PER_RUN_LIMIT must be a positive number".to_string())
            })?;
        }

        if let Some(val) = lookup("HOOKBATCH_MAX_INVOCATIONS") {
            self.max_invocations = val.trim().parse().map_err(|_| {
                Error::Config("HOOKBATCH_MAX_INVOCATIONS must be a positive number".to_string())
            })?;
        }

        if let Some(val) = lookup("HOOKBATCH_LOG_LEVEL") {
            self.log_level = val.trim().to_lowercase();
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `per_run_limit` is zero
    /// - `max_invocations` is zero
    /// - `log_level` is not a known level
    fn validate(&self) -> Result<()> {
        if self.per_run_limit == 0 {
            return Err(Error::Config(
                "per_run_limit must be greater than 0".to_string(),
            ));
        }

        if self.max_invocations == 0 {
            return Err(Error::Config(
                "max_invocations must be greater than 0".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(Error::Config(format!(
                "log_level must be one of {}, got {}",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }

        Ok(())
    }

    /// Saves the configuration to `<dir>/hookbatch.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(dir.join(CONFIG_FILE), content)?;
        Ok(())
    }
}
