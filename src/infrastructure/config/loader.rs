//! Hierarchical configuration loading and validation

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::{Config, InterceptorKind};
use crate::domain::models::SelectionRule;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Log level is not a `tracing` level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Log format is neither json nor pretty
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// Unknown rotation policy
    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    /// A binding lists no interceptors
    #[error("Binding {0} has no interceptors")]
    EmptyBinding(usize),

    /// A binding lists memoize twice
    #[error("Binding {0} declares memoize more than once")]
    DuplicateMemoize(usize),

    /// A binding's rule does not compile
    #[error("Binding {index} has an invalid rule: {reason}")]
    InvalidRule {
        /// Position of the binding
        index: usize,
        /// Rule compilation error
        reason: String,
    },
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .interpose/config.yaml (project config)
    /// 3. .interpose/local.yaml (project local overrides, optional)
    /// 4. Environment variables (INTERPOSE_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment()
            .merge(Yaml::file(".interpose/config.yaml"))
            .merge(Yaml::file(".interpose/local.yaml"))
            .merge(Env::prefixed("INTERPOSE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Self::figment()
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment() -> Figment {
        Figment::new().merge(Serialized::defaults(Config::default()))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        // Validate bindings
        for (index, binding) in config.bindings.iter().enumerate() {
            if binding.interceptors.is_empty() {
                return Err(ConfigError::EmptyBinding(index));
            }

            let memoizers = binding
                .interceptors
                .iter()
                .filter(|kind| **kind == InterceptorKind::Memoize)
                .count();
            if memoizers > 1 {
                return Err(ConfigError::DuplicateMemoize(index));
            }

            SelectionRule::from_config(&binding.rule).map_err(|e| ConfigError::InvalidRule {
                index,
                reason: e.to_string(),
            })?;
        }

        Ok(())
    }
}
