//! Configuration models

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::selection::RuleConfig;

/// Main configuration structure for Interpose
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where timing interceptors send their records
    #[serde(default)]
    pub timing_sink: TimingSinkKind,

    /// Ordered (rule, interceptors) bindings; the first matching rule wins
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Rotation for file output: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// Destination for timing records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingSinkKind {
    /// Structured `tracing` events
    #[default]
    Tracing,
    /// One text line per record on stdout
    Stdout,
    /// One text line per record on stderr
    Stderr,
}

/// Interceptor kinds that can be named in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterceptorKind {
    /// Elapsed-time measurement
    Timing,
    /// Result caching keyed by arguments
    Memoize,
}

/// One binding: a selection rule and the interceptors it applies, outermost first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BindingConfig {
    /// Which calls the binding selects
    pub rule: RuleConfig,

    /// Interceptors in declaration order
    #[serde(default)]
    pub interceptors: Vec<InterceptorKind>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::selection::VisibilityRequirement;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.timing_sink, TimingSinkKind::Tracing);
        assert!(config.bindings.is_empty());
    }

    #[test]
    fn test_yaml_bindings() {
        let yaml = r#"
timing_sink: stdout
bindings:
  - rule:
      visibility: public
      namespacePrefix: chap07
      namePattern: "*"
    interceptors: [timing, memoize]
  - rule:
      visibility: any
    interceptors: [timing]
"#;
        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.timing_sink, TimingSinkKind::Stdout);
        assert_eq!(config.bindings.len(), 2);
        assert_eq!(config.bindings[0].rule.namespace_prefix, "chap07");
        assert_eq!(
            config.bindings[0].interceptors,
            vec![InterceptorKind::Timing, InterceptorKind::Memoize]
        );
        assert_eq!(config.bindings[1].rule.visibility, VisibilityRequirement::Any);
        assert_eq!(config.bindings[1].rule.name_pattern, "*");
    }
}
