//! Declarative selection rules
//!
//! A rule is a small closed grammar over an invocation: a visibility
//! requirement, a namespace prefix, and a glob over the method name.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::RuleError;

/// Which method visibilities a rule accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityRequirement {
    /// Only public methods
    #[default]
    Public,
    /// Any visibility
    Any,
}

/// Raw selection rule as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    /// Visibility requirement (`public` or `any`)
    #[serde(default)]
    pub visibility: VisibilityRequirement,

    /// Namespace prefix; empty matches every namespace
    #[serde(default)]
    pub namespace_prefix: String,

    /// Method name glob; `*` matches any run of characters
    #[serde(default = "default_name_pattern")]
    pub name_pattern: String,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            visibility: VisibilityRequirement::default(),
            namespace_prefix: String::new(),
            name_pattern: default_name_pattern(),
        }
    }
}

fn default_name_pattern() -> String {
    "*".to_string()
}

/// A compiled selection rule
///
/// The name glob is compiled once, at construction, so evaluating the rule
/// on every call stays cheap.
#[derive(Debug, Clone)]
pub struct SelectionRule {
    visibility: VisibilityRequirement,
    namespace_prefix: String,
    name_pattern: String,
    name_regex: Regex,
}

impl SelectionRule {
    /// Compile a rule
    pub fn new(
        visibility: VisibilityRequirement,
        namespace_prefix: impl Into<String>,
        name_pattern: impl Into<String>,
    ) -> Result<Self, RuleError> {
        let namespace_prefix = namespace_prefix.into();
        let name_pattern = name_pattern.into();

        validate_namespace_prefix(&namespace_prefix)?;
        let name_regex = compile_glob(&name_pattern)?;

        Ok(Self {
            visibility,
            namespace_prefix,
            name_pattern,
            name_regex,
        })
    }

    /// Rule accepting public methods in `namespace_prefix` whose name matches `name_pattern`
    pub fn public(
        namespace_prefix: impl Into<String>,
        name_pattern: impl Into<String>,
    ) -> Result<Self, RuleError> {
        Self::new(VisibilityRequirement::Public, namespace_prefix, name_pattern)
    }

    /// Compile from configuration
    pub fn from_config(config: &RuleConfig) -> Result<Self, RuleError> {
        Self::new(
            config.visibility,
            config.namespace_prefix.clone(),
            config.name_pattern.clone(),
        )
    }

    /// Visibility requirement
    pub const fn visibility(&self) -> VisibilityRequirement {
        self.visibility
    }

    /// Namespace prefix
    pub fn namespace_prefix(&self) -> &str {
        &self.namespace_prefix
    }

    /// Method name glob as written
    pub fn name_pattern(&self) -> &str {
        &self.name_pattern
    }

    pub(crate) fn name_matches(&self, name: &str) -> bool {
        self.name_regex.is_match(name)
    }

    /// Back to the configuration form
    pub fn to_config(&self) -> RuleConfig {
        RuleConfig {
            visibility: self.visibility,
            namespace_prefix: self.namespace_prefix.clone(),
            name_pattern: self.name_pattern.clone(),
        }
    }
}

impl PartialEq for SelectionRule {
    fn eq(&self, other: &Self) -> bool {
        self.visibility == other.visibility
            && self.namespace_prefix == other.namespace_prefix
            && self.name_pattern == other.name_pattern
    }
}

impl Eq for SelectionRule {}

impl TryFrom<RuleConfig> for SelectionRule {
    type Error = RuleError;

    fn try_from(config: RuleConfig) -> Result<Self, Self::Error> {
        Self::new(config.visibility, config.namespace_prefix, config.name_pattern)
    }
}

fn validate_namespace_prefix(prefix: &str) -> Result<(), RuleError> {
    if prefix.is_empty() {
        return Ok(());
    }
    let malformed = prefix
        .split('.')
        .any(|segment| segment.is_empty() || segment.chars().any(char::is_whitespace));
    if malformed {
        return Err(RuleError::InvalidNamespacePrefix(prefix.to_string()));
    }
    Ok(())
}

/// Translate a `*` glob into an anchored regex; every other character is literal.
/// `*` spans any characters, newlines included.
fn compile_glob(pattern: &str) -> Result<Regex, RuleError> {
    if pattern.is_empty() {
        return Err(RuleError::InvalidNamePattern {
            pattern: String::new(),
            reason: "pattern is empty".to_string(),
        });
    }

    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    Regex::new(&format!("(?s)^{body}$")).map_err(|e| RuleError::InvalidNamePattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}
