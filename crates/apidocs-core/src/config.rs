//! Validation and comparison configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Configuration for comparing two metadata graphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparerConfig {
    /// Namespace aliases, e.g. `oneDrive -> microsoft.graph`.
    ///
    /// Each entry is one-directional: `a -> b` does not register `b -> a`.
    #[serde(default)]
    pub namespace_aliases: HashMap<String, String>,
    /// Diff the members of matched schemas. Off by default: matched
    /// schemas are then only checked for presence.
    #[serde(default)]
    pub compare_members: bool,
}

impl ComparerConfig {
    /// Create a configuration without aliases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `from` as an alias of `to`.
    pub fn with_alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.namespace_aliases.insert(from.into(), to.into());
        self
    }

    /// Enable member-level comparison of matched schemas.
    pub fn with_member_comparison(mut self) -> Self {
        self.compare_members = true;
        self
    }

    /// Whether two namespaces refer to the same schema.
    ///
    /// True when the names are equal or when either one is registered as
    /// an alias of the other.
    pub fn equivalent_namespaces(&self, ns1: &str, ns2: &str) -> bool {
        if ns1 == ns2 {
            return true;
        }

        self.is_alias_of(ns1, ns2) || self.is_alias_of(ns2, ns1)
    }

    /// Whether the table holds the single entry `from -> to`.
    pub fn is_alias_of(&self, from: &str, to: &str) -> bool {
        self.namespace_aliases
            .get(from)
            .is_some_and(|target| target == to)
    }
}

/// Global validation switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Properties shown in a documented example are required to appear in
    /// the payload being checked.
    #[serde(default = "default_true")]
    pub expected_response_as_required_properties: bool,
}

fn default_true() -> bool {
    true
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self {
            expected_response_as_required_properties: true,
        }
    }

    pub fn with_expected_response_as_required_properties(mut self, required: bool) -> Self {
        self.expected_response_as_required_properties = required;
        self
    }

    /// Load a configuration from JSON text. Missing keys take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Per-call options derived from this configuration.
    pub fn options(&self) -> ValidationOptions {
        ValidationOptions {
            ignore_missing_properties: !self.expected_response_as_required_properties,
            ..ValidationOptions::default()
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Options handed to an example checker for one validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Accept examples that were cut short in the documentation.
    #[serde(default)]
    pub allow_truncated_responses: bool,
    /// Do not report documented properties missing from the example.
    #[serde(default)]
    pub ignore_missing_properties: bool,
    /// When non-empty, only these properties are reported as missing.
    #[serde(default)]
    pub required_properties: Vec<String>,
}

impl ValidationOptions {
    pub fn with_required_property(mut self, name: impl Into<String>) -> Self {
        self.required_properties.push(name.into());
        self
    }

    pub fn allowing_truncated_responses(mut self) -> Self {
        self.allow_truncated_responses = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_equivalence_is_reflexive() {
        let config = ComparerConfig::new();
        assert!(config.equivalent_namespaces("graph", "graph"));
        assert!(!config.equivalent_namespaces("graph", "oneDrive"));
    }

    #[test]
    fn test_alias_matches_both_argument_orders() {
        let config = ComparerConfig::new().with_alias("oneDrive", "microsoft.graph");

        assert!(config.equivalent_namespaces("oneDrive", "microsoft.graph"));
        assert!(config.equivalent_namespaces("microsoft.graph", "oneDrive"));
    }

    #[test]
    fn test_alias_table_is_not_transitive() {
        let config = ComparerConfig::new()
            .with_alias("a", "b")
            .with_alias("b", "c");

        assert!(config.equivalent_namespaces("a", "b"));
        assert!(config.equivalent_namespaces("b", "c"));
        assert!(!config.equivalent_namespaces("a", "c"));
    }

    #[test]
    fn test_alias_entry_is_one_directional() {
        let config = ComparerConfig::new().with_alias("oneDrive", "microsoft.graph");

        assert!(config.is_alias_of("oneDrive", "microsoft.graph"));
        // Only one entry was inserted; the reverse entry does not exist.
        assert!(!config.is_alias_of("microsoft.graph", "oneDrive"));
        assert!(!config.namespace_aliases.contains_key("microsoft.graph"));

        let both = config.with_alias("microsoft.graph", "oneDrive");
        assert!(both.is_alias_of("microsoft.graph", "oneDrive"));
    }

    #[test]
    fn test_validation_config_defaults() {
        let config = ValidationConfig::default();
        assert!(config.expected_response_as_required_properties);
        assert!(!config.options().ignore_missing_properties);
    }

    #[test]
    fn test_validation_config_from_json() {
        let config = ValidationConfig::from_json_str(
            r#"{"expected_response_as_required_properties": false}"#,
        )
        .unwrap();

        assert!(!config.expected_response_as_required_properties);
        assert!(config.options().ignore_missing_properties);
    }

    #[test]
    fn test_validation_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("validation.json");
        std::fs::write(&path, "{}").unwrap();

        let config = ValidationConfig::from_json_file(&path).unwrap();
        assert_eq!(config, ValidationConfig::new());
        assert!(config.expected_response_as_required_properties);
    }

    #[test]
    fn test_comparer_config_from_json() {
        let config: ComparerConfig = serde_json::from_str(
            r#"{"namespace_aliases": {"oneDrive": "microsoft.graph"}}"#,
        )
        .unwrap();
        assert!(config.equivalent_namespaces("oneDrive", "microsoft.graph"));
    }
}
