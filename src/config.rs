//! Mapping configuration

use serde::{Deserialize, Serialize};

/// Knobs shared by the graph builder and the graph reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Stem for prefixes synthesized for unknown namespaces (`j.0`, `j.1`, ...)
    pub generated_prefix: String,

    /// Fail with `UnsupportedValue` on an unmapped predicate when the target
    /// type has no extended-property bag, instead of dropping it
    pub strict_unmapped: bool,

    /// Emit the reification quad even when the wrapper carries no metadata
    pub reify_without_metadata: bool,

    /// Type `oslc:totalCount` as `xsd:integer` instead of a plain literal
    pub total_count_datatype: bool,
}

impl MappingConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different stem for generated prefixes
    pub fn with_generated_prefix(mut self, stem: impl Into<String>) -> Self {
        self.generated_prefix = stem.into();
        self
    }

    /// Toggle strict handling of unmapped predicates
    pub fn with_strict_unmapped(mut self, strict: bool) -> Self {
        self.strict_unmapped = strict;
        self
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            generated_prefix: "j.".to_string(),
            strict_unmapped: false,
            reify_without_metadata: true,
            total_count_datatype: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MappingConfig::default();
        assert_eq!(config.generated_prefix, "j.");
        assert!(!config.strict_unmapped);
        assert!(config.reify_without_metadata);
        assert!(!config.total_count_datatype);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MappingConfig = serde_json::from_str(r#"{"strict_unmapped": true}"#).unwrap();
        assert!(config.strict_unmapped);
        assert_eq!(config.generated_prefix, "j.");

        let json = serde_json::to_string(&config).unwrap();
        let back: MappingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
