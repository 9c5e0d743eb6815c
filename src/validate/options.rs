//! Validation knobs.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Validate node and edge sets on the rayon pool.
    pub parallel: bool,
    /// Warn about rank-1 shapes of size 1 that should be scalars.
    pub lint_scalar_shape: bool,
    /// Warn about node sets a sampler cannot reach from the root set.
    pub lint_unreachable: bool,
    /// Warn when a subgraph's seed is not the first node of its node set.
    pub lint_root_first: bool,
    /// Treat features missing from the schema as errors in subgraph records.
    pub strict_features: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions {
            parallel: true,
            lint_scalar_shape: true,
            lint_unreachable: true,
            lint_root_first: false,
            strict_features: false,
        }
    }
}

impl ValidationOptions {
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let options = ValidationOptions::from_json(r#"{"lint_root_first": true}"#).unwrap();
        assert!(options.lint_root_first);
        assert!(options.parallel);
        assert!(!options.strict_features);
    }
}
