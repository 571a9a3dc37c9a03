// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Engine configuration loaded from environment variables.

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Node capacity of the STR trees built by graph noding and the
    /// simplifier. Must be greater than 1.
    pub node_capacity: usize,
    /// Whether common-bits operations translate their results back to the
    /// original coordinate space.
    pub return_to_original_precision: bool,
    /// Default distance tolerance for topology-preserving simplification.
    pub simplify_tolerance: f64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            node_capacity: std::env::var("GEOTOPO_NODE_CAPACITY")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(geotopo_index::DEFAULT_NODE_CAPACITY),
            return_to_original_precision: std::env::var("GEOTOPO_RETURN_TO_ORIGINAL_PRECISION")
                .map(|v| !matches!(v.trim(), "0" | "false" | "no"))
                .unwrap_or(true),
            simplify_tolerance: std::env::var("GEOTOPO_SIMPLIFY_TOLERANCE")
                .unwrap_or_else(|_| "0".into())
                .parse()
                .unwrap_or(0.0),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        let config = Config::default();
        assert!(config.node_capacity > 1);
        assert!(config.simplify_tolerance >= 0.0);
    }
}
