//! Engine configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on the number of elements a single bulk stage may receive.
    /// `None` means unbounded.
    pub materialize_limit: Option<usize>,

    /// Initial capacity of the output vector built by `enumerate_all`.
    pub collect_capacity_hint: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            materialize_limit: None,
            collect_capacity_hint: 16,
        }
    }
}

impl EngineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `GINQ_MATERIALIZE_LIMIT`: max elements handed to one bulk stage
    /// - `GINQ_COLLECT_CAPACITY_HINT`: initial capacity for eager collection
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(s) = lookup("GINQ_MATERIALIZE_LIMIT") {
            if let Ok(v) = s.trim().parse::<usize>() {
                cfg.materialize_limit = Some(v);
            }
        }

        if let Some(s) = lookup("GINQ_COLLECT_CAPACITY_HINT") {
            if let Ok(v) = s.trim().parse::<usize>() {
                cfg.collect_capacity_hint = v;
            }
        }

        cfg
    }

    pub fn with_materialize_limit(mut self, limit: usize) -> Self {
        self.materialize_limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_lookup_overrides_defaults() {
        let cfg = EngineConfig::from_lookup(lookup_from(&[
            ("GINQ_MATERIALIZE_LIMIT", "100"),
            ("GINQ_COLLECT_CAPACITY_HINT", " 64 "),
        ]));
        assert_eq!(cfg.materialize_limit, Some(100));
        assert_eq!(cfg.collect_capacity_hint, 64);
    }

    #[test]
    fn test_garbled_values_fall_back() {
        let cfg = EngineConfig::from_lookup(lookup_from(&[("GINQ_MATERIALIZE_LIMIT", "lots")]));
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn test_from_json_partial() {
        let cfg = EngineConfig::from_json(r#"{"materialize_limit": 3}"#).unwrap();
        assert_eq!(cfg.materialize_limit, Some(3));
        assert_eq!(cfg.collect_capacity_hint, 16);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = EngineConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(_)));
    }
}
