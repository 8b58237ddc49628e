//! Pull counters and tracing hooks.
//!
//! Counters are always kept; emitting them only happens with the `tracing`
//! feature so the default build stays dependency-light.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullStats {
    /// Values handed back by `pull_next`.
    pub yielded: u64,
    /// Source elements dropped by a streaming stage.
    pub filtered: u64,
    /// Bulk stages committed.
    pub materialized_stages: u64,
    /// Elements fed into bulk stages, summed over all materializations.
    pub materialized_elements: u64,
}

impl PullStats {
    pub fn key_values(&self) -> [(&'static str, String); 4] {
        [
            ("yielded", self.yielded.to_string()),
            ("filtered", self.filtered.to_string()),
            ("materialized_stages", self.materialized_stages.to_string()),
            ("materialized_elements", self.materialized_elements.to_string()),
        ]
    }
}

#[cfg(feature = "tracing")]
pub fn emit_span(event: &str, key_values: &[(&str, String)]) {
    let span = tracing::span!(tracing::Level::TRACE, "ginq", event);
    let _entered = span.enter();
    for (k, v) in key_values {
        tracing::trace!(%event, %k, %v, "metric");
    }
}

#[cfg(not(feature = "tracing"))]
pub fn emit_span(_event: &str, _key_values: &[(&str, String)]) { /* no-op */
}
