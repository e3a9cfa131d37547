//! Matching and search configuration.

use serde::{Deserialize, Serialize};

use crate::distance::{DistanceMethod, MatchParams};
use crate::error::SkeinError;
use crate::matching::MATCHES_PER_SOURCE;
use crate::search::{DEFAULT_FUZZY_THRESHOLD, DEFAULT_NODE_CAPACITY};

/// Sources per batch in a cross-match run.
pub const DEFAULT_BATCH_SIZE: usize = 50;
/// Smallest accepted batch size.
pub const MIN_BATCH_SIZE: usize = 50;
/// Largest accepted batch size.
pub const MAX_BATCH_SIZE: usize = 100;

/// Runtime configuration for matching and search.
///
/// `Default` honours these environment overrides:
/// `SKEIN_METHOD` (`rgb`, `lab`, `deltaE2000`), `SKEIN_SHIMMER` (`1`/`true`),
/// `SKEIN_BATCH_SIZE`, and `SKEIN_NO_OFFLOAD` (presence disables the worker).
/// Deserialization does not: fields missing from a document take their
/// [`builtin`](Self::builtin) values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default = "MatchConfig::builtin")]
pub struct MatchConfig {
    /// Distance metric.
    pub method: DistanceMethod,
    /// Apply the shimmer heuristic (LAB-based methods only).
    pub factor_in_shimmer: bool,
    /// Candidates returned by a nearest-neighbor query (`k`).
    pub limit: usize,
    /// Sources per cross-match batch.
    pub batch_size: usize,
    /// Colors cached per prefix-trie node.
    pub trie_node_capacity: usize,
    /// Fuzzy suggestions must score strictly above this.
    pub fuzzy_threshold: f64,
    /// Run cross-matching on the background worker when available.
    pub offload: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        let builtin = Self::builtin();
        Self {
            method: std::env::var("SKEIN_METHOD")
                .ok()
                .and_then(|s| match s.parse() {
                    Ok(m) => Some(m),
                    Err(e) => {
                        tracing::warn!("Ignoring SKEIN_METHOD: {e}");
                        None
                    }
                })
                .unwrap_or(builtin.method),
            factor_in_shimmer: std::env::var("SKEIN_SHIMMER")
                .map(|s| matches!(s.trim(), "1" | "true" | "yes"))
                .unwrap_or(builtin.factor_in_shimmer),
            batch_size: std::env::var("SKEIN_BATCH_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(builtin.batch_size),
            offload: std::env::var("SKEIN_NO_OFFLOAD").is_err(),
            ..builtin
        }
    }
}

impl MatchConfig {
    /// Built-in defaults, ignoring the environment.
    pub fn builtin() -> Self {
        Self {
            method: DistanceMethod::default(),
            factor_in_shimmer: false,
            limit: MATCHES_PER_SOURCE,
            batch_size: DEFAULT_BATCH_SIZE,
            trie_node_capacity: DEFAULT_NODE_CAPACITY,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            offload: true,
        }
    }

    /// Parse from JSON; missing fields take their built-in values whatever
    /// the environment says. The result is validated.
    pub fn from_json(json: &str) -> Result<Self, SkeinError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values outside their accepted ranges.
    pub fn validate(&self) -> Result<(), SkeinError> {
        if !(MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(&self.batch_size) {
            return Err(SkeinError::InvalidConfig(format!(
                "batch_size {} outside {MIN_BATCH_SIZE}..={MAX_BATCH_SIZE}",
                self.batch_size
            )));
        }
        if !(0.0..1.0).contains(&self.fuzzy_threshold) {
            return Err(SkeinError::InvalidConfig(format!(
                "fuzzy_threshold {} outside [0, 1)",
                self.fuzzy_threshold
            )));
        }
        if self.trie_node_capacity == 0 {
            return Err(SkeinError::InvalidConfig(
                "trie_node_capacity must be at least 1".to_string(),
            ));
        }
        if self.limit == 0 {
            return Err(SkeinError::InvalidConfig(
                "limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Clamp `batch_size` into the accepted range instead of rejecting it.
    pub fn clamped_batch_size(&self) -> usize {
        self.batch_size.clamp(MIN_BATCH_SIZE, MAX_BATCH_SIZE)
    }

    pub fn params(&self) -> MatchParams {
        MatchParams::new(self.method, self.factor_in_shimmer)
    }
}
