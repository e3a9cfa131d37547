//! Cross-catalog matching: every source color ranked against a whole target
//! catalog.
//!
//! This is the dominant cost center, O(|source| × |target|). Each source is
//! ranked independently, so any partition of the sources into batches
//! produces the same per-source rankings as a single pass.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::MATCHES_PER_SOURCE;
use super::engine::{MatchResult, find_closest, sort_by_distance};
use crate::color::catalog::Color;
use crate::color::convert::Rgb;
use crate::config::DEFAULT_BATCH_SIZE;
use crate::distance::MatchParams;

/// A pre-associated pairing supplied from outside (e.g. a published
/// conversion chart), with the distance recorded alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedPairing {
    pub source_code: String,
    pub target_code: String,
    pub target_rgb: Rgb,
    pub distance: f64,
}

/// Curated pairings grouped by source code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CuratedPairings {
    by_source: HashMap<String, Vec<MatchResult>>,
}

impl CuratedPairings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairings recorded for `source_code`, ascending by distance.
    pub fn for_source(&self, source_code: &str) -> &[MatchResult] {
        self.by_source
            .get(source_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }

    /// Number of sources that carry at least one pairing.
    pub fn len(&self) -> usize {
        self.by_source.len()
    }
}

impl FromIterator<CuratedPairing> for CuratedPairings {
    fn from_iter<I: IntoIterator<Item = CuratedPairing>>(iter: I) -> Self {
        let mut by_source: HashMap<String, Vec<MatchResult>> = HashMap::new();
        for p in iter {
            by_source.entry(p.source_code).or_default().push(MatchResult {
                target_code: p.target_code,
                target_rgb: p.target_rgb,
                distance: p.distance,
            });
        }
        for list in by_source.values_mut() {
            sort_by_distance(list);
        }
        Self { by_source }
    }
}

/// Ranked candidates for one source color: best match first, then up to
/// three alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMatches {
    pub source_code: String,
    pub matches: Vec<MatchResult>,
}

impl SourceMatches {
    pub fn best(&self) -> Option<&MatchResult> {
        self.matches.first()
    }

    pub fn alternatives(&self) -> &[MatchResult] {
        self.matches.get(1..).unwrap_or(&[])
    }
}

/// Rank one source against `targets`, merging in its curated pairings.
///
/// Curated targets are excluded from the computed candidates so a target never
/// appears twice; the union is re-sorted by distance and cut to
/// [`MATCHES_PER_SOURCE`].
pub fn rank_source(
    source: &Color,
    targets: &[Color],
    params: MatchParams,
    curated: &CuratedPairings,
) -> SourceMatches {
    let pinned = curated.for_source(source.code());

    let matches = if pinned.is_empty() {
        find_closest(source, targets, MATCHES_PER_SOURCE, params, None)
    } else {
        let exclude: HashSet<String> = pinned.iter().map(|m| m.target_code.clone()).collect();
        let mut merged = pinned.to_vec();
        merged.extend(find_closest(
            source,
            targets,
            MATCHES_PER_SOURCE,
            params,
            Some(&exclude),
        ));
        sort_by_distance(&mut merged);
        merged.truncate(MATCHES_PER_SOURCE);
        merged
    };

    SourceMatches {
        source_code: source.code().to_string(),
        matches,
    }
}

/// Rank one batch of sources. This is the unit of work both the inline and
/// the offloaded executors run.
pub fn match_batch(
    sources: &[Color],
    targets: &[Color],
    params: MatchParams,
    curated: &CuratedPairings,
) -> Vec<SourceMatches> {
    sources
        .iter()
        .map(|s| rank_source(s, targets, params, curated))
        .collect()
}

/// Split `sources` into fixed-size batches. A size of 0 is treated as 1.
pub fn batches(sources: &[Color], batch_size: usize) -> std::slice::Chunks<'_, Color> {
    sources.chunks(batch_size.max(1))
}

/// Rank every source against the target catalog, synchronously.
pub fn cross_match(
    sources: &[Color],
    targets: &[Color],
    params: MatchParams,
    curated: &CuratedPairings,
) -> Vec<SourceMatches> {
    tracing::debug!(
        "cross-matching {} sources against {} targets ({}, shimmer={})",
        sources.len(),
        targets.len(),
        params.method,
        params.shimmer_enabled
    );
    batches(sources, DEFAULT_BATCH_SIZE)
        .flat_map(|batch| match_batch(batch, targets, params, curated))
        .collect()
}
