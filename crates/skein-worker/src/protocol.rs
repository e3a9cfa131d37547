//! Messages exchanged with the match worker.

use std::sync::Arc;

use skein_core::matching::cross::match_batch;
use skein_core::{Color, CuratedPairings, MatchParams, SourceMatches};

/// One batch of sources to rank against the full target catalog.
///
/// The target catalog and curated pairings are shared across every batch of a
/// run, so only the batch itself is copied per request.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub generation: u64,
    pub batch_index: usize,
    pub sources: Vec<Color>,
    pub targets: Arc<[Color]>,
    pub params: MatchParams,
    pub curated: Arc<CuratedPairings>,
}

impl BatchRequest {
    /// Rank the batch on the current thread.
    pub fn run(&self) -> BatchResponse {
        BatchResponse {
            generation: self.generation,
            batch_index: self.batch_index,
            matches: match_batch(&self.sources, &self.targets, self.params, &self.curated),
        }
    }
}

/// Ranked candidates for every source of a batch, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResponse {
    pub generation: u64,
    pub batch_index: usize,
    pub matches: Vec<SourceMatches>,
}
