//! Generation-tagged cross-match runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use skein_core::matching::cross::batches;
use skein_core::{
    CatalogType, Color, CuratedPairings, MatchAnnotations, MatchConfig, MatchParams,
    SourceMatches,
};

use crate::error::WorkerError;
use crate::executor::{ExecutorKind, MatchExecutor};
use crate::protocol::BatchRequest;

/// Shared run generation counter. Clones observe the same counter.
#[derive(Debug, Clone, Default)]
pub struct RunControl {
    current: Arc<AtomicU64>,
}

impl RunControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding whatever was running.
    pub fn supersede(&self) -> u64 {
        self.current.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}

/// A completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub generation: u64,
    pub params: MatchParams,
    pub matches: Vec<SourceMatches>,
}

impl RunOutput {
    /// Write the run into `annotations` unless a newer run has started since.
    /// Returns the number of annotated sources, or `None` if stale.
    pub fn apply_if_current(
        &self,
        control: &RunControl,
        annotations: &mut MatchAnnotations,
        source_type: CatalogType,
        target_type: CatalogType,
    ) -> Option<usize> {
        if !control.is_current(self.generation) {
            tracing::info!("Discarding results of superseded run {}", self.generation);
            return None;
        }
        Some(annotations.apply_run(
            source_type,
            &self.matches,
            self.params.method,
            target_type,
        ))
    }
}

/// Drives cross-match runs batch by batch through a [`MatchExecutor`].
///
/// Every run reuses the runner's executor, and with it the same worker.
#[derive(Debug)]
pub struct CrossMatchRunner {
    executor: MatchExecutor,
    control: RunControl,
    batch_size: usize,
}

impl CrossMatchRunner {
    /// Runner with an executor and batch size taken from `config`. The batch
    /// size is clamped into its accepted range.
    pub fn new(config: &MatchConfig) -> Self {
        Self::with_executor(MatchExecutor::from_config(config), config.clamped_batch_size())
    }

    pub fn with_executor(executor: MatchExecutor, batch_size: usize) -> Self {
        Self {
            executor,
            control: RunControl::new(),
            batch_size: batch_size.max(1),
        }
    }

    /// Handle for superseding runs or checking results from elsewhere.
    pub fn control(&self) -> RunControl {
        self.control.clone()
    }

    pub fn executor_kind(&self) -> ExecutorKind {
        self.executor.kind()
    }

    pub fn worker_thread(&self) -> Option<std::thread::ThreadId> {
        self.executor.worker_thread()
    }

    /// Rank every source against `targets`.
    ///
    /// Starting the run supersedes any earlier one. If the run is itself
    /// superseded it stops before its next batch and returns
    /// [`WorkerError::Superseded`].
    pub async fn run(
        &mut self,
        sources: &[Color],
        targets: Arc<[Color]>,
        params: MatchParams,
        curated: Arc<CuratedPairings>,
    ) -> Result<RunOutput, WorkerError> {
        let generation = self.control.supersede();
        tracing::info!(
            "Cross-match run {generation}: {} sources x {} targets, {} ({:?})",
            sources.len(),
            targets.len(),
            params.method,
            self.executor.kind()
        );

        let mut matches = Vec::with_capacity(sources.len());
        for (batch_index, batch) in batches(sources, self.batch_size).enumerate() {
            if !self.control.is_current(generation) {
                tracing::info!("Cross-match run {generation} superseded after {batch_index} batches");
                return Err(WorkerError::Superseded { generation });
            }

            let request = BatchRequest {
                generation,
                batch_index,
                sources: batch.to_vec(),
                targets: Arc::clone(&targets),
                params,
                curated: Arc::clone(&curated),
            };
            let response = self.executor.execute(request).await;
            matches.extend(response.matches);
        }

        if !self.control.is_current(generation) {
            tracing::info!("Cross-match run {generation} superseded before completion");
            return Err(WorkerError::Superseded { generation });
        }

        tracing::debug!("Cross-match run {generation} finished: {} sources ranked", matches.len());
        Ok(RunOutput {
            generation,
            params,
            matches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supersede_advances_generation() {
        let control = RunControl::new();
        assert_eq!(control.current(), 0);
        let g1 = control.supersede();
        let g2 = control.clone().supersede();
        assert_eq!((g1, g2), (1, 2));
        assert!(control.is_current(2));
        assert!(!control.is_current(1));
    }
}
