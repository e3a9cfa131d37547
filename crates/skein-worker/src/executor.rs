//! Uniform batch execution with a sticky inline fallback.

use skein_core::MatchConfig;

use crate::offload::MatchWorker;
use crate::protocol::{BatchRequest, BatchResponse};

/// Where batches currently run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorKind {
    /// On the background worker thread.
    Offloaded,
    /// On the caller's thread, yielding between batches.
    Inline,
}

/// Runs match batches on the worker when one is available, inline otherwise.
///
/// Each offloading executor owns its own worker thread, so there is one
/// background worker per executor, not per process. Keep a single executor
/// (usually inside one [`CrossMatchRunner`](crate::CrossMatchRunner)) for the
/// session rather than building one per run.
///
/// Once the worker fails the executor drops it and never re-creates it; every
/// later batch runs inline. A failed batch is re-run inline, not retried on
/// the worker.
#[derive(Debug)]
pub struct MatchExecutor {
    worker: Option<MatchWorker>,
}

impl MatchExecutor {
    /// Try to start a worker when `offload` is set. A worker that cannot be
    /// started is logged and the executor runs inline. Every call with
    /// `offload` set starts a new thread.
    pub fn new(offload: bool) -> Self {
        if !offload {
            return Self::inline();
        }
        match MatchWorker::spawn() {
            Ok(worker) => Self::with_worker(worker),
            Err(e) => {
                tracing::warn!("Background matching unavailable, running inline: {e}");
                Self::inline()
            }
        }
    }

    pub fn from_config(config: &MatchConfig) -> Self {
        Self::new(config.offload)
    }

    pub fn inline() -> Self {
        Self { worker: None }
    }

    pub fn with_worker(worker: MatchWorker) -> Self {
        Self {
            worker: Some(worker),
        }
    }

    pub fn kind(&self) -> ExecutorKind {
        if self.worker.is_some() {
            ExecutorKind::Offloaded
        } else {
            ExecutorKind::Inline
        }
    }

    /// Thread of the worker this executor submits to, if any.
    pub fn worker_thread(&self) -> Option<std::thread::ThreadId> {
        self.worker.as_ref().and_then(MatchWorker::thread_id)
    }

    /// Execute one batch.
    pub async fn execute(&mut self, request: BatchRequest) -> BatchResponse {
        let offloaded = match &self.worker {
            Some(worker) => Some(worker.submit(request.clone()).await),
            None => None,
        };

        match offloaded {
            Some(Ok(response)) => return response,
            Some(Err(e)) => {
                tracing::error!(
                    "Match worker failed on batch {} of run {}, continuing inline for this session: {e}",
                    request.batch_index,
                    request.generation
                );
                self.worker = None;
            }
            None => {}
        }

        let response = request.run();
        tokio::task::yield_now().await;
        response
    }
}

impl Default for MatchExecutor {
    fn default() -> Self {
        Self::from_config(&MatchConfig::default())
    }
}
