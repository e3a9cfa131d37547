//! The single background match worker.
//!
//! A dedicated OS thread runs a current-thread tokio runtime and drains an
//! unbounded request channel. Each request carries a oneshot sender for its
//! reply.
//!
//! Dropping a [`MatchWorker`] closes the channel and detaches the thread, so it
//! never blocks the dropping thread; requests already queued are still run and
//! the thread exits after the last one. [`MatchWorker::shutdown`] does the same
//! but also joins, and must not be called from inside an async task.

use std::thread::JoinHandle;

use tokio::sync::{mpsc, oneshot};

use crate::error::WorkerError;
use crate::protocol::{BatchRequest, BatchResponse};

const THREAD_NAME: &str = "skein-match-worker";

type Job = (BatchRequest, oneshot::Sender<BatchResponse>);

pub struct MatchWorker {
    tx: Option<mpsc::UnboundedSender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl MatchWorker {
    /// Start the worker thread.
    pub fn spawn() -> Result<Self, WorkerError> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();

        let handle = std::thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || {
                let rt = match tokio::runtime::Builder::new_current_thread().build() {
                    Ok(rt) => rt,
                    Err(e) => {
                        tracing::error!("Failed to build runtime for match worker: {e}");
                        return;
                    }
                };

                rt.block_on(async move {
                    tracing::info!("Match worker started");
                    while let Some((request, reply)) = rx.recv().await {
                        let response = request.run();
                        if reply.send(response).is_err() {
                            tracing::debug!(
                                "Batch {} of run {} finished after its caller went away",
                                request.batch_index,
                                request.generation
                            );
                        }
                    }
                    tracing::info!("Match worker stopped");
                });
            })
            .map_err(WorkerError::Spawn)?;

        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
        })
    }

    /// Whether the worker can still accept requests.
    pub fn is_running(&self) -> bool {
        self.tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    /// Send one batch to the worker and wait for its reply.
    pub async fn submit(&self, request: BatchRequest) -> Result<BatchResponse, WorkerError> {
        let tx = self.tx.as_ref().ok_or(WorkerError::Disconnected)?;
        let (reply_tx, reply_rx) = oneshot::channel();
        tx.send((request, reply_tx))
            .map_err(|_| WorkerError::Disconnected)?;
        reply_rx.await.map_err(|_| WorkerError::ResponseDropped)
    }

    pub fn thread_id(&self) -> Option<std::thread::ThreadId> {
        self.handle.as_ref().map(|h| h.thread().id())
    }

    /// Close the request channel and wait for the thread to exit. Blocks until
    /// every queued request has been run.
    pub fn shutdown(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            tracing::error!("Match worker thread panicked");
        }
    }
}

impl Drop for MatchWorker {
    fn drop(&mut self) {
        self.tx.take();
        if self.handle.take().is_some() {
            tracing::debug!("Match worker detached");
        }
    }
}

impl std::fmt::Debug for MatchWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchWorker")
            .field("running", &self.is_running())
            .finish()
    }
}
