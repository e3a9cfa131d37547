//! Skein Worker — background execution for cross-catalog matching.
//!
//! A cross-match run is split into fixed-size batches. Each batch is handed
//! to a [`MatchExecutor`], which either ships it to the single background
//! [`MatchWorker`] thread or runs it inline, yielding to the caller between
//! batches. If the worker cannot be started or fails, the executor drops it
//! and stays inline for the rest of the session. Output is identical either
//! way.
//!
//! Runs are generation-tagged through [`RunControl`]; starting a new run
//! supersedes any run still in flight.

pub mod error;
pub mod executor;
pub mod offload;
pub mod protocol;
pub mod run;

pub use error::WorkerError;
pub use executor::{ExecutorKind, MatchExecutor};
pub use offload::MatchWorker;
pub use protocol::{BatchRequest, BatchResponse};
pub use run::{CrossMatchRunner, RunControl, RunOutput};
