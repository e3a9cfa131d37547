/// Errors from the background matching layer.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("failed to spawn match worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("match worker is not running")]
    Disconnected,

    #[error("match worker dropped the batch without replying")]
    ResponseDropped,

    #[error("cross-match run {generation} was superseded by a newer run")]
    Superseded { generation: u64 },
}
