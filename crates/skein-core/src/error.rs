/// Errors produced by the core matching and indexing layer.
#[derive(Debug, thiserror::Error)]
pub enum SkeinError {
    #[error("not a 6-digit hex color: {0:?}")]
    InvalidHex(String),

    #[error("color at position {position} has an empty code and cannot be indexed")]
    EmptyCode { position: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}
