use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("expected {expected} joint values, got {got}")]
    BadArity { expected: usize, got: usize },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
