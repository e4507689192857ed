/// Error types for score persistence
use thiserror::Error;

/// Result type alias for score operations
pub type Result<T> = std::result::Result<T, ScoreError>;

/// Errors that can occur while recording or reading high scores
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Filesystem or runtime setup error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be encoded
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The background recorder task panicked or was cancelled
    #[error("Score recorder task failed: {0}")]
    Task(String),

    /// Queued records were still pending when shutdown gave up
    #[error("Score recorder did not drain within {0:?}")]
    Timeout(std::time::Duration),
}
