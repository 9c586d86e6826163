//! Error types for payguard-engine.

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that stop the stream processor.
///
/// Anything discovered while evaluating a single request is confined to that
/// request's verdicts and never surfaces here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The evaluation policy is unusable.
    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    /// A verdict could not be written to its output channel.
    #[error("failed to emit verdict: {0}")]
    Output(#[from] std::io::Error),
}
