//! Error types for the readiness engine.

use thiserror::Error;

/// Result type for readiness operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the readiness engine.
///
/// Individual check failures never appear here; they are converted into
/// down entries in the phase aggregate at the processor boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// A liveness query arrived before the readiness sequence finished.
    ///
    /// This is a sequencing error on the caller's side, distinct from a
    /// down health result.
    #[error("health check not ready: readiness check has not finished")]
    ReadinessNotFinished,

    /// Failed to serialize an aggregate into a detail value.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
