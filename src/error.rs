//! Crate error type
//!
//! Nothing inside a tick can fail. Errors only come from construction
//! (parsing kinds, loading tuning) and from host setup.

/// Errors surfaced to the host
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Unknown enemy kind: {0}")]
    UnknownEnemyKind(String),

    #[error("Unknown power-up kind: {0}")]
    UnknownPowerUpKind(String),

    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("Failed to parse tuning: {0}")]
    TuningParse(#[from] serde_json::Error),

    #[error("Assets unavailable: {0}")]
    AssetsUnavailable(String),
}
