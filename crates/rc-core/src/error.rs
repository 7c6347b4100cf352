//! Error types for room-chain generation

use thiserror::Error;

/// Errors raised while configuring or advancing a room chain
#[derive(Error, Debug)]
pub enum ChainError {
    /// The random source kept producing forbidden doors past the retry cap.
    /// An honest source never gets here; this signals a broken one.
    #[error("door selection gave up after {attempts} rejected draws")]
    GenerationInvariantViolated { attempts: u32 },

    /// A numeric door index outside 1..=4
    #[error("invalid door index {0} (expected 1..=4)")]
    InvalidDoorIndex(i32),

    #[error("room chain has not been initialized")]
    NotInitialized,

    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("could not parse config: {0}")]
    Config(#[from] serde_json::Error),
}
