//! Simulation error types
//!
//! Only conditions that indicate a broken session live here. Difficulty 0
//! ("quit from menu") is a normal outcome and is modelled as `Option`.

use thiserror::Error;

/// Errors that can occur while running a session.
#[derive(Error, Debug)]
pub enum SimError {
    /// Growing the entity pool failed to allocate.
    #[error("entity pool exhausted: could not grow from {current} to {requested} entries")]
    PoolExhausted {
        /// Pool size before the failed growth.
        current: usize,
        /// Size that was requested.
        requested: usize,
    },

    /// Indexed entity access past the live size of the pool.
    #[error("entity index {index} out of bounds (pool size {len})")]
    OutOfBounds {
        /// Requested index.
        index: usize,
        /// Live size at the time of access.
        len: usize,
    },

    /// Attempted to retire a slot whose entity already left the pool.
    #[error("entity {index} was already retired")]
    AlreadyRetired {
        /// Slot index.
        index: usize,
    },

    /// Tuning values that cannot produce a playable session.
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    /// Tuning JSON could not be parsed.
    #[error("failed to parse tuning: {0}")]
    TuningParse(#[from] serde_json::Error),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
