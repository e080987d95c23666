use thiserror::Error;

use crate::tier::Tier;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CareerError {
    #[error("Insufficient data: expected {expected} rounds, got {actual}")]
    InsufficientData { expected: usize, actual: usize },
    #[error("Tier {0} is locked: place top 4 in the tier below first")]
    TierLocked(Tier),
    #[error("Round is still in progress")]
    RoundInProgress,
}

/// Failure reported by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
    #[error("stored data is corrupt: {0}")]
    Corrupt(String),
}
