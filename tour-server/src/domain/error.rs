//! Domain error types.
//!
//! These errors represent values that cannot form a valid activity. They are
//! distinct from I/O and configuration errors raised while loading data.

use super::{ClockTime, TimeError};

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A time field could not be parsed
    #[error(transparent)]
    Time(#[from] TimeError),

    /// Duration field is not a non-negative number of hours
    #[error("invalid duration: {0:?}")]
    InvalidDuration(String),

    /// Duration is below zero
    #[error("duration must not be negative")]
    NegativeDuration,

    /// Cost field is not a non-negative integer
    #[error("invalid cost: {0:?}")]
    InvalidCost(String),

    /// Closing time precedes opening time
    #[error("availability window closes at {until} before it opens at {from}")]
    InvalidWindow { from: ClockTime, until: ClockTime },
}
