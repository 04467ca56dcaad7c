//! Error types of the statistics functions.

use thiserror::Error;

/// Precondition violations signaled by the statistics functions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// The sequence has no elements.
    #[error("sequence must not be empty")]
    EmptyInput,

    /// Sample variance needs at least two values.
    #[error("sequence must have at least 2 values, but has {n_vals}")]
    InsufficientSamples { n_vals: usize },

    /// A divisor of the computation is zero.
    #[error("{quantity} must not be zero")]
    ZeroDivisor { quantity: &'static str },

    /// Two aligned sequences have different lengths.
    #[error("sequences must have equal lengths, but have {len_a} and {len_b}")]
    LengthMismatch { len_a: usize, len_b: usize },
}

pub type Result<T> = std::result::Result<T, StatsError>;
