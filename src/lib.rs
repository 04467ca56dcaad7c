//! Descriptive statistics over numeric samples.
//!
//! The [`stats`] module provides means (plain, trimmed and weighted), medians,
//! dispersion measures and the Pearson correlation as pure functions over
//! slices. Failed preconditions are reported as [`StatsError`].
//!
//! # Example
//!
//! ```
//! use descstats::stats;
//!
//! let vals = [4.0, 2.0, 10.0, -6.0, 1.0, 1.7];
//! let median = stats::median(&vals).unwrap();
//! assert!((median - 1.85).abs() < 1e-12);
//! assert!(stats::variance(&vals[..1]).is_err());
//! ```

pub mod error;
pub mod stats;

pub use error::{Result, StatsError};
pub use stats::WeightedVal;
