//! Mathematical utilities for the algorithm

/// Discrete sampling and log-weight helpers
pub mod probability;
