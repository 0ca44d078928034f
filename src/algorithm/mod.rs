/// Packed per-cell symbol domains
pub mod bitset;
/// Model driver: lifecycle, retries and output
pub mod executor;
/// Flat symbol adjacency graph and its builder
pub mod propagator;
/// Minimum-entropy cell selection
pub mod selection;
/// Solver state: observe, propagate and ban
pub mod wave;
