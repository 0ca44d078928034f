//! Algorithm constants and runtime configuration defaults

/// Scale of the jitter added to entropies when picking the next cell
pub const OBSERVATION_NOISE: f64 = 1e-6;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output dimension in cells
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Attempts made before a source is reported as failed
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Default tile edge length for the tile modes
pub const DEFAULT_TILE_SIZE: usize = 3;

/// Default output edge length in pixels
pub const DEFAULT_OUTPUT_SIZE: usize = 48;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
