//! Tests for algorithm configuration constants

#[cfg(test)]
mod tests {
    use wavetile::io::configuration::{
        DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT_SIZE, DEFAULT_SEED, DEFAULT_TILE_SIZE,
        MAX_GRID_DIMENSION, MAX_INDIVIDUAL_PROGRESS_BARS, OBSERVATION_NOISE, OUTPUT_SUFFIX,
    };

    // Tests the entropy jitter stays far below any entropy gap
    #[test]
    fn test_observation_noise_scale() {
        assert!(OBSERVATION_NOISE > 0.0);
        assert!(OBSERVATION_NOISE <= 1e-6);
    }

    // Tests the attempt budget default
    #[test]
    fn test_default_attempts() {
        assert_eq!(DEFAULT_MAX_ATTEMPTS, 10);
    }

    // Tests generation defaults
    #[test]
    fn test_generation_defaults() {
        assert_eq!(DEFAULT_SEED, 42);
        assert_eq!(DEFAULT_TILE_SIZE, 3);
        assert_eq!(DEFAULT_OUTPUT_SIZE, 48);
        assert!(DEFAULT_OUTPUT_SIZE <= MAX_GRID_DIMENSION);
    }

    // Tests output and display settings
    #[test]
    fn test_output_settings() {
        assert_eq!(OUTPUT_SUFFIX, "_result");
        assert_eq!(MAX_INDIVIDUAL_PROGRESS_BARS, 5);
        assert_eq!(MAX_GRID_DIMENSION, 10_000);
    }
}
