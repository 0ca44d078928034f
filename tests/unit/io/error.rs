//! Tests for error formatting and conversions

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::PathBuf;
    use wavetile::io::error::{AlgorithmError, computation_error};

    // Tests generation failures name the attempt count
    #[test]
    fn test_generation_exhausted_display() {
        let err = AlgorithmError::GenerationExhausted { attempts: 10 };
        assert_eq!(err.to_string(), "Generation failed after 10 attempts");
        assert!(err.source().is_none());
    }

    // Tests symbol index errors report the alphabet size
    #[test]
    fn test_invalid_symbol_display() {
        let err = AlgorithmError::InvalidSymbolIndex {
            index: 7,
            num_symbols: 3,
        };
        assert_eq!(
            err.to_string(),
            "Symbol index 7 is out of bounds (alphabet has 3 symbols)"
        );
    }

    // Tests computation errors carry the operation name
    #[test]
    fn test_computation_error() {
        let err = computation_error("weight_log_weight", &"weight 0 must be positive");
        assert_eq!(
            err.to_string(),
            "Computation error in weight_log_weight: weight 0 must be positive"
        );
    }

    // Tests I/O errors convert with their source preserved
    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AlgorithmError = io_error.into();
        match &err {
            AlgorithmError::FileSystem { path, .. } => {
                assert_eq!(path, &PathBuf::from("<unknown>"));
            }
            _ => unreachable!("Expected FileSystem error type"),
        }
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing"));
    }
}
