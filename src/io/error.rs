//! Error types for model construction, generation and file handling
//!
//! Contradictions are not errors: a failed attempt is reported through
//! `generate() == Ok(false)`. Everything here is misuse or an I/O failure.

use std::fmt;
use std::path::PathBuf;

/// Main error type for all crate operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// A source image could not be opened or decoded
    ImageLoad {
        /// File that was read
        path: PathBuf,
        /// Decoder error
        source: image::ImageError,
    },

    /// The source or alphabet cannot be solved over
    InvalidSourceData {
        /// What is wrong with it
        reason: String,
    },

    /// A construction or runtime argument is out of range
    InvalidParameter {
        /// Argument name
        parameter: &'static str,
        /// Offending value, formatted
        value: String,
        /// Accepted range or constraint
        reason: String,
    },

    /// Symbol id exceeds the alphabet
    InvalidSymbolIndex {
        /// The invalid symbol id
        index: usize,
        /// Number of symbols in the alphabet
        num_symbols: usize,
    },

    /// Generated data was requested before a successful attempt
    GenerationIncomplete,

    /// Every allowed attempt ended in a contradiction
    GenerationExhausted {
        /// Number of attempts made
        attempts: usize,
    },

    /// A rendered result could not be encoded or written
    ImageExport {
        /// Destination file
        path: PathBuf,
        /// Encoder error
        source: image::ImageError,
    },

    /// Directory listing, creation or another file operation failed
    FileSystem {
        /// Path the operation touched
        path: PathBuf,
        /// Short operation name, e.g. "read directory"
        operation: &'static str,
        /// OS error
        source: std::io::Error,
    },

    /// A numeric value such as a log-weight is unusable
    Computation {
        /// Function that produced it
        operation: &'static str,
        /// What went wrong
        reason: String,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Cannot read source image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSymbolIndex { index, num_symbols } => {
                write!(
                    f,
                    "Symbol index {index} is out of bounds (alphabet has {num_symbols} symbols)"
                )
            }
            Self::GenerationIncomplete => {
                write!(f, "Generated data requested before a successful generation")
            }
            Self::GenerationExhausted { attempts } => {
                write!(f, "Generation failed after {attempts} attempts")
            }
            Self::ImageExport { path, source } => {
                write!(f, "Cannot write result '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(f, "Cannot {operation} '{}': {source}", path.display())
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "access",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a file-system error for a path-level failure with no OS error
pub fn path_error(path: impl Into<PathBuf>, operation: &'static str, msg: &str) -> AlgorithmError {
    AlgorithmError::FileSystem {
        path: path.into(),
        operation,
        source: std::io::Error::other(msg.to_string()),
    }
}
