//! Input/output, configuration and error handling

/// Command-line parsing and batch file processing
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types shared across the crate
pub mod error;
/// PNG rendering of generated patterns
pub mod image;
/// Terminal progress bars
pub mod progress;
