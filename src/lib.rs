//! Wave function collapse texture synthesis
//!
//! The system learns a symbol alphabet and its adjacency graph from a small
//! source image, then fills an output grid by repeatedly collapsing the
//! least uncertain cell and propagating the consequences until every cell
//! holds one symbol or a contradiction ends the attempt.

#![forbid(unsafe_code)]

/// Constraint solver: domains, propagation, cell selection and the driver
pub mod algorithm;
/// Source images and symbol alphabet extraction
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Mathematical utilities for sampling and log-weights
pub mod math;
/// Bases, lattice geometry and pixel blocks
pub mod spatial;

pub use algorithm::executor::{Model, OutputConfig, RandomSelector};
pub use algorithm::wave::IterationResult;
pub use analysis::alphabet::{Alphabet, ExtractionMode};
pub use analysis::patterns::SourceImage;
pub use io::error::{AlgorithmError, Result};
pub use spatial::Basis;
