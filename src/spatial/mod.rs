//! Spatial data structures shared by extraction and solving
//!
//! This module contains spatial-related functionality including:
//! - Neighbor bases (4- and 8-connected)
//! - Lattice geometry with periodic wraparound
//! - Pixel blocks used as symbol payloads

/// Direction tables and opposites
pub mod basis;
/// Lattice dimensions and neighbor lookup
pub mod grid;
/// Pixel blocks carried by symbols
pub mod tiles;

pub use basis::Basis;
pub use grid::GridGeometry;
pub use tiles::{Rgba, TileBlock};
