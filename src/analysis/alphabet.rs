//! Symbol alphabet extraction from a source image
//!
//! Scans the source at the granularity of the chosen mode, interns each
//! distinct block as a symbol, counts occurrences for the priors and records
//! every observed neighbor relation in the propagator. The three modes share
//! one scan; they differ only in block size and in the spacing of block
//! origins.

use crate::algorithm::propagator::{Propagator, PropagatorBuilder};
use crate::analysis::patterns::SourceImage;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::basis::Basis;
use crate::spatial::grid::GridGeometry;
use crate::spatial::tiles::TileBlock;
use std::collections::HashMap;
use tracing::debug;

/// How the source is cut into symbols
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractionMode {
    /// One symbol per distinct pixel color
    Pixel,
    /// Disjoint `tile_size` blocks; the size must divide both source dimensions
    NonOverlapping {
        /// Block edge length in pixels
        tile_size: usize,
    },
    /// A block at every pixel, read with wraparound
    Overlapping {
        /// Block edge length in pixels
        tile_size: usize,
    },
}

impl ExtractionMode {
    /// Edge length of a symbol's payload
    pub const fn tile_size(&self) -> usize {
        match self {
            Self::Pixel => 1,
            Self::NonOverlapping { tile_size } | Self::Overlapping { tile_size } => *tile_size,
        }
    }

    /// Pixel distance between neighboring block origins
    pub const fn step(&self) -> usize {
        match self {
            Self::Pixel | Self::Overlapping { .. } => 1,
            Self::NonOverlapping { tile_size } => *tile_size,
        }
    }

    fn validate(self, source: &SourceImage) -> Result<()> {
        let tile_size = self.tile_size();
        if tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &"must be at least 1",
            ));
        }
        let divides = source.width() % tile_size == 0 && source.height() % tile_size == 0;
        if matches!(self, Self::NonOverlapping { .. }) && !divides {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &format!(
                    "must divide the {}x{} source for non-overlapping tiles",
                    source.width(),
                    source.height()
                ),
            ));
        }
        Ok(())
    }
}

/// Symbols, priors, payloads and adjacency learned from a source
#[derive(Clone, Debug)]
pub struct Alphabet {
    mode: ExtractionMode,
    basis: Basis,
    weights: Vec<f64>,
    payloads: Vec<TileBlock>,
    propagator: Propagator,
}

impl Alphabet {
    /// Scan `source` and build its alphabet
    ///
    /// `source_periodic` decides whether neighbor lookups wrap at the source
    /// edges. Block contents always wrap, independent of this flag.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile size is zero, or does not divide the source in
    ///   non-overlapping mode
    /// - The source yields no symbols
    pub fn extract(
        source: &SourceImage,
        mode: ExtractionMode,
        basis: Basis,
        source_periodic: bool,
    ) -> Result<Self> {
        mode.validate(source)?;
        let step = mode.step();
        let tile_size = mode.tile_size();
        let lattice = GridGeometry::new(
            source.width() / step,
            source.height() / step,
            source_periodic,
        );

        let mut interner = SymbolInterner::default();
        let mut counts: Vec<usize> = Vec::new();
        let mut builder = PropagatorBuilder::new(basis.num_directions());

        for position in 0..lattice.len() {
            let (x, y) = lattice.coordinates(position);
            let block = source.block_wrapped(x * step, y * step, tile_size);
            let symbol = interner.intern(block);
            builder.ensure_symbol(symbol);
            if counts.len() <= symbol {
                counts.resize(symbol + 1, 0);
            }
            if let Some(count) = counts.get_mut(symbol) {
                *count += 1;
            }

            for (direction, vector, _) in basis.iter() {
                let Some((nx, ny)) = lattice.offset(x, y, vector) else {
                    continue;
                };
                let neighbor = source.block_wrapped(nx * step, ny * step, tile_size);
                let neighbor_symbol = interner.intern(neighbor);
                builder.allow(symbol, direction, neighbor_symbol);
            }
        }

        let num_symbols = interner.len();
        if num_symbols == 0 {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "source produced no symbols".to_string(),
            });
        }
        counts.resize(num_symbols, 0);

        let total = lattice.len() as f64;
        let weights: Vec<f64> = counts.iter().map(|&count| count as f64 / total).collect();
        let propagator = builder.build(num_symbols)?;

        debug!(
            ?mode,
            num_symbols,
            positions = lattice.len(),
            directions = basis.num_directions(),
            "extracted alphabet"
        );

        Ok(Self {
            mode,
            basis,
            weights,
            payloads: interner.into_blocks(),
            propagator,
        })
    }

    /// Assemble an alphabet from parts, e.g. a hand-written tile set
    ///
    /// # Errors
    ///
    /// Returns an error if the part sizes disagree, the alphabet is empty,
    /// the propagator was built for a different basis or a payload has the
    /// wrong edge length.
    pub fn from_parts(
        mode: ExtractionMode,
        basis: Basis,
        weights: Vec<f64>,
        payloads: Vec<TileBlock>,
        propagator: Propagator,
    ) -> Result<Self> {
        if weights.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "alphabet has no symbols".to_string(),
            });
        }
        if weights.len() != payloads.len() || weights.len() != propagator.num_symbols() {
            return Err(invalid_parameter(
                "alphabet",
                &weights.len(),
                &format!(
                    "{} payloads and {} propagator symbols do not match {} weights",
                    payloads.len(),
                    propagator.num_symbols(),
                    weights.len()
                ),
            ));
        }
        propagator.check_basis(&basis)?;
        if let Some(bad) = payloads.iter().find(|p| p.size() != mode.tile_size()) {
            return Err(invalid_parameter(
                "payload",
                &bad.size(),
                &format!("expected {0}x{0} blocks", mode.tile_size()),
            ));
        }
        Ok(Self {
            mode,
            basis,
            weights,
            payloads,
            propagator,
        })
    }

    /// Extraction mode the alphabet was built with
    pub const fn mode(&self) -> ExtractionMode {
        self.mode
    }

    /// Payload edge length in pixels
    pub const fn tile_size(&self) -> usize {
        self.mode.tile_size()
    }

    /// Basis the propagator was sampled with
    pub const fn basis(&self) -> Basis {
        self.basis
    }

    /// Number of symbols
    pub fn num_symbols(&self) -> usize {
        self.weights.len()
    }

    /// Prior weight per symbol, summing to 1 for extracted alphabets
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Payload of `symbol`
    pub fn payload(&self, symbol: usize) -> Option<&TileBlock> {
        self.payloads.get(symbol)
    }

    /// All payloads, indexed by symbol
    pub fn payloads(&self) -> &[TileBlock] {
        &self.payloads
    }

    /// Observed adjacency graph
    pub const fn propagator(&self) -> &Propagator {
        &self.propagator
    }
}

/// Dense ids for block contents in first-encounter order
#[derive(Default)]
struct SymbolInterner {
    ids: HashMap<TileBlock, usize>,
    blocks: Vec<TileBlock>,
}

impl SymbolInterner {
    fn intern(&mut self, block: TileBlock) -> usize {
        if let Some(&id) = self.ids.get(&block) {
            return id;
        }
        let id = self.blocks.len();
        self.ids.insert(block.clone(), id);
        self.blocks.push(block);
        id
    }

    fn len(&self) -> usize {
        self.blocks.len()
    }

    fn into_blocks(self) -> Vec<TileBlock> {
        self.blocks
    }
}
