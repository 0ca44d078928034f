//! Solver state for one output grid
//!
//! The wave keeps, per cell, the set of symbols still admissible there, a
//! support counter per `(symbol, direction)` and an entropy used to rank
//! cells. Observation collapses one cell; propagation drains the ban stack
//! and removes every symbol whose support in some direction has run out.
//!
//! Within an attempt domains only shrink. Each `(cell, symbol)` pair is
//! pushed on the stack at most once, which bounds propagation work by
//! `cells * symbols`.

use crate::algorithm::bitset::DomainBitset;
use crate::algorithm::propagator::Propagator;
use crate::algorithm::selection::{CellSelection, select_min_entropy_cell};
use crate::io::error::{AlgorithmError, Result};
use crate::math::probability::{sample_discrete, weight_log_weight};
use crate::spatial::basis::Basis;
use crate::spatial::grid::GridGeometry;
use ndarray::{Array2, Array3, Axis};
use tracing::{debug, trace};

/// Result of a single observe or iterate step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterationResult {
    /// Every cell is decided
    Success,
    /// Some cell ran out of symbols
    Failure,
    /// A cell was collapsed and work remains
    Ongoing,
}

/// A symbol removed from a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BanEvent {
    /// Flat cell index
    pub cell: usize,
    /// Banned symbol id
    pub symbol: usize,
}

/// Per-cell domains, support counters and entropies for one grid
#[derive(Clone, Debug)]
pub struct Wave {
    geometry: GridGeometry,
    basis: Basis,
    weights: Vec<f64>,
    weight_log_weights: Vec<f64>,
    starting_entropy: f64,
    incoming: Array2<i32>,
    domains: DomainBitset,
    compatible: Array3<i32>,
    entropies: Vec<f64>,
    stack: Vec<BanEvent>,
    history: Vec<BanEvent>,
    observed: Option<Vec<usize>>,
}

impl Wave {
    /// Allocate the state for `geometry` over an alphabet with `weights`
    ///
    /// Domains start empty and counters at zero; call [`Wave::clear`] before
    /// observing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The alphabet is empty or the grid has no cells
    /// - A weight is not positive and finite
    /// - The propagator disagrees with the weights or the basis
    pub fn new(
        geometry: GridGeometry,
        basis: Basis,
        weights: &[f64],
        propagator: &Propagator,
    ) -> Result<Self> {
        if weights.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "cannot solve over an empty alphabet".to_string(),
            });
        }
        if geometry.is_empty() {
            return Err(crate::io::error::invalid_parameter(
                "geometry",
                &format!("{}x{}", geometry.width(), geometry.height()),
                &"output must have at least one cell",
            ));
        }
        if propagator.num_symbols() != weights.len() {
            return Err(AlgorithmError::InvalidSymbolIndex {
                index: propagator.num_symbols(),
                num_symbols: weights.len(),
            });
        }
        propagator.check_basis(&basis)?;

        let weight_log_weights = weights
            .iter()
            .map(|&weight| weight_log_weight(weight))
            .collect::<Result<Vec<f64>>>()?;
        let starting_entropy = -weight_log_weights.iter().sum::<f64>();

        let num_cells = geometry.len();
        let num_symbols = weights.len();
        debug!(
            width = geometry.width(),
            height = geometry.height(),
            num_symbols,
            starting_entropy,
            "initialized wave"
        );

        Ok(Self {
            geometry,
            basis,
            weights: weights.to_vec(),
            weight_log_weights,
            starting_entropy,
            incoming: propagator.incoming_counts(),
            domains: DomainBitset::new(num_cells, num_symbols),
            compatible: Array3::zeros((num_cells, num_symbols, basis.num_directions())),
            entropies: vec![0.0; num_cells],
            stack: Vec::new(),
            history: Vec::new(),
            observed: None,
        })
    }

    /// Reset every cell to the full alphabet
    ///
    /// Counters are restored from the incoming-edge counts and entropies to
    /// the starting entropy. The stack, ban history and any previous
    /// observation are discarded.
    pub fn clear(&mut self) {
        self.domains.fill();
        for mut cell in self.compatible.axis_iter_mut(Axis(0)) {
            cell.assign(&self.incoming);
        }
        self.entropies.fill(self.starting_entropy);
        self.stack.clear();
        self.history.clear();
        self.observed = None;
    }

    /// Ban symbols that have no possible support from an existing neighbor
    ///
    /// A symbol that was never seen with any neighbor on some side cannot be
    /// supported by a cell on that side. Removing it up front keeps the
    /// counters honest for non-periodic sources; call [`Wave::propagate`]
    /// afterwards.
    ///
    /// Directions in which the source recorded no edges at all are left
    /// unconstrained.
    pub fn ban_unsupported(&mut self) {
        let num_symbols = self.weights.len();
        let basis = self.basis;
        let constrained: Vec<bool> = (0..basis.num_directions())
            .map(|direction| self.incoming.column(direction).sum() > 0)
            .collect();
        for cell in 0..self.geometry.len() {
            for (direction, _, opposite) in basis.iter() {
                if !constrained.get(direction).copied().unwrap_or(false) {
                    continue;
                }
                let Some(back) = basis.vector(opposite) else {
                    continue;
                };
                if self.geometry.neighbor(cell, back).is_none() {
                    continue;
                }
                for symbol in 0..num_symbols {
                    let supports = self
                        .incoming
                        .get((symbol, direction))
                        .copied()
                        .unwrap_or(0);
                    if supports <= 0 {
                        self.ban(cell, symbol);
                    }
                }
            }
        }
    }

    /// Collapse the lowest-entropy undecided cell
    ///
    /// Returns `Failure` if a cell has no symbols left and `Success` once
    /// every cell is decided, filling the observation. Otherwise samples one
    /// symbol by prior weight, bans the rest at that cell and returns
    /// `Ongoing`.
    pub fn observe<R>(&mut self, rng: &mut R) -> IterationResult
    where
        R: FnMut() -> f64,
    {
        let cell = match select_min_entropy_cell(&self.domains, &self.entropies, rng) {
            CellSelection::Contradiction(cell) => {
                debug!(cell, "contradiction");
                return IterationResult::Failure;
            }
            CellSelection::AllDecided => {
                self.observed = Some(
                    (0..self.geometry.len())
                        .map(|cell| self.domains.first(cell).unwrap_or(0))
                        .collect(),
                );
                return IterationResult::Success;
            }
            CellSelection::Cell(cell) => cell,
        };

        let distribution: Vec<f64> = self
            .weights
            .iter()
            .enumerate()
            .map(|(symbol, &weight)| {
                if self.domains.contains(cell, symbol) {
                    weight
                } else {
                    0.0
                }
            })
            .collect();
        let chosen = sample_discrete(&distribution, rng());
        trace!(cell, symbol = chosen, "collapsing cell");

        for symbol in 0..self.weights.len() {
            if symbol != chosen && self.domains.contains(cell, symbol) {
                self.ban(cell, symbol);
            }
        }
        IterationResult::Ongoing
    }

    /// Drain the ban stack, enforcing arc consistency
    ///
    /// For each banned `(cell, symbol)` and each direction with a neighbor,
    /// every symbol the propagator allows there loses one support; symbols
    /// left without support are banned in turn.
    pub fn propagate(&mut self, propagator: &Propagator) {
        let basis = self.basis;
        while let Some(event) = self.stack.pop() {
            for (direction, vector, _) in basis.iter() {
                let Some(neighbor) = self.geometry.neighbor(event.cell, vector) else {
                    continue;
                };
                for &candidate in propagator.allowed(event.symbol, direction) {
                    let exhausted = self
                        .compatible
                        .get_mut((neighbor, candidate, direction))
                        .is_some_and(|count| {
                            *count -= 1;
                            *count <= 0
                        });
                    if exhausted {
                        self.ban(neighbor, candidate);
                    }
                }
            }
        }
    }

    /// Remove `symbol` from `cell`
    ///
    /// No-op when it is already banned. Otherwise records the event on the
    /// stack and in the history, then recomputes the cell's entropy.
    pub fn ban(&mut self, cell: usize, symbol: usize) {
        if !self.domains.remove(cell, symbol) {
            return;
        }
        let event = BanEvent { cell, symbol };
        self.stack.push(event);
        self.history.push(event);

        let sum: f64 = self
            .domains
            .iter(cell)
            .filter_map(|remaining| self.weight_log_weights.get(remaining))
            .sum();
        if let Some(entropy) = self.entropies.get_mut(cell) {
            *entropy = -sum;
        }
    }

    /// Grid the wave covers
    pub const fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Basis used for propagation
    pub const fn basis(&self) -> Basis {
        self.basis
    }

    /// Number of symbols
    pub fn num_symbols(&self) -> usize {
        self.weights.len()
    }

    /// Entropy of an empty wave: `-Σ w ln w` over the whole alphabet
    pub const fn starting_entropy(&self) -> f64 {
        self.starting_entropy
    }

    /// Whether `symbol` is still admissible at `cell`
    pub fn is_admissible(&self, cell: usize, symbol: usize) -> bool {
        self.domains.contains(cell, symbol)
    }

    /// Number of admissible symbols at `cell`
    pub fn admissible_count(&self, cell: usize) -> usize {
        self.domains.count(cell)
    }

    /// Admissible symbols at `cell`
    pub fn admissible(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        self.domains.iter(cell)
    }

    /// Current entropy of `cell`
    pub fn entropy(&self, cell: usize) -> Option<f64> {
        self.entropies.get(cell).copied()
    }

    /// Remaining support for `symbol` at `cell` along `direction`
    pub fn compatible(&self, cell: usize, symbol: usize, direction: usize) -> Option<i32> {
        self.compatible.get((cell, symbol, direction)).copied()
    }

    /// Bans not yet propagated
    pub fn pending(&self) -> &[BanEvent] {
        &self.stack
    }

    /// Every ban of the current attempt, in order
    pub fn history(&self) -> &[BanEvent] {
        &self.history
    }

    /// One symbol per cell, present only after `observe` returned `Success`
    pub fn observed(&self) -> Option<&[usize]> {
        self.observed.as_deref()
    }
}
