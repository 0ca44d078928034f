//! Directed compatibility graph between symbols
//!
//! `allowed(s, d)` lists the symbols observed directly in direction `d` from
//! `s` in the source. Lists are stored back to back in one vector with a
//! row offset per `(symbol, direction)` pair, so a lookup is two reads and a
//! slice.

use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::basis::Basis;
use ndarray::Array2;

/// Accumulates observed adjacencies while the source is scanned
///
/// The number of symbols grows as new content is interned. Each list keeps
/// insertion order and ignores repeats.
#[derive(Clone, Debug)]
pub struct PropagatorBuilder {
    num_directions: usize,
    lists: Vec<Vec<usize>>,
}

impl PropagatorBuilder {
    /// Empty builder for a basis with `num_directions` directions
    pub const fn new(num_directions: usize) -> Self {
        Self {
            num_directions,
            lists: Vec::new(),
        }
    }

    /// Make room for symbol ids up to and including `symbol`
    pub fn ensure_symbol(&mut self, symbol: usize) {
        let needed = (symbol + 1) * self.num_directions;
        if self.lists.len() < needed {
            self.lists.resize_with(needed, Vec::new);
        }
    }

    /// Record that `to` was seen in `direction` from `from`
    pub fn allow(&mut self, from: usize, direction: usize, to: usize) {
        if direction >= self.num_directions {
            return;
        }
        self.ensure_symbol(from.max(to));
        if let Some(list) = self.lists.get_mut(from * self.num_directions + direction) {
            if !list.contains(&to) {
                list.push(to);
            }
        }
    }

    /// Number of symbols seen so far
    pub const fn num_symbols(&self) -> usize {
        if self.num_directions == 0 {
            0
        } else {
            self.lists.len() / self.num_directions
        }
    }

    /// Freeze into a flat propagator over `num_symbols` symbols
    ///
    /// # Errors
    ///
    /// Returns an error if any recorded edge names a symbol outside
    /// `0..num_symbols`.
    pub fn build(mut self, num_symbols: usize) -> Result<Propagator> {
        self.ensure_symbol(num_symbols.saturating_sub(1));
        let rows = num_symbols * self.num_directions;

        let mut offsets = Vec::with_capacity(rows + 1);
        let mut targets = Vec::new();
        offsets.push(0);
        for list in self.lists.iter().take(rows) {
            if let Some(&bad) = list.iter().find(|&&to| to >= num_symbols) {
                return Err(AlgorithmError::InvalidSymbolIndex {
                    index: bad,
                    num_symbols,
                });
            }
            targets.extend_from_slice(list);
            offsets.push(targets.len());
        }
        if let Some(extra) = self.lists.get(rows..) {
            if extra.iter().any(|list| !list.is_empty()) {
                return Err(AlgorithmError::InvalidSymbolIndex {
                    index: num_symbols,
                    num_symbols,
                });
            }
        }

        Ok(Propagator {
            num_symbols,
            num_directions: self.num_directions,
            offsets,
            targets,
        })
    }
}

/// Read-only `symbol -> direction -> allowed neighbors` graph
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Propagator {
    num_symbols: usize,
    num_directions: usize,
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl Propagator {
    /// Build from explicit lists indexed `[symbol][direction]`
    ///
    /// # Errors
    ///
    /// Returns an error if a symbol does not have exactly `num_directions`
    /// lists or a list names an unknown symbol.
    pub fn from_lists(num_directions: usize, lists: &[Vec<Vec<usize>>]) -> Result<Self> {
        let mut builder = PropagatorBuilder::new(num_directions);
        for (from, directions) in lists.iter().enumerate() {
            if directions.len() != num_directions {
                return Err(invalid_parameter(
                    "propagator",
                    &from,
                    &format!(
                        "symbol has {} direction lists, basis has {num_directions}",
                        directions.len()
                    ),
                ));
            }
            builder.ensure_symbol(from);
            for (direction, targets) in directions.iter().enumerate() {
                for &to in targets {
                    builder.allow(from, direction, to);
                }
            }
        }
        builder.build(lists.len())
    }

    /// Number of symbols
    pub const fn num_symbols(&self) -> usize {
        self.num_symbols
    }

    /// Number of directions
    pub const fn num_directions(&self) -> usize {
        self.num_directions
    }

    /// Symbols allowed in `direction` from `symbol`, in observation order
    pub fn allowed(&self, symbol: usize, direction: usize) -> &[usize] {
        if symbol >= self.num_symbols || direction >= self.num_directions {
            return &[];
        }
        let row = symbol * self.num_directions + direction;
        match (self.offsets.get(row), self.offsets.get(row + 1)) {
            (Some(&start), Some(&end)) => self.targets.get(start..end).unwrap_or(&[]),
            _ => &[],
        }
    }

    /// Whether `to` may sit in `direction` from `from`
    pub fn is_allowed(&self, from: usize, direction: usize, to: usize) -> bool {
        self.allowed(from, direction).contains(&to)
    }

    /// Whether any symbol has an edge in `direction`
    ///
    /// A source lattice one position thick along an axis, bounded, records
    /// nothing along it. Such a direction places no constraint on the output.
    pub fn constrains(&self, direction: usize) -> bool {
        (0..self.num_symbols).any(|symbol| !self.allowed(symbol, direction).is_empty())
    }

    /// Incoming-edge counts indexed `[symbol, direction]`
    ///
    /// Entry `(t, d)` is the number of symbols `s` with `t` in
    /// `allowed(s, d)`: how many choices at the neighbor lying opposite to
    /// `d` support `t`. This is the starting value of every cell's
    /// compatibility counter.
    pub fn incoming_counts(&self) -> Array2<i32> {
        let mut counts = Array2::zeros((self.num_symbols, self.num_directions));
        for from in 0..self.num_symbols {
            for direction in 0..self.num_directions {
                for &to in self.allowed(from, direction) {
                    if let Some(count) = counts.get_mut((to, direction)) {
                        *count += 1;
                    }
                }
            }
        }
        counts
    }

    /// Check that the graph was built for `basis`
    ///
    /// # Errors
    ///
    /// Returns an error when the direction counts differ.
    pub fn check_basis(&self, basis: &Basis) -> Result<()> {
        if basis.num_directions() == self.num_directions {
            Ok(())
        } else {
            Err(invalid_parameter(
                "basis",
                &basis.num_directions(),
                &format!("propagator has {} directions", self.num_directions),
            ))
        }
    }
}
