use bitvec::prelude::*;
use std::fmt;

/// Per-cell admissible-symbol sets packed into one bit vector
///
/// Cell `c` owns bits `c * num_symbols .. (c + 1) * num_symbols`; bit `t` of
/// that row is set while symbol `t` is still admissible there.
#[derive(Clone, Debug)]
pub struct DomainBitset {
    bits: BitVec,
    num_cells: usize,
    num_symbols: usize,
}

impl DomainBitset {
    /// Create domains with every symbol banned everywhere
    pub fn new(num_cells: usize, num_symbols: usize) -> Self {
        Self {
            bits: bitvec![0; num_cells * num_symbols],
            num_cells,
            num_symbols,
        }
    }

    /// Make every symbol admissible in every cell
    pub fn fill(&mut self) {
        self.bits.fill(true);
    }

    /// Number of cells
    pub const fn num_cells(&self) -> usize {
        self.num_cells
    }

    /// Number of symbols per cell
    pub const fn num_symbols(&self) -> usize {
        self.num_symbols
    }

    fn row(&self, cell: usize) -> &BitSlice {
        let start = cell * self.num_symbols;
        self.bits
            .get(start..start + self.num_symbols)
            .unwrap_or_else(|| BitSlice::empty())
    }

    /// Test whether `symbol` is admissible at `cell`
    pub fn contains(&self, cell: usize, symbol: usize) -> bool {
        symbol < self.num_symbols
            && self.bits.get(cell * self.num_symbols + symbol).as_deref() == Some(&true)
    }

    /// Ban `symbol` at `cell`
    ///
    /// Returns true if the symbol was admissible before the call.
    pub fn remove(&mut self, cell: usize, symbol: usize) -> bool {
        if symbol >= self.num_symbols {
            return false;
        }
        self.bits
            .get_mut(cell * self.num_symbols + symbol)
            .is_some_and(|mut bit| std::mem::replace(&mut *bit, false))
    }

    /// Count admissible symbols at `cell`
    pub fn count(&self, cell: usize) -> usize {
        self.row(cell).count_ones()
    }

    /// Lowest admissible symbol at `cell`
    pub fn first(&self, cell: usize) -> Option<usize> {
        self.row(cell).first_one()
    }

    /// Admissible symbols at `cell` in ascending order
    pub fn iter(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        self.row(cell).iter_ones()
    }
}

impl fmt::Display for DomainBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DomainBitset({} cells x {} symbols, {} admissible)",
            self.num_cells,
            self.num_symbols,
            self.bits.count_ones()
        )
    }
}
