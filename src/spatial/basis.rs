//! Neighbor geometry shared by the model builder and the solver
//!
//! A basis lists the directions a cell constrains, the displacement of each
//! direction and the direction pointing back. Direction indices are dense
//! and used directly as the last axis of the compatibility counters.

/// Displacement `[dx, dy]` of one direction
pub type Vector = [i32; 2];

const CARDINAL_VECTORS: [Vector; 4] = [[1, 0], [0, 1], [-1, 0], [0, -1]];
const CARDINAL_OPPOSITES: [usize; 4] = [2, 3, 0, 1];

const DIAGONAL_VECTORS: [Vector; 8] = [
    [1, 0],
    [0, 1],
    [-1, 0],
    [0, -1],
    [1, 1],
    [1, -1],
    [-1, -1],
    [-1, 1],
];
const DIAGONAL_OPPOSITES: [usize; 8] = [2, 3, 0, 1, 6, 7, 4, 5];

/// Immutable direction table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Basis {
    vectors: &'static [Vector],
    opposites: &'static [usize],
}

impl Basis {
    /// Right, down, left, up
    pub const CARDINAL: Self = Self {
        vectors: &CARDINAL_VECTORS,
        opposites: &CARDINAL_OPPOSITES,
    };

    /// The cardinal directions followed by the four diagonals
    pub const CARDINAL_WITH_DIAGONALS: Self = Self {
        vectors: &DIAGONAL_VECTORS,
        opposites: &DIAGONAL_OPPOSITES,
    };

    /// Number of directions in the basis
    pub const fn num_directions(&self) -> usize {
        self.vectors.len()
    }

    /// Displacement of direction `d`, `None` when `d` is out of range
    pub fn vector(&self, direction: usize) -> Option<Vector> {
        self.vectors.get(direction).copied()
    }

    /// Direction whose vector is the negation of `direction`'s
    pub fn opposite(&self, direction: usize) -> Option<usize> {
        self.opposites.get(direction).copied()
    }

    /// Iterate `(direction, vector, opposite)` triples in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, Vector, usize)> + '_ {
        self.vectors
            .iter()
            .zip(self.opposites)
            .enumerate()
            .map(|(direction, (&vector, &opposite))| (direction, vector, opposite))
    }
}

impl Default for Basis {
    fn default() -> Self {
        Self::CARDINAL
    }
}
