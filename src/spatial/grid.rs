//! Rectangular lattice geometry with optional wraparound
//!
//! Cells are addressed row-major (`index = y * width + x`). The same geometry
//! serves the output wave and the source position lattice scanned by the
//! model builder, so both agree on how edges wrap.

use crate::spatial::basis::Vector;

/// Dimensions and edge behavior of a cell lattice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    width: usize,
    height: usize,
    periodic: bool,
}

impl GridGeometry {
    /// Create a lattice of `width * height` cells
    pub const fn new(width: usize, height: usize, periodic: bool) -> Self {
        Self {
            width,
            height,
            periodic,
        }
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether neighbors wrap around the edges
    pub const fn is_periodic(&self) -> bool {
        self.periodic
    }

    /// Total cell count
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// True when the lattice holds no cells
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Split a flat index into `(x, y)`
    pub const fn coordinates(&self, index: usize) -> (usize, usize) {
        if self.width == 0 {
            return (0, 0);
        }
        (index % self.width, index / self.width)
    }

    /// Flat index of `(x, y)`
    pub const fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Cell reached from `(x, y)` by `vector`
    ///
    /// Wraps on periodic lattices; returns `None` when the step leaves a
    /// non-periodic lattice.
    pub fn offset(&self, x: usize, y: usize, vector: Vector) -> Option<(usize, usize)> {
        let nx = wrap_axis(x as i64 + i64::from(vector[0]), self.width, self.periodic)?;
        let ny = wrap_axis(y as i64 + i64::from(vector[1]), self.height, self.periodic)?;
        Some((nx, ny))
    }

    /// Flat index of the neighbor of `index` along `vector`
    pub fn neighbor(&self, index: usize, vector: Vector) -> Option<usize> {
        let (x, y) = self.coordinates(index);
        self.offset(x, y, vector).map(|(nx, ny)| self.index(nx, ny))
    }
}

/// Map a coordinate onto `0..extent`
///
/// In-range values pass through. Out-of-range values wrap when `periodic`
/// and are rejected otherwise.
pub fn wrap_axis(value: i64, extent: usize, periodic: bool) -> Option<usize> {
    let extent_i64 = i64::try_from(extent).ok()?;
    if extent_i64 == 0 {
        return None;
    }
    if (0..extent_i64).contains(&value) {
        return usize::try_from(value).ok();
    }
    if periodic {
        usize::try_from(value.rem_euclid(extent_i64)).ok()
    } else {
        None
    }
}
