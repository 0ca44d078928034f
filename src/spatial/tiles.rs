//! Square pixel blocks used as symbol payloads
//!
//! Every symbol carries the block of pixels it stands for: a single pixel in
//! pixel mode, an `N×N` block in the tile modes. Blocks are stored row-major
//! and expanded back into the output buffer once generation succeeds.

/// One RGBA8 pixel
pub type Rgba = [u8; 4];

/// Row-major `size × size` block of pixels
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileBlock {
    size: usize,
    pixels: Vec<Rgba>,
}

impl TileBlock {
    /// Wrap a row-major pixel vector
    ///
    /// Returns `None` unless `pixels.len() == size * size`.
    pub fn new(size: usize, pixels: Vec<Rgba>) -> Option<Self> {
        (size > 0 && pixels.len() == size * size).then_some(Self { size, pixels })
    }

    /// A 1×1 block
    pub fn single(pixel: Rgba) -> Self {
        Self {
            size: 1,
            pixels: vec![pixel],
        }
    }

    /// Edge length in pixels
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Row-major pixels
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixel at `(x, y)` within the block
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.size {
            return None;
        }
        self.pixels.get(y * self.size + x).copied()
    }

    /// Copy the block into an RGBA8 buffer whose rows are `buffer_width`
    /// pixels wide, with the block's top-left corner at pixel `origin`
    ///
    /// Pixels falling outside the buffer are dropped.
    pub fn write_into(&self, buffer: &mut [u8], buffer_width: usize, origin: (usize, usize)) {
        for (row, line) in self.pixels.chunks(self.size).enumerate() {
            let py = origin.1 + row;
            for (column, rgba) in line.iter().enumerate() {
                let px = origin.0 + column;
                if px >= buffer_width {
                    continue;
                }
                let start = 4 * (py * buffer_width + px);
                if let Some(target) = buffer.get_mut(start..start + 4) {
                    target.copy_from_slice(rgba);
                }
            }
        }
    }
}
