//! Source image acquisition and wrapped pixel access

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::wrap_axis;
use crate::spatial::tiles::{Rgba, TileBlock};
use ndarray::Array2;
use std::path::Path;

/// Owned RGBA8 source pattern, indexed `(row, column)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    pixels: Array2<Rgba>,
}

impl SourceImage {
    /// Build from a row-major RGBA8 buffer of `width * height * 4` bytes
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the buffer length does
    /// not match the dimensions.
    pub fn from_rgba_buffer(width: usize, height: usize, data: &[u8]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AlgorithmError::InvalidSourceData {
                reason: format!("source must have at least one pixel, got {width}x{height}"),
            });
        }
        let expected = width * height * 4;
        if data.len() != expected {
            return Err(AlgorithmError::InvalidSourceData {
                reason: format!(
                    "buffer holds {} bytes but a {width}x{height} RGBA image needs {expected}",
                    data.len()
                ),
            });
        }

        let pixels: Vec<Rgba> = data
            .chunks_exact(4)
            .map(|chunk| Rgba::try_from(chunk).unwrap_or([0; 4]))
            .collect();
        let pixels = Array2::from_shape_vec((height, width), pixels).map_err(|e| {
            AlgorithmError::InvalidSourceData {
                reason: e.to_string(),
            }
        })?;
        Ok(Self { pixels })
    }

    /// Build from an `(row, column)` array of pixels
    ///
    /// # Errors
    ///
    /// Returns an error if the array is empty.
    pub fn from_array(pixels: Array2<Rgba>) -> Result<Self> {
        if pixels.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "source must have at least one pixel".to_string(),
            });
        }
        Ok(Self { pixels })
    }

    /// Load a PNG (or any format `image` decodes) as RGBA8
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or decoded
    /// - The decoded image has no pixels
    pub fn from_png_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| AlgorithmError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        let rgba_img = img.to_rgba8();
        let (width, height) = (rgba_img.width() as usize, rgba_img.height() as usize);
        Self::from_rgba_buffer(width, height, rgba_img.as_raw())
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Underlying pixel array
    pub const fn pixels(&self) -> &Array2<Rgba> {
        &self.pixels
    }

    /// Pixel at `(x, y)`, wrapping both coordinates modulo the image size
    pub fn pixel_wrapped(&self, x: usize, y: usize) -> Rgba {
        let wx = wrap_axis(x as i64, self.width(), true).unwrap_or(0);
        let wy = wrap_axis(y as i64, self.height(), true).unwrap_or(0);
        self.pixels.get((wy, wx)).copied().unwrap_or([0, 0, 0, 0])
    }

    /// The `size × size` block whose top-left pixel is `(x, y)`
    ///
    /// Reads past the right or bottom edge wrap, so every pixel is a valid
    /// origin.
    pub fn block_wrapped(&self, x: usize, y: usize, size: usize) -> TileBlock {
        let mut pixels = Vec::with_capacity(size * size);
        for dy in 0..size {
            for dx in 0..size {
                pixels.push(self.pixel_wrapped(x + dx, y + dy));
            }
        }
        TileBlock::new(size, pixels).unwrap_or_else(|| TileBlock::single(self.pixel_wrapped(x, y)))
    }
}
