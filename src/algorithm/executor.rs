//! Generation driver tying an alphabet to an output grid
//!
//! `Model` owns the alphabet and a lazily allocated [`Wave`]. Every call to
//! [`Model::generate`] clears the wave and runs observe/propagate until the
//! attempt succeeds or hits a contradiction; allocations are reused between
//! attempts.

use crate::algorithm::wave::{IterationResult, Wave};
use crate::analysis::alphabet::{Alphabet, ExtractionMode};
use crate::analysis::patterns::SourceImage;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{AlgorithmError, Result, computation_error, invalid_parameter};
use crate::spatial::basis::Basis;
use crate::spatial::grid::GridGeometry;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, warn};

/// Output grid parameters, in cells
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    /// Columns of cells
    pub width: usize,
    /// Rows of cells
    pub height: usize,
    /// Whether constraints wrap across the output edges
    pub periodic: bool,
}

impl OutputConfig {
    fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION} cells"),
                ));
            }
        }
        Ok(())
    }

    const fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.width, self.height, self.periodic)
    }
}

/// Seeded source of uniform draws in `[0, 1)`
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Next uniform draw
    pub fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// A solver bound to one alphabet and one output grid
pub struct Model {
    alphabet: Alphabet,
    output: OutputConfig,
    wave: Option<Wave>,
    generation_complete: bool,
}

impl Model {
    /// Bind an alphabet to an output grid
    ///
    /// Nothing heavy is allocated until the first generation.
    ///
    /// # Errors
    ///
    /// Returns an error if either output dimension is zero or exceeds
    /// `MAX_GRID_DIMENSION`.
    pub fn new(alphabet: Alphabet, output: OutputConfig) -> Result<Self> {
        output.validate()?;
        Ok(Self {
            alphabet,
            output,
            wave: None,
            generation_complete: false,
        })
    }

    /// Extract an alphabet from `source` and bind it to an output grid
    ///
    /// # Errors
    ///
    /// Returns an error if extraction fails or the output is invalid.
    pub fn from_source(
        source: &SourceImage,
        mode: ExtractionMode,
        basis: Basis,
        source_periodic: bool,
        output: OutputConfig,
    ) -> Result<Self> {
        let alphabet = Alphabet::extract(source, mode, basis, source_periodic)?;
        Self::new(alphabet, output)
    }

    /// Allocate the wave if it does not exist yet
    ///
    /// A freshly allocated wave is cleared so it can be iterated directly.
    ///
    /// # Errors
    ///
    /// Returns an error if a symbol weight has no finite log-weight.
    pub fn initialize(&mut self) -> Result<&mut Wave> {
        if self.wave.is_none() {
            let mut wave = Wave::new(
                self.output.geometry(),
                self.alphabet.basis(),
                self.alphabet.weights(),
                self.alphabet.propagator(),
            )?;
            wave.clear();
            self.wave = Some(wave);
        }
        self.wave
            .as_mut()
            .ok_or_else(|| computation_error("initialize", &"wave allocation missing"))
    }

    /// Reset the wave for a new attempt
    ///
    /// # Errors
    ///
    /// Returns an error if the wave cannot be initialized.
    pub fn clear(&mut self) -> Result<()> {
        self.initialize()?.clear();
        self.generation_complete = false;
        debug!("cleared wave");
        Ok(())
    }

    /// Run one observe step, followed by propagation if work remains
    ///
    /// # Errors
    ///
    /// Returns an error if the wave cannot be initialized.
    pub fn iterate<R>(&mut self, rng: &mut R) -> Result<IterationResult>
    where
        R: FnMut() -> f64,
    {
        self.initialize()?;
        let wave = self
            .wave
            .as_mut()
            .ok_or_else(|| computation_error("iterate", &"wave allocation missing"))?;
        let result = wave.observe(rng);
        if result != IterationResult::Ongoing {
            self.generation_complete = result == IterationResult::Success;
            return Ok(result);
        }
        wave.propagate(self.alphabet.propagator());
        Ok(IterationResult::Ongoing)
    }

    /// Run one complete attempt from a cleared wave
    ///
    /// Returns `Ok(false)` on contradiction; the caller may simply call again.
    ///
    /// # Errors
    ///
    /// Returns an error if the wave cannot be initialized.
    pub fn generate<R>(&mut self, rng: &mut R) -> Result<bool>
    where
        R: FnMut() -> f64,
    {
        self.clear()?;
        if let Some(wave) = self.wave.as_mut() {
            wave.ban_unsupported();
            wave.propagate(self.alphabet.propagator());
        }

        let mut iterations = 0usize;
        loop {
            let result = self.iterate(rng)?;
            if result != IterationResult::Ongoing {
                debug!(?result, iterations, "generation finished");
                return Ok(result == IterationResult::Success);
            }
            iterations += 1;
        }
    }

    /// Call [`Model::generate`] until it succeeds or `max_attempts` run out
    ///
    /// Returns the number of attempts used on success.
    ///
    /// # Errors
    ///
    /// Returns an error if the wave cannot be initialized.
    pub fn generate_with_retries<R>(
        &mut self,
        rng: &mut R,
        max_attempts: usize,
    ) -> Result<Option<usize>>
    where
        R: FnMut() -> f64,
    {
        for attempt in 1..=max_attempts {
            if self.generate(rng)? {
                return Ok(Some(attempt));
            }
            warn!(attempt, max_attempts, "generation failed, retrying");
        }
        Ok(None)
    }

    /// Whether the last attempt ended in success
    pub const fn is_generation_complete(&self) -> bool {
        self.generation_complete
    }

    /// Symbol per cell from the last successful attempt
    pub fn observed(&self) -> Option<&[usize]> {
        if !self.generation_complete {
            return None;
        }
        self.wave.as_ref().and_then(Wave::observed)
    }

    /// Solver state, if allocated
    pub const fn wave(&self) -> Option<&Wave> {
        self.wave.as_ref()
    }

    /// The alphabet being solved over
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Output grid parameters
    pub const fn output(&self) -> OutputConfig {
        self.output
    }

    /// Output size in pixels: cells scaled by the tile size
    pub const fn output_dimensions(&self) -> (usize, usize) {
        let tile_size = self.alphabet.tile_size();
        (self.output.width * tile_size, self.output.height * tile_size)
    }

    /// Write the generated pattern into a row-major RGBA8 buffer
    ///
    /// Each cell's payload block is expanded into its `tile_size` square.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No attempt has succeeded since the last clear
    /// - The buffer is smaller than `output_dimensions()` pixels
    /// - An observed symbol has no payload
    pub fn put_generated_data(&self, buffer: &mut [u8]) -> Result<()> {
        let observed = self.observed().ok_or(AlgorithmError::GenerationIncomplete)?;
        let (pixel_width, pixel_height) = self.output_dimensions();
        let needed = pixel_width * pixel_height * 4;
        if buffer.len() < needed {
            return Err(invalid_parameter(
                "buffer",
                &buffer.len(),
                &format!("needs {needed} bytes for {pixel_width}x{pixel_height} RGBA"),
            ));
        }

        let geometry = self.output.geometry();
        let tile_size = self.alphabet.tile_size();
        for (cell, &symbol) in observed.iter().enumerate() {
            let payload =
                self.alphabet
                    .payload(symbol)
                    .ok_or(AlgorithmError::InvalidSymbolIndex {
                        index: symbol,
                        num_symbols: self.alphabet.num_symbols(),
                    })?;
            let (x, y) = geometry.coordinates(cell);
            payload.write_into(buffer, pixel_width, (x * tile_size, y * tile_size));
        }
        Ok(())
    }
}
