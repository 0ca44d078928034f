//! Command-line interface for batch generation from PNG sources

use crate::algorithm::executor::{Model, OutputConfig, RandomSelector};
use crate::analysis::alphabet::ExtractionMode;
use crate::analysis::patterns::SourceImage;
use crate::io::configuration::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT_SIZE, DEFAULT_SEED, DEFAULT_TILE_SIZE, OUTPUT_SUFFIX,
};
use crate::io::error::{AlgorithmError, Result, invalid_parameter, path_error};
use crate::io::image::{render_model_cropped, save_png};
use crate::io::progress::ProgressManager;
use crate::spatial::basis::Basis;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, warn};

/// Symbol granularity selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// One symbol per pixel color
    Pixel,
    /// Every pixel starts a wrapped tile
    Overlapping,
    /// The source is cut into disjoint tiles
    NonOverlapping,
}

/// Neighborhood selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BasisArg {
    /// Four axis-aligned neighbors
    Cardinal,
    /// Axis-aligned and diagonal neighbors
    Diagonal,
}

impl BasisArg {
    /// Corresponding direction table
    pub const fn basis(self) -> Basis {
        match self {
            Self::Cardinal => Basis::CARDINAL,
            Self::Diagonal => Basis::CARDINAL_WITH_DIAGONALS,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Synthesize patterns from a source image with wave function collapse"
)]
/// Command-line arguments for the pattern generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output width in pixels
    #[arg(short = 'w', long, default_value_t = DEFAULT_OUTPUT_SIZE)]
    pub width: usize,

    /// Output height in pixels (defaults to the width)
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// How the source is cut into symbols
    #[arg(short, long, value_enum, default_value_t = ModeArg::Pixel)]
    pub mode: ModeArg,

    /// Tile edge length for the tile modes
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: usize,

    /// Neighborhood used for adjacency
    #[arg(short, long, value_enum, default_value_t = BasisArg::Cardinal)]
    pub basis: BasisArg,

    /// Wrap constraints across the output edges
    #[arg(short, long)]
    pub periodic: bool,

    /// Treat the source as tileable when sampling adjacency
    #[arg(long)]
    pub periodic_source: bool,

    /// Attempts per file before giving up
    #[arg(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub attempts: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Most verbose level the log subscriber should emit
    pub const fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else if self.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        }
    }

    /// Output height in pixels
    pub fn output_height(&self) -> usize {
        self.height.unwrap_or(self.width)
    }
}

/// Model parameters resolved for one source image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Extraction mode with its final tile size
    pub mode: ExtractionMode,
    /// Neighborhood
    pub basis: Basis,
    /// Whether adjacency sampling wraps at the source edges
    pub source_periodic: bool,
    /// Output grid in cells
    pub output: OutputConfig,
    /// Requested image size in pixels; renders are cropped to it
    pub pixel_size: (usize, usize),
}

impl GenerationSettings {
    /// Resolve CLI arguments against a source of `source_width × source_height`
    ///
    /// The output cell count is the pixel size divided by the tile size,
    /// rounded up, and the render is cropped back to the pixel size. In non-overlapping mode the tile size shrinks until it
    /// divides both source dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the tile size or output size is zero.
    pub fn resolve(cli: &Cli, source_width: usize, source_height: usize) -> Result<Self> {
        if cli.tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &cli.tile_size,
                &"must be at least 1",
            ));
        }
        let mode = match cli.mode {
            ModeArg::Pixel => ExtractionMode::Pixel,
            ModeArg::Overlapping => ExtractionMode::Overlapping {
                tile_size: cli.tile_size,
            },
            ModeArg::NonOverlapping => {
                let mut tile_size = cli.tile_size;
                while source_width % tile_size != 0 || source_height % tile_size != 0 {
                    tile_size -= 1;
                }
                ExtractionMode::NonOverlapping { tile_size }
            }
        };

        let tile_size = mode.tile_size();
        let output = OutputConfig {
            width: cli.width.div_ceil(tile_size),
            height: cli.output_height().div_ceil(tile_size),
            periodic: cli.periodic,
        };
        if output.width == 0 || output.height == 0 {
            return Err(invalid_parameter(
                "output",
                &format!("{}x{}", cli.width, cli.output_height()),
                &"output must be at least one pixel",
            ));
        }

        Ok(Self {
            mode,
            basis: cli.basis.basis(),
            source_periodic: cli.periodic_source,
            output,
            pixel_size: (cli.width, cli.output_height()),
        })
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the target is invalid, a source cannot be
    /// loaded, every attempt for a source fails or an output cannot be
    /// written.
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            info!("nothing to process");
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_png(target) {
                if self.should_process_file(target) {
                    Ok(vec![target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(path_error(
                    target.clone(),
                    "collect",
                    "target file must be a PNG image",
                ))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            let entries = std::fs::read_dir(target).map_err(|e| AlgorithmError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            })?;
            for entry in entries {
                let path = entry?.path();
                if is_png(&path) && !is_generated(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(path_error(
                target.clone(),
                "collect",
                "target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = output_path_for(input_path);
        if output_path.exists() {
            info!(path = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let output_path = output_path_for(input_path);
        let max_attempts = self.cli.attempts;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, max_attempts);
        }

        let source = SourceImage::from_png_file(input_path)?;
        let settings = GenerationSettings::resolve(&self.cli, source.width(), source.height())?;
        debug!(path = %input_path.display(), ?settings, "resolved settings");

        let mut model = Model::from_source(
            &source,
            settings.mode,
            settings.basis,
            settings.source_periodic,
            settings.output,
        )?;
        let mut selector = RandomSelector::new(self.cli.seed);
        let mut rng = || selector.uniform();

        let mut succeeded = false;
        for attempt in 1..=max_attempts {
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_attempt(index, attempt);
            }
            if model.generate(&mut rng)? {
                succeeded = true;
                break;
            }
            warn!(
                path = %input_path.display(),
                attempt,
                max_attempts,
                "generation failed, retrying"
            );
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, succeeded);
        }

        if !succeeded {
            return Err(AlgorithmError::GenerationExhausted {
                attempts: max_attempts,
            });
        }

        let (width, height) = settings.pixel_size;
        save_png(&render_model_cropped(&model, width, height)?, &output_path)?;
        info!(path = %output_path.display(), "wrote result");
        Ok(())
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

fn is_generated(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}

/// Path of the generated image for `input_path`: `<stem>_result.<ext>`
pub fn output_path_for(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let extension = input_path.extension().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        extension.to_string_lossy()
    );

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}
