//! PNG export of generated patterns

use crate::algorithm::executor::Model;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use image::{RgbaImage, imageops};
use std::path::Path;

/// Render the last successful generation into an image
///
/// # Errors
///
/// Returns an error if:
/// - The model has not completed a generation
/// - The output is too large for image dimensions
pub fn render_model(model: &Model) -> Result<RgbaImage> {
    let (width, height) = model.output_dimensions();
    let mut buffer = vec![0u8; width * height * 4];
    model.put_generated_data(&mut buffer)?;

    let width_u32 = u32::try_from(width)
        .map_err(|e| invalid_parameter("width", &width, &e))?;
    let height_u32 = u32::try_from(height)
        .map_err(|e| invalid_parameter("height", &height, &e))?;
    RgbaImage::from_raw(width_u32, height_u32, buffer).ok_or_else(|| {
        invalid_parameter(
            "buffer",
            &(width * height * 4),
            &"does not match the output dimensions",
        )
    })
}

/// Render the last successful generation, keeping only the top-left
/// `width × height` pixels
///
/// Tile outputs cover whole cells and can overshoot a requested pixel size;
/// this trims them back. A crop larger than the render is clamped to it.
///
/// # Errors
///
/// Returns an error if the model has not completed a generation or the
/// crop size does not fit image dimensions.
pub fn render_model_cropped(model: &Model, width: usize, height: usize) -> Result<RgbaImage> {
    let img = render_model(model)?;
    let width_u32 = u32::try_from(width)
        .map_err(|e| invalid_parameter("width", &width, &e))?;
    let height_u32 = u32::try_from(height)
        .map_err(|e| invalid_parameter("height", &height, &e))?;
    if width_u32 >= img.width() && height_u32 >= img.height() {
        return Ok(img);
    }
    Ok(imageops::crop_imm(&img, 0, 0, width_u32, height_u32).to_image())
}

/// Render the last successful generation and save it as a PNG
///
/// # Errors
///
/// Returns an error if:
/// - The model has not completed a generation
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_model_as_png<P: AsRef<Path>>(model: &Model, output_path: P) -> Result<()> {
    save_png(&render_model(model)?, output_path)
}

/// Save an image as a PNG, creating missing parent directories
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image
/// cannot be written.
pub fn save_png<P: AsRef<Path>>(img: &RgbaImage, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
