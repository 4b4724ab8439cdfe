use crate::error::{NeuroscanError, Result};
use crate::types::RawScan;
use ndarray::Array2;
use std::path::Path;

/// Reads a raster image as a single-channel grayscale f32 array
///
/// Color images are converted to luminance. The array is row-major
/// (height, width), matching the volumetric readers' axis order.
///
/// # Errors
///
/// Returns [`NeuroscanError::DecodeError`] if the file cannot be decoded
/// or decodes to an empty image.
pub fn read_raster(path: &Path) -> Result<RawScan> {
    let img = image::open(path)?;
    let gray = img.to_luma32f();

    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Err(NeuroscanError::DecodeError(
            "not a readable image".to_string(),
        ));
    }

    let data = Array2::from_shape_vec((height as usize, width as usize), gray.into_raw())
        .map_err(|e| NeuroscanError::DecodeError(format!("{}: {}", path.display(), e)))?;

    Ok(RawScan::new(data.into_dyn()))
}
