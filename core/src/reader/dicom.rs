use crate::error::{NeuroscanError, Result};
use crate::types::RawScan;
use dicom_object::open_file;
use dicom_pixeldata::PixelDecoder;
use log::debug;
use ndarray::Array2;
use std::path::Path;

/// Reads the pixel array of a single-frame DICOM file
///
/// Multi-frame objects keep only the first frame. Modality LUT rescaling
/// is applied by the decoder, so CT values arrive in Hounsfield units.
/// DICOM sources carry no affine here; spatial metadata beyond the pixel
/// grid is not used by the normalization policy.
///
/// # Errors
///
/// Returns [`NeuroscanError::DecodeError`] if the file is not valid DICOM
/// or its pixel data cannot be decoded.
pub fn read_dicom(path: &Path) -> Result<RawScan> {
    let obj = open_file(path)?;
    let decoded = obj.decode_pixel_data()?;

    let rows = decoded.rows() as usize;
    let columns = decoded.columns() as usize;
    if rows == 0 || columns == 0 {
        return Err(NeuroscanError::DecodeError(format!(
            "{}: empty pixel data",
            path.display()
        )));
    }

    let frames = decoded.number_of_frames() as usize;
    if frames > 1 {
        debug!(
            "{}: {} frames present, keeping the first",
            path.display(),
            frames
        );
    }

    let values = decoded.to_vec::<f32>()?;
    let plane = rows * columns;
    if values.len() < plane {
        return Err(NeuroscanError::DecodeError(format!(
            "{}: pixel data holds {} values, expected at least {}",
            path.display(),
            values.len(),
            plane
        )));
    }

    let data = Array2::from_shape_vec((rows, columns), values[..plane].to_vec())
        .map_err(|e| NeuroscanError::DecodeError(format!("{}: {}", path.display(), e)))?;

    Ok(RawScan::new(data.into_dyn()))
}
