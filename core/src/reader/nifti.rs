use crate::error::{NeuroscanError, Result};
use crate::types::RawScan;
use ndarray::Axis;
use nifti::{IntoNdArray, NiftiHeader, NiftiObject, ReaderOptions};
use std::path::Path;

/// Reads a NIfTI volume and its voxel-to-world affine
///
/// Time-series volumes (4D fMRI acquisitions) are reduced to the first
/// timepoint; the normalization policy operates on a single 3D volume.
///
/// # Errors
///
/// Returns [`NeuroscanError::DecodeError`] if the file cannot be parsed as
/// NIfTI or holds fewer than two spatial dimensions.
pub fn read_nifti(path: &Path) -> Result<RawScan> {
    let obj = ReaderOptions::new().read_file(path)?;
    let affine = affine_from_header(obj.header());

    let mut data = obj.into_volume().into_ndarray::<f32>()?;

    // Drop trailing non-spatial axes, keeping the first index of each
    while data.ndim() > 3 {
        let last = Axis(data.ndim() - 1);
        data = data.index_axis_move(last, 0);
    }

    if data.ndim() < 2 {
        return Err(NeuroscanError::DecodeError(format!(
            "{}: volume has rank {}, expected 2 or 3",
            path.display(),
            data.ndim()
        )));
    }

    Ok(RawScan::with_affine(data, affine))
}

/// Builds the voxel-to-world affine from the NIfTI header
///
/// Uses the sform rows when the header declares them; otherwise falls back
/// to a diagonal scaling from the voxel dimensions.
fn affine_from_header(header: &NiftiHeader) -> [[f32; 4]; 4] {
    if header.sform_code > 0 {
        [
            header.srow_x,
            header.srow_y,
            header.srow_z,
            [0.0, 0.0, 0.0, 1.0],
        ]
    } else {
        let mut affine = [[0.0f32; 4]; 4];
        affine[0][0] = header.pixdim[1];
        affine[1][1] = header.pixdim[2];
        affine[2][2] = header.pixdim[3];
        affine[3][3] = 1.0;
        affine
    }
}
