//! Scan file readers
//!
//! Dispatches on file extension to produce a [`RawScan`] plus the matched
//! [`ScanFormat`]. Unrecognized extensions fall back to a volumetric read,
//! bounded by a clear [`NeuroscanError::UnsupportedFormat`] on failure.

pub mod dicom;
pub mod nifti;
pub mod raster;

pub use self::dicom::read_dicom;
pub use self::nifti::read_nifti;
pub use self::raster::read_raster;

use crate::error::{NeuroscanError, Result};
use crate::types::{RawScan, ScanFormat};
use log::debug;
use std::path::Path;

/// Extensions decoded as NIfTI volumes
pub const NIFTI_EXTENSIONS: &[&str] = &["nii", "nii.gz", "mgh"];

/// Extensions decoded as single-frame DICOM
pub const DICOM_EXTENSIONS: &[&str] = &["dcm"];

/// Extensions decoded as grayscale raster images
pub const RASTER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Reads a scan file, dispatching on its extension
///
/// # Algorithm
///
/// 1. Match the extension (case-insensitive, `.nii.gz` handled as one unit)
/// 2. NIfTI extensions read the full volume and its affine
/// 3. `.dcm` reads the pixel array of the first frame, no affine
/// 4. Raster extensions read a single-channel grayscale f32 image, no affine
/// 5. Anything else attempts a NIfTI read; if that fails the file is
///    reported as [`NeuroscanError::UnsupportedFormat`]
///
/// # Errors
///
/// Returns [`NeuroscanError::DecodeError`] when the matched decoder cannot
/// parse the file, [`NeuroscanError::UnsupportedFormat`] when no decoder
/// recognizes it.
pub fn read_scan(path: &Path) -> Result<(RawScan, ScanFormat)> {
    let ext = extension_of(path);

    match ext.as_deref() {
        Some(e) if NIFTI_EXTENSIONS.contains(&e) => {
            Ok((read_nifti(path)?, ScanFormat::Nifti))
        }
        Some(e) if DICOM_EXTENSIONS.contains(&e) => {
            Ok((read_dicom(path)?, ScanFormat::Dicom))
        }
        Some(e) if RASTER_EXTENSIONS.contains(&e) => {
            Ok((read_raster(path)?, ScanFormat::Raster))
        }
        _ => {
            // Unrecognized extension: attempt a volumetric read before
            // giving up. Arbitrary binary files end up here, so the
            // failure is reported as an unsupported format rather than a
            // decode error of a format the caller never asked for.
            debug!(
                "unrecognized extension for {}, attempting volumetric read",
                path.display()
            );
            match read_nifti(path) {
                Ok(raw) => Ok((raw, ScanFormat::Nifti)),
                Err(e) => Err(NeuroscanError::UnsupportedFormat(format!(
                    "{}: no reader recognized the file (volumetric fallback failed: {})",
                    path.display(),
                    e
                ))),
            }
        }
    }
}

/// Extracts the lowercase extension used for dispatch
///
/// `.nii.gz` is treated as a single compound extension; everything else
/// uses the final dot-separated component.
fn extension_of(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?.to_lowercase();
    if name.ends_with(".nii.gz") {
        return Some("nii.gz".to_string());
    }
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => Some(ext.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("scan.nii")), Some("nii".into()));
        assert_eq!(
            extension_of(Path::new("scan.nii.gz")),
            Some("nii.gz".into())
        );
        assert_eq!(
            extension_of(Path::new("SCAN.NII.GZ")),
            Some("nii.gz".into())
        );
        assert_eq!(extension_of(Path::new("slice.DCM")), Some("dcm".into()));
        assert_eq!(extension_of(Path::new("photo.JPeG")), Some("jpeg".into()));
        assert_eq!(extension_of(Path::new("no_extension")), None);
        assert_eq!(extension_of(Path::new(".hidden")), None);
    }

    #[test]
    fn test_read_scan_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("slice.png");

        let img = image::GrayImage::from_fn(32, 16, |x, y| image::Luma([(x + y) as u8]));
        img.save(&path).unwrap();

        let (raw, format) = read_scan(&path).unwrap();
        assert_eq!(format, ScanFormat::Raster);
        assert_eq!(raw.data.shape(), &[16, 32]);
        assert!(raw.affine.is_none());
    }

    #[test]
    fn test_read_scan_garbage_png_is_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.png");
        File::create(&path)
            .unwrap()
            .write_all(b"definitely not a png")
            .unwrap();

        let err = read_scan(&path).unwrap_err();
        assert!(matches!(err, NeuroscanError::DecodeError(_)));
    }

    #[test]
    fn test_read_scan_garbage_nifti_is_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.nii");
        File::create(&path)
            .unwrap()
            .write_all(b"not a nifti header")
            .unwrap();

        let err = read_scan(&path).unwrap_err();
        assert!(matches!(err, NeuroscanError::DecodeError(_)));
    }

    #[test]
    fn test_read_scan_unknown_extension_is_unsupported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blob.xyz");
        File::create(&path)
            .unwrap()
            .write_all(b"arbitrary binary content")
            .unwrap();

        let err = read_scan(&path).unwrap_err();
        assert!(matches!(err, NeuroscanError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_read_scan_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.png");

        assert!(read_scan(&path).is_err());
    }
}
