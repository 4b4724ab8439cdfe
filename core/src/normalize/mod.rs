//! Modality-specific normalization
//!
//! Turns a [`RawScan`] into the fixed-shape tensor the classifier expects.
//! The policy per modality is deterministic and carries no randomness:
//!
//! | Modality | Statistic | Target | Resampling |
//! |---|---|---|---|
//! | MRI/fMRI | z-score | 160x160x160 | trilinear, anti-aliased |
//! | PET | z-score | 128x128x128 | trilinear |
//! | CT | z-score after [-1000, 1000] windowing | 128x128x128 | trilinear |
//! | Unknown | z-score after resize | 224x224 | bilinear, 2D only |

pub mod resample;

use crate::types::{Modality, RawScan, ScanInfo, ScanTensor};
use ndarray::{ArrayD, Axis, Ix2, Ix3};

/// Denominator guard for z-score normalization
pub const EPSILON: f32 = 1e-8;

/// Hounsfield-unit window applied to CT intensities before statistics
pub const CT_WINDOW: (f32, f32) = (-1000.0, 1000.0);

/// Normalizes a raw scan for the given modality
///
/// Non-finite values are replaced with 0 before any statistics are
/// computed. Volumetric modalities promote 2D inputs to 3D with a leading
/// singleton axis; the 2D fallback reduces 3D inputs to their middle
/// slice. A channel axis of size 1 is prepended to the final array.
///
/// `ScanInfo.original_shape` records the shape after sanitization and
/// axis promotion but before resampling. Malformed content beyond the
/// stated sanitization is the reader's responsibility to have excluded.
pub fn normalize(raw: RawScan, modality: Modality) -> (ScanTensor, ScanInfo) {
    let mut data = raw.data;
    sanitize(&mut data);

    let (resampled, original_shape) = match modality {
        Modality::Mri | Modality::Fmri | Modality::Pet | Modality::Ct => {
            if modality == Modality::Ct {
                let (lo, hi) = CT_WINDOW;
                data.mapv_inplace(|v| v.clamp(lo, hi));
            }
            if data.ndim() == 2 {
                data = data.insert_axis(Axis(0));
            }
            let original_shape = data.shape().to_vec();

            let data = zscore(data);
            let volume = data
                .into_dimensionality::<Ix3>()
                .expect("volumetric input is rank 3 after promotion");

            let t = modality.target_shape();
            let antialias = matches!(modality, Modality::Mri | Modality::Fmri);
            let resized = resample::resize3d(volume.view(), (t[0], t[1], t[2]), antialias);
            (resized.into_dyn(), original_shape)
        }
        Modality::Unknown => {
            if data.ndim() == 3 {
                let mid = data.len_of(Axis(0)) / 2;
                data = data.index_axis_move(Axis(0), mid);
            }
            let original_shape = data.shape().to_vec();

            let image = data
                .into_dimensionality::<Ix2>()
                .expect("fallback input is rank 2 after reduction");

            let t = modality.target_shape();
            let resized = resample::resize2d(image.view(), (t[0], t[1]));
            (zscore(resized.into_dyn()), original_shape)
        }
    };

    let tensor = ScanTensor::new(resampled.insert_axis(Axis(0)));
    let info = ScanInfo {
        original_shape,
        modality,
    };
    (tensor, info)
}

/// Replaces non-finite values with 0 in place
fn sanitize(data: &mut ArrayD<f32>) {
    data.mapv_inplace(|v| if v.is_finite() { v } else { 0.0 });
}

/// Z-score normalization: `(x - mean(x)) / (std(x) + 1e-8)`
fn zscore(mut data: ArrayD<f32>) -> ArrayD<f32> {
    let mean = data.mean().unwrap_or(0.0);
    let std = data.std(0.0);
    data.mapv_inplace(|v| (v - mean) / (std + EPSILON));
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3};
    use rstest::rstest;

    fn volume(shape: (usize, usize, usize)) -> RawScan {
        let data = Array3::from_shape_fn(shape, |(z, y, x)| (z * 7 + y * 3 + x) as f32);
        RawScan::new(data.into_dyn())
    }

    fn image(shape: (usize, usize)) -> RawScan {
        let data = Array2::from_shape_fn(shape, |(y, x)| (y * 5 + x) as f32);
        RawScan::new(data.into_dyn())
    }

    #[rstest]
    #[case(Modality::Mri, (64, 64, 64))]
    #[case(Modality::Mri, (32, 48, 60))]
    #[case(Modality::Mri, (176, 168, 164))]
    #[case(Modality::Fmri, (40, 40, 52))]
    #[case(Modality::Fmri, (64, 64, 64))]
    #[case(Modality::Fmri, (80, 96, 88))]
    #[case(Modality::Pet, (64, 64, 64))]
    #[case(Modality::Pet, (100, 80, 90))]
    #[case(Modality::Pet, (130, 140, 132))]
    #[case(Modality::Ct, (64, 64, 64))]
    #[case(Modality::Ct, (90, 110, 70))]
    #[case(Modality::Ct, (128, 128, 128))]
    fn test_volumetric_target_shape(
        #[case] modality: Modality,
        #[case] shape: (usize, usize, usize),
    ) {
        let (tensor, info) = normalize(volume(shape), modality);

        let t = modality.target_shape();
        assert_eq!(tensor.shape(), &[1, t[0], t[1], t[2]]);
        assert_eq!(info.original_shape, vec![shape.0, shape.1, shape.2]);
        assert_eq!(info.modality, modality);
    }

    #[rstest]
    #[case((300, 200))]
    #[case((100, 100))]
    #[case((224, 224))]
    fn test_fallback_target_shape(#[case] shape: (usize, usize)) {
        let (tensor, info) = normalize(image(shape), Modality::Unknown);

        assert_eq!(tensor.shape(), &[1, 224, 224]);
        assert_eq!(info.original_shape, vec![shape.0, shape.1]);
    }

    #[test]
    fn test_mri_happy_path() {
        let (tensor, info) = normalize(volume((64, 64, 64)), Modality::Mri);

        assert_eq!(tensor.shape(), &[1, 160, 160, 160]);
        assert_eq!(info.original_shape, vec![64, 64, 64]);
        assert_eq!(info.modality, Modality::Mri);
    }

    #[test]
    fn test_mri_2d_promotion() {
        let (tensor, info) = normalize(image((64, 64)), Modality::Mri);

        assert_eq!(tensor.shape(), &[1, 160, 160, 160]);
        assert_eq!(info.original_shape, vec![1, 64, 64]);
    }

    #[test]
    fn test_fallback_3d_reduces_to_middle_slice() {
        let mut data = Array3::<f32>::zeros((9, 40, 60));
        data.index_axis_mut(Axis(0), 4).fill(7.0);
        let (tensor, info) = normalize(RawScan::new(data.into_dyn()), Modality::Unknown);

        assert_eq!(tensor.shape(), &[1, 224, 224]);
        assert_eq!(info.original_shape, vec![40, 60]);
    }

    #[test]
    fn test_non_finite_values_sanitized() {
        let mut data = Array3::from_elem((16, 16, 16), 1.0f32);
        data[[0, 0, 0]] = f32::NAN;
        data[[1, 1, 1]] = f32::INFINITY;
        data[[2, 2, 2]] = f32::NEG_INFINITY;

        for modality in [Modality::Mri, Modality::Pet, Modality::Ct, Modality::Unknown] {
            let (tensor, _) = normalize(RawScan::new(data.clone().into_dyn()), modality);
            assert!(
                tensor.data.iter().all(|v| v.is_finite()),
                "non-finite value survived {} normalization",
                modality
            );
        }
    }

    #[test]
    fn test_ct_statistics_computed_post_clip() {
        // values far outside the Hounsfield window
        let extreme = Array3::from_shape_fn((24, 24, 24), |(z, y, x)| {
            -2000.0 + (z * 576 + y * 24 + x) as f32 * (5000.0 / 13824.0)
        });
        let clipped = extreme.mapv(|v| v.clamp(-1000.0, 1000.0));

        let (from_extreme, _) = normalize(RawScan::new(extreme.into_dyn()), Modality::Ct);
        let (from_clipped, _) = normalize(RawScan::new(clipped.into_dyn()), Modality::Ct);

        assert_eq!(from_extreme, from_clipped);
    }

    #[test]
    fn test_constant_volume_normalizes_to_zero() {
        // std is zero, so the epsilon guard maps everything to 0
        let data = Array3::from_elem((20, 20, 20), 42.0f32);
        let (tensor, _) = normalize(RawScan::new(data.into_dyn()), Modality::Pet);

        for v in tensor.data.iter() {
            assert!(v.abs() < 1e-3);
        }
    }

    #[test]
    fn test_zscore_centers_values() {
        let data = Array3::from_shape_fn((32, 32, 32), |(z, y, x)| (z + y + x) as f32);
        let normalized = zscore(data.into_dyn());

        let mean = normalized.mean().unwrap();
        assert!(mean.abs() < 1e-4);
        let std = normalized.std(0.0);
        assert!((std - 1.0).abs() < 1e-3);
    }
}
