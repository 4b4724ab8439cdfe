use crate::types::Modality;
use ndarray::ArrayD;

/// A decoded scan before normalization
///
/// Holds the raw numeric array (2D or 3D) and, for formats that carry one,
/// the spatial affine transform mapping voxel indices to scanner space.
#[derive(Debug, Clone)]
pub struct RawScan {
    /// Raw intensity values as read from the file
    pub data: ArrayD<f32>,

    /// Voxel-to-world affine, present only for volumetric sources
    pub affine: Option<[[f32; 4]; 4]>,
}

impl RawScan {
    /// Creates a raw scan without spatial metadata
    pub fn new(data: ArrayD<f32>) -> Self {
        Self { data, affine: None }
    }

    /// Creates a raw scan with a voxel-to-world affine
    pub fn with_affine(data: ArrayD<f32>, affine: [[f32; 4]; 4]) -> Self {
        Self {
            data,
            affine: Some(affine),
        }
    }
}

/// Immutable bookkeeping record produced once per scan
///
/// `original_shape` is the array shape after sanitization and axis
/// promotion but before resampling, so callers can audit the source
/// resolution that produced a tensor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ScanInfo {
    /// Shape of the scan before resampling to the modality target
    pub original_shape: Vec<usize>,

    /// Modality the normalization policy was selected for
    pub modality: Modality,
}

/// Fixed-shape, channel-first array consumed by the classifier
///
/// The shape is deterministic per modality: `(1, 160, 160, 160)` for
/// MRI/fMRI, `(1, 128, 128, 128)` for PET/CT and `(1, 224, 224)` for the
/// 2D fallback. The leading axis is the channel axis, not a batch axis;
/// the classifier inserts the batch axis itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanTensor {
    pub data: ArrayD<f32>,
}

impl ScanTensor {
    /// Wraps a channel-first array
    pub fn new(data: ArrayD<f32>) -> Self {
        Self { data }
    }

    /// Returns the tensor shape including the channel axis
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Returns the tensor rank including the channel axis
    pub fn rank(&self) -> usize {
        self.data.ndim()
    }
}
