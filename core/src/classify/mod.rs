//! Tensor classification
//!
//! Wraps an [`InferenceBackend`] selected once at startup and turns its
//! probability distribution into a [`Prediction`]. The only reshaping
//! performed here is the insertion of a single leading batch axis; any
//! other rank discrepancy is a contract violation reported as
//! [`NeuroscanError::ShapeMismatch`].

pub mod backend;

pub use backend::{
    InferenceBackend, ModelBackend, PlaceholderBackend, MODEL_LABELS, PLACEHOLDER_LABELS,
};

use crate::error::{NeuroscanError, Result};
use crate::types::{Modality, ScanTensor};
use ndarray::{ArrayD, ArrayViewD, Axis};
use std::path::Path;

/// Classification output, produced fresh per call
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Prediction {
    /// Label names in output-channel order
    pub labels: Vec<&'static str>,

    /// Probability per label, summing to 1 within numerical tolerance
    pub probabilities: Vec<f32>,

    /// Label with the highest probability
    pub top_label: &'static str,

    /// Probability of the top label
    pub confidence: f32,
}

/// Classifier over a fixed inference backend
pub struct Classifier {
    backend: Box<dyn InferenceBackend>,
}

impl Classifier {
    /// Creates a classifier over the demo placeholder backend
    pub fn placeholder() -> Self {
        Self {
            backend: Box::new(PlaceholderBackend::new()),
        }
    }

    /// Creates a classifier over a loaded model checkpoint
    pub fn from_model_file(path: &Path) -> Result<Self> {
        Ok(Self {
            backend: Box::new(ModelBackend::load(path)?),
        })
    }

    /// Creates a classifier over an arbitrary backend
    ///
    /// This is the seam tests use to substitute a deterministic fake.
    pub fn with_backend(backend: Box<dyn InferenceBackend>) -> Self {
        Self { backend }
    }

    /// Label set of the underlying backend
    pub fn labels(&self) -> &'static [&'static str] {
        self.backend.labels()
    }

    /// Classifies a normalized tensor
    ///
    /// The expected unbatched rank is the modality's target rank plus the
    /// channel axis. A tensor of exactly that rank gets a leading batch
    /// axis of size 1; a tensor already carrying a batch axis passes
    /// through unchanged, so the insertion never double-applies.
    ///
    /// # Errors
    ///
    /// Returns [`NeuroscanError::ShapeMismatch`] for any other rank.
    pub fn classify(&self, tensor: &ScanTensor, modality: Modality) -> Result<Prediction> {
        let unbatched_rank = modality.target_shape().len() + 1;
        let batched = ensure_batch_axis(&tensor.data, unbatched_rank)?;

        let probabilities = self.backend.probabilities(batched)?;
        let labels = self.backend.labels();

        let (top_idx, confidence) = probabilities
            .iter()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |(bi, bv), (i, &v)| {
                if v > bv {
                    (i, v)
                } else {
                    (bi, bv)
                }
            });

        Ok(Prediction {
            labels: labels.to_vec(),
            probabilities,
            top_label: labels[top_idx],
            confidence,
        })
    }
}

/// Inserts a leading batch axis of size 1 when absent
///
/// Returns a view into the caller's data; no tensor copy is made in
/// either branch.
fn ensure_batch_axis(data: &ArrayD<f32>, unbatched_rank: usize) -> Result<ArrayViewD<'_, f32>> {
    let rank = data.ndim();
    if rank == unbatched_rank {
        Ok(data.view().insert_axis(Axis(0)))
    } else if rank == unbatched_rank + 1 {
        Ok(data.view())
    } else {
        Err(NeuroscanError::ShapeMismatch {
            expected: unbatched_rank,
            actual: rank,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array4, Array5};

    /// Deterministic backend for exercising the classifier contract
    struct FakeBackend {
        probs: Vec<f32>,
    }

    impl InferenceBackend for FakeBackend {
        fn labels(&self) -> &'static [&'static str] {
            PLACEHOLDER_LABELS
        }

        fn probabilities(&self, _batched: ArrayViewD<'_, f32>) -> Result<Vec<f32>> {
            Ok(self.probs.clone())
        }
    }

    fn fake(probs: Vec<f32>) -> Classifier {
        Classifier::with_backend(Box::new(FakeBackend { probs }))
    }

    fn mri_tensor() -> ScanTensor {
        ScanTensor::new(Array4::<f32>::zeros((1, 4, 4, 4)).into_dyn())
    }

    #[test]
    fn test_classify_top_label_and_confidence() {
        let classifier = fake(vec![0.2, 0.3, 0.5]);
        let prediction = classifier.classify(&mri_tensor(), Modality::Mri).unwrap();

        assert_eq!(prediction.top_label, "NoNeurodegenerativeSignal");
        assert!((prediction.confidence - 0.5).abs() < 1e-6);
        assert_eq!(prediction.labels.len(), 3);
        assert_eq!(prediction.probabilities, vec![0.2, 0.3, 0.5]);
    }

    #[test]
    fn test_batch_axis_insertion_is_idempotent() {
        let classifier = fake(vec![0.6, 0.3, 0.1]);

        let unbatched = mri_tensor();
        let batched = ScanTensor::new(Array5::<f32>::zeros((1, 1, 4, 4, 4)).into_dyn());

        let from_unbatched = classifier.classify(&unbatched, Modality::Mri).unwrap();
        let from_batched = classifier.classify(&batched, Modality::Mri).unwrap();

        assert_eq!(from_unbatched, from_batched);
    }

    #[test]
    fn test_batch_axis_returns_view_without_copy() {
        let data = Array4::<f32>::zeros((1, 4, 4, 4)).into_dyn();

        let inserted = ensure_batch_axis(&data, 4).unwrap();
        assert_eq!(inserted.ndim(), 5);
        assert_eq!(inserted.as_ptr(), data.as_ptr());

        let passthrough = ensure_batch_axis(&data, 3).unwrap();
        assert_eq!(passthrough.ndim(), 4);
        assert_eq!(passthrough.as_ptr(), data.as_ptr());
    }

    #[test]
    fn test_classify_rejects_invalid_rank() {
        let classifier = fake(vec![0.5, 0.3, 0.2]);
        let flat = ScanTensor::new(Array2::<f32>::zeros((4, 4)).into_dyn());

        let err = classifier.classify(&flat, Modality::Mri).unwrap_err();
        match err {
            NeuroscanError::ShapeMismatch { expected, actual } => {
                assert_eq!(expected, 4);
                assert_eq!(actual, 2);
            }
            other => panic!("expected ShapeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_fallback_modality_ranks() {
        let classifier = fake(vec![0.1, 0.1, 0.8]);
        let image = ScanTensor::new(ndarray::Array3::<f32>::zeros((1, 8, 8)).into_dyn());

        // rank 3 is unbatched for the 2D fallback
        assert!(classifier.classify(&image, Modality::Unknown).is_ok());
        // but underbatched for a volumetric modality
        assert!(classifier.classify(&image, Modality::Pet).is_err());
    }

    #[test]
    fn test_placeholder_distribution_properties() {
        let classifier = Classifier::placeholder();
        let tensor = mri_tensor();

        for _ in 0..1000 {
            let prediction = classifier.classify(&tensor, Modality::Mri).unwrap();
            let sum: f32 = prediction.probabilities.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6);
            assert!(prediction.probabilities.iter().all(|p| *p >= 0.0));
            assert!((0.0..=1.0).contains(&prediction.confidence));
        }
    }
}
