use crate::classify::{Classifier, InferenceBackend};
use crate::error::Result;
use crate::normalize;
use crate::reader;
use crate::treatment::{self, ReferenceData, ResultRecord};
use crate::types::{Modality, ScanInfo, ScanTensor};
use log::debug;
use std::collections::HashMap;
use std::path::Path;

/// Scan-to-result pipeline
///
/// Holds the inference backend and the immutable treatment reference
/// data, both selected once at construction. Each invocation is
/// stateless: one file is read, one array transformed, one inference
/// run, one record returned. Instances share no mutable state, so a
/// single pipeline may serve independent calls from multiple threads
/// without locking.
///
/// # Example
///
/// ```no_run
/// use neuroscan_core::ScanPipeline;
/// use std::collections::HashMap;
/// use std::path::Path;
///
/// let pipeline = ScanPipeline::placeholder();
/// let (tensor, info) = pipeline
///     .preprocess(Path::new("scan.nii.gz"), "MRI", &HashMap::new())
///     .unwrap();
/// let record = pipeline.predict(&tensor, "MRI", &info).unwrap();
/// println!("{} ({:.1}%)", record.top_label, record.confidence * 100.0);
/// ```
pub struct ScanPipeline {
    classifier: Classifier,
    reference: ReferenceData,
}

impl ScanPipeline {
    /// Pipeline over the demo placeholder backend
    ///
    /// Placeholder predictions are random draws; use only when no trained
    /// checkpoint is available.
    pub fn placeholder() -> Self {
        Self {
            classifier: Classifier::placeholder(),
            reference: ReferenceData::builtin(),
        }
    }

    /// Pipeline over a model checkpoint loaded from `path`
    ///
    /// # Errors
    ///
    /// Returns [`crate::NeuroscanError::ModelError`] if the checkpoint
    /// cannot be loaded.
    pub fn with_model(path: &Path) -> Result<Self> {
        Ok(Self {
            classifier: Classifier::from_model_file(path)?,
            reference: ReferenceData::builtin(),
        })
    }

    /// Pipeline over an arbitrary backend (test seam)
    pub fn with_backend(backend: Box<dyn InferenceBackend>) -> Self {
        Self {
            classifier: Classifier::with_backend(backend),
            reference: ReferenceData::builtin(),
        }
    }

    /// Reads and normalizes a scan file
    ///
    /// `modality` is parsed leniently; unrecognized values select the 2D
    /// fallback policy. `meta` is accepted for forward compatibility with
    /// per-scan overrides and is currently unused by the normalization
    /// policy.
    ///
    /// # Errors
    ///
    /// Returns [`crate::NeuroscanError::UnsupportedFormat`] or
    /// [`crate::NeuroscanError::DecodeError`] on bad input.
    pub fn preprocess(
        &self,
        path: &Path,
        modality: &str,
        meta: &HashMap<String, String>,
    ) -> Result<(ScanTensor, ScanInfo)> {
        let modality = Modality::from_str(modality);
        if !meta.is_empty() {
            debug!(
                "ignoring {} per-scan override(s); not yet supported",
                meta.len()
            );
        }

        let (raw, format) = reader::read_scan(path)?;
        debug!(
            "decoded {} as {} with shape {:?}",
            path.display(),
            format,
            raw.data.shape()
        );

        Ok(normalize::normalize(raw, modality))
    }

    /// Classifies a normalized tensor and assembles the result record
    ///
    /// Never fails for tensors produced by [`ScanPipeline::preprocess`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::NeuroscanError::ShapeMismatch`] if fed a tensor
    /// from elsewhere whose rank violates the classifier's contract.
    pub fn predict(
        &self,
        tensor: &ScanTensor,
        modality: &str,
        info: &ScanInfo,
    ) -> Result<ResultRecord> {
        let modality = Modality::from_str(modality);
        let prediction = self.classifier.classify(tensor, modality)?;
        debug!(
            "predicted {} with confidence {:.3}",
            prediction.top_label, prediction.confidence
        );

        Ok(treatment::assemble(&prediction, info, &self.reference))
    }
}
