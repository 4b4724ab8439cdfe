use crate::error::Result;
use candle_core::{DType, Device, Tensor, D};
use candle_nn::{Linear, Module, VarBuilder};
use ndarray::ArrayViewD;
use rand_distr::{Dirichlet, Distribution};
use std::path::Path;

/// Label set of the placeholder backend
pub const PLACEHOLDER_LABELS: &[&str] = &["Alzheimer", "Parkinson", "NoNeurodegenerativeSignal"];

/// Label set of the model-backed backend
pub const MODEL_LABELS: &[&str] = &["Alzheimer", "Parkinson", "Other"];

/// Dirichlet concentration of the placeholder backend, biased toward the
/// no-signal outcome
const PLACEHOLDER_CONCENTRATION: [f64; 3] = [1.0, 0.8, 2.0];

/// Pooled feature vector length fed to the model head
const FEATURES: usize = 64;

/// Hidden width of the model head
const HIDDEN: usize = 32;

/// Inference backend behind the classifier
///
/// Selected once at startup, not per call. Implementations receive the
/// batched tensor `(N, C, ...)` and return a probability distribution in
/// the order of [`InferenceBackend::labels`]. Tests substitute a
/// deterministic fake implementation.
pub trait InferenceBackend: Send + Sync {
    /// Label names in output-channel order
    fn labels(&self) -> &'static [&'static str];

    /// Probability distribution over the label set for a batched tensor
    fn probabilities(&self, batched: ArrayViewD<'_, f32>) -> Result<Vec<f32>>;
}

/// Demo backend used when no trained model is available
///
/// Draws probabilities from a fixed Dirichlet concentration profile, so
/// the rest of the pipeline is exercisable without model weights. Output
/// is non-deterministic across calls and carries no diagnostic meaning.
pub struct PlaceholderBackend {
    dirichlet: Dirichlet<f64>,
}

impl PlaceholderBackend {
    pub fn new() -> Self {
        let dirichlet = Dirichlet::new(&PLACEHOLDER_CONCENTRATION[..])
            .expect("placeholder concentration is valid");
        Self { dirichlet }
    }
}

impl Default for PlaceholderBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InferenceBackend for PlaceholderBackend {
    fn labels(&self) -> &'static [&'static str] {
        PLACEHOLDER_LABELS
    }

    fn probabilities(&self, _batched: ArrayViewD<'_, f32>) -> Result<Vec<f32>> {
        let sample = self.dirichlet.sample(&mut rand::thread_rng());
        Ok(sample.into_iter().map(|p| p as f32).collect())
    }
}

/// Model-backed inference over a loaded candle checkpoint
///
/// The checkpoint is a safetensors file holding a small readout head
/// (`hidden` and `output` linear layers) applied to block-averaged
/// features of the input tensor. The forward pass runs in inference mode
/// with no gradient tracking; a softmax over the output channel turns the
/// logits into probabilities.
pub struct ModelBackend {
    hidden: Linear,
    output: Linear,
    device: Device,
}

impl ModelBackend {
    /// Loads the readout head from a safetensors checkpoint
    ///
    /// # Errors
    ///
    /// Returns [`crate::NeuroscanError::ModelError`] if the checkpoint
    /// cannot be mapped or is missing the expected layers.
    pub fn load(path: &Path) -> Result<Self> {
        let device = Device::Cpu;
        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[path], DType::F32, &device) }?;
        let hidden = candle_nn::linear(FEATURES, HIDDEN, vb.pp("hidden"))?;
        let output = candle_nn::linear(HIDDEN, MODEL_LABELS.len(), vb.pp("output"))?;
        Ok(Self {
            hidden,
            output,
            device,
        })
    }
}

impl InferenceBackend for ModelBackend {
    fn labels(&self) -> &'static [&'static str] {
        MODEL_LABELS
    }

    fn probabilities(&self, batched: ArrayViewD<'_, f32>) -> Result<Vec<f32>> {
        let features = pool_features(&batched);
        let input = Tensor::from_vec(features, (1, FEATURES), &self.device)?;

        let logits = self.output.forward(&self.hidden.forward(&input)?.relu()?)?;
        let probs = candle_nn::ops::softmax(&logits, D::Minus1)?;

        Ok(probs.squeeze(0)?.to_vec1::<f32>()?)
    }
}

/// Block-average pooling of the spatial dimensions into a fixed-length
/// feature vector
///
/// Volumes pool onto a 4x4x4 grid, images onto 8x8, so both produce
/// [`FEATURES`] values regardless of the modality's target shape.
fn pool_features(batched: &ArrayViewD<'_, f32>) -> Vec<f32> {
    let shape = batched.shape();
    let spatial = &shape[2..];

    let grid: Vec<usize> = if spatial.len() == 3 {
        vec![4, 4, 4]
    } else {
        vec![8, 8]
    };

    let mut features = Vec::with_capacity(FEATURES);
    let mut cell = vec![0usize; grid.len()];
    loop {
        // average the block covered by this grid cell
        let ranges: Vec<(usize, usize)> = cell
            .iter()
            .zip(grid.iter())
            .zip(spatial.iter())
            .map(|((&c, &g), &s)| {
                let start = c * s / g;
                let end = (((c + 1) * s / g).max(start + 1)).min(s);
                (start, end)
            })
            .collect();

        let mut sum = 0.0f64;
        let mut count = 0usize;
        visit_block(batched, &ranges, &mut |v| {
            sum += v as f64;
            count += 1;
        });
        features.push(if count > 0 { (sum / count as f64) as f32 } else { 0.0 });

        // advance the grid cell odometer
        let mut axis = grid.len();
        loop {
            if axis == 0 {
                return features;
            }
            axis -= 1;
            cell[axis] += 1;
            if cell[axis] < grid[axis] {
                break;
            }
            cell[axis] = 0;
        }
    }
}

/// Visits every element of a spatial block across batch and channel axes
fn visit_block(batched: &ArrayViewD<'_, f32>, ranges: &[(usize, usize)], f: &mut impl FnMut(f32)) {
    let shape = batched.shape().to_vec();
    if ranges.len() == 3 {
        for n in 0..shape[0] {
            for c in 0..shape[1] {
                for z in ranges[0].0..ranges[0].1 {
                    for y in ranges[1].0..ranges[1].1 {
                        for x in ranges[2].0..ranges[2].1 {
                            f(batched[[n, c, z, y, x]]);
                        }
                    }
                }
            }
        }
    } else {
        for n in 0..shape[0] {
            for c in 0..shape[1] {
                for y in ranges[0].0..ranges[0].1 {
                    for x in ranges[1].0..ranges[1].1 {
                        f(batched[[n, c, y, x]]);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array4, Array5};

    #[test]
    fn test_placeholder_labels() {
        let backend = PlaceholderBackend::new();
        assert_eq!(
            backend.labels(),
            &["Alzheimer", "Parkinson", "NoNeurodegenerativeSignal"]
        );
    }

    #[test]
    fn test_placeholder_probabilities_are_distributions() {
        let backend = PlaceholderBackend::new();
        let tensor = Array5::<f32>::zeros((1, 1, 4, 4, 4)).into_dyn();

        for _ in 0..1000 {
            let probs = backend.probabilities(tensor.view()).unwrap();
            assert_eq!(probs.len(), 3);
            assert!(probs.iter().all(|p| *p >= 0.0));
            let sum: f32 = probs.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6, "sum was {}", sum);
        }
    }

    #[test]
    fn test_pool_features_volume_length() {
        let batched = Array5::from_elem((1, 1, 16, 16, 16), 2.0f32).into_dyn();
        let features = pool_features(&batched.view());
        assert_eq!(features.len(), FEATURES);
        for v in features {
            assert!((v - 2.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_pool_features_image_length() {
        let batched = Array4::from_elem((1, 1, 224, 224), -1.5f32).into_dyn();
        let features = pool_features(&batched.view());
        assert_eq!(features.len(), FEATURES);
        for v in features {
            assert!((v + 1.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_pool_features_small_spatial_dims() {
        // spatial extent smaller than the pooling grid still yields a
        // full-length, finite feature vector
        let batched = Array5::from_elem((1, 1, 2, 2, 2), 1.0f32).into_dyn();
        let features = pool_features(&batched.view());
        assert_eq!(features.len(), FEATURES);
        assert!(features.iter().all(|v| v.is_finite()));
    }
}
