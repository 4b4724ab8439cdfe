use thiserror::Error;

/// Result type for neuroscan operations
pub type Result<T> = std::result::Result<T, NeuroscanError>;

/// Error types for neuroscan operations
#[derive(Error, Debug)]
pub enum NeuroscanError {
    /// File extension/content not recognized by any reader
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A matched reader failed to parse the file
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Tensor rank violates the classifier's contract
    #[error("shape mismatch: expected rank {expected} (or {expected} + batch axis), got rank {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Model checkpoint load or forward pass failure
    #[error("model error: {0}")]
    ModelError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// Helper conversions from decoder crates

impl From<nifti::NiftiError> for NeuroscanError {
    fn from(e: nifti::NiftiError) -> Self {
        NeuroscanError::DecodeError(format!("{}", e))
    }
}

impl From<dicom_object::ReadError> for NeuroscanError {
    fn from(e: dicom_object::ReadError) -> Self {
        NeuroscanError::DecodeError(format!("{}", e))
    }
}

impl From<dicom_pixeldata::Error> for NeuroscanError {
    fn from(e: dicom_pixeldata::Error) -> Self {
        NeuroscanError::DecodeError(format!("{}", e))
    }
}

impl From<image::ImageError> for NeuroscanError {
    fn from(e: image::ImageError) -> Self {
        NeuroscanError::DecodeError(format!("{}", e))
    }
}

impl From<candle_core::Error> for NeuroscanError {
    fn from(e: candle_core::Error) -> Self {
        NeuroscanError::ModelError(format!("{}", e))
    }
}
