pub mod api;
pub mod classify;
pub mod cli;
pub mod error;
pub mod normalize;
pub mod reader;
pub mod risk;
pub mod treatment;
pub mod types;

pub use api::ScanPipeline;
pub use classify::{Classifier, InferenceBackend, PlaceholderBackend, Prediction};
pub use cli::report::TextReport;
pub use error::{NeuroscanError, Result};
pub use treatment::{ReferenceData, ResolvedTreatment, ResultRecord, TreatmentEntry};
pub use types::*;
