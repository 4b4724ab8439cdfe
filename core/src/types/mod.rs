//! Core type definitions for the scan pipeline
//!
//! This module provides the fundamental types used throughout the neuroscan library:
//! - [`Modality`]: The scanning technique that produced the input (MRI, fMRI, PET, CT)
//! - [`ScanFormat`]: The on-disk format a scan was decoded from
//! - [`TreatmentKind`]: Classification of treatment suggestions
//! - [`RawScan`]: A decoded scan before normalization
//! - [`ScanInfo`]: Immutable bookkeeping record attached to a normalized tensor
//! - [`ScanTensor`]: The fixed-shape, channel-first array consumed by the classifier

mod enums;
mod scan;

pub use enums::{Modality, ScanFormat, TreatmentKind};
pub use scan::{RawScan, ScanInfo, ScanTensor};
