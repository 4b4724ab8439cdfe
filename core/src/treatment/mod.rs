//! Treatment reference data and result assembly
//!
//! The catalog and source-URL table are read-only reference data built
//! once at startup ([`ReferenceData::builtin`]) and passed by reference to
//! the assembler, so the assembly step stays pure and independently
//! testable.

mod assemble;
mod catalog;

pub use assemble::{assemble, DISCLAIMER};

use crate::types::TreatmentKind;
use std::collections::BTreeMap;

/// One static treatment suggestion for a label
///
/// `sources` holds citation keys resolved against the source-URL table at
/// assembly time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreatmentEntry {
    pub kind: TreatmentKind,
    pub name: &'static str,
    pub notes: &'static str,
    pub sources: &'static [&'static str],
}

/// A treatment entry with its citation keys resolved to URLs
///
/// Maps are ordered so serialized output is byte-stable across calls.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ResolvedTreatment {
    pub kind: TreatmentKind,
    pub name: String,
    pub notes: String,
    pub sources: Vec<String>,
    /// Citation key to URL; unknown keys resolve to an empty string
    pub source_links: BTreeMap<String, String>,
}

/// The externally visible result of one pipeline invocation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ResultRecord {
    pub labels: Vec<String>,
    pub probabilities: Vec<f32>,
    pub top_label: String,
    pub confidence: f32,
    pub modality: crate::types::Modality,
    pub original_shape: Vec<usize>,
    pub treatments: Vec<ResolvedTreatment>,
    pub disclaimer: String,
}

/// Immutable reference data: treatment catalog plus source-URL table
///
/// Loaded once at process start and never written to afterward.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    catalog: BTreeMap<&'static str, Vec<TreatmentEntry>>,
    source_urls: BTreeMap<&'static str, &'static str>,
}

impl ReferenceData {
    /// Builds the built-in catalog and URL table
    pub fn builtin() -> Self {
        catalog::builtin()
    }

    /// Constructs reference data from explicit tables
    pub fn new(
        catalog: BTreeMap<&'static str, Vec<TreatmentEntry>>,
        source_urls: BTreeMap<&'static str, &'static str>,
    ) -> Self {
        Self {
            catalog,
            source_urls,
        }
    }

    /// Labels present in the catalog
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.catalog.keys().copied()
    }

    /// Treatment entries for a label, if the catalog knows it
    pub fn treatments_for(&self, label: &str) -> Option<&[TreatmentEntry]> {
        self.catalog.get(label).map(|v| v.as_slice())
    }

    /// Resolves a citation key to its URL, or an empty string when unknown
    pub fn resolve_url(&self, key: &str) -> &'static str {
        self.source_urls.get(key).copied().unwrap_or("")
    }
}
