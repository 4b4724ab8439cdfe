use super::{ReferenceData, ResolvedTreatment, ResultRecord, TreatmentEntry};
use crate::classify::Prediction;
use crate::types::{ScanInfo, TreatmentKind};
use std::collections::BTreeMap;

/// Fixed disclaimer attached to every result record
pub const DISCLAIMER: &str =
    "This is informational only. Consult a licensed clinician before taking any medical action.";

/// Generic entry substituted when the top label is absent from the catalog
const SPECIALIST_REFERRAL: TreatmentEntry = TreatmentEntry {
    kind: TreatmentKind::Advice,
    name: "Specialist referral",
    notes: "Refer to neurology for further evaluation.",
    sources: &["NHS"],
};

/// Assembles the final result record from a prediction
///
/// Looks up the top label's treatment entries (falling back to a generic
/// specialist-referral entry), resolves every citation key against the
/// URL table (unknown keys become empty strings, never an error) and
/// attaches the fixed disclaimer. Pure and deterministic: identical
/// inputs produce byte-identical output.
pub fn assemble(
    prediction: &Prediction,
    info: &ScanInfo,
    reference: &ReferenceData,
) -> ResultRecord {
    let entries = reference
        .treatments_for(prediction.top_label)
        .unwrap_or(&[SPECIALIST_REFERRAL]);

    let treatments = entries
        .iter()
        .map(|entry| resolve(entry, reference))
        .collect();

    ResultRecord {
        labels: prediction.labels.iter().map(|l| l.to_string()).collect(),
        probabilities: prediction.probabilities.clone(),
        top_label: prediction.top_label.to_string(),
        confidence: prediction.confidence,
        modality: info.modality,
        original_shape: info.original_shape.clone(),
        treatments,
        disclaimer: DISCLAIMER.to_string(),
    }
}

/// Resolves one entry's citation keys against the URL table
fn resolve(entry: &TreatmentEntry, reference: &ReferenceData) -> ResolvedTreatment {
    let source_links: BTreeMap<String, String> = entry
        .sources
        .iter()
        .map(|key| (key.to_string(), reference.resolve_url(key).to_string()))
        .collect();

    ResolvedTreatment {
        kind: entry.kind,
        name: entry.name.to_string(),
        notes: entry.notes.to_string(),
        sources: entry.sources.iter().map(|s| s.to_string()).collect(),
        source_links,
    }
}
