use super::{ReferenceData, TreatmentEntry};
use crate::types::TreatmentKind;
use std::collections::BTreeMap;

/// Builds the built-in treatment catalog and source-URL table
///
/// Short, user-facing suggestion text per label, each entry citing the
/// guideline bodies it is drawn from.
pub(super) fn builtin() -> ReferenceData {
    let mut catalog: BTreeMap<&'static str, Vec<TreatmentEntry>> = BTreeMap::new();

    catalog.insert(
        "Alzheimer",
        vec![
            TreatmentEntry {
                kind: TreatmentKind::Pharmacologic,
                name: "Cholinesterase inhibitors (donepezil, rivastigmine, galantamine)",
                notes: "May help memory and cognition in mild-to-moderate Alzheimer's disease; \
                        discuss side effects with clinician.",
                sources: &["NIA", "NICE"],
            },
            TreatmentEntry {
                kind: TreatmentKind::Pharmacologic,
                name: "Memantine (for moderate-to-severe disease)",
                notes: "NMDA receptor antagonist; often used in moderate-to-severe stages.",
                sources: &["NIA", "NICE"],
            },
            TreatmentEntry {
                kind: TreatmentKind::Nonpharmacologic,
                name: "Cognitive rehabilitation / occupational therapy / caregiver support",
                notes: "Non-drug interventions to support function and safety.",
                sources: &["NIA", "NICE"],
            },
        ],
    );

    catalog.insert(
        "Parkinson",
        vec![
            TreatmentEntry {
                kind: TreatmentKind::Pharmacologic,
                name: "Levodopa (with carbidopa)",
                notes: "Mainstay for symptomatic treatment of bradykinesia and rigidity. Many \
                        dosing options and side effects; clinician supervision required.",
                sources: &["NHS", "NICE"],
            },
            TreatmentEntry {
                kind: TreatmentKind::Pharmacologic,
                name: "Dopamine agonists / MAO-B inhibitors / COMT inhibitors",
                notes: "Used as early alternatives or add-ons to manage symptoms and 'off' \
                        periods.",
                sources: &["NHS", "NICE"],
            },
            TreatmentEntry {
                kind: TreatmentKind::Nonpharmacologic,
                name: "Physiotherapy, exercise, multidisciplinary care",
                notes: "Helps mobility, gait, balance and quality of life.",
                sources: &["NICE"],
            },
        ],
    );

    catalog.insert(
        "ALS",
        vec![
            TreatmentEntry {
                kind: TreatmentKind::Pharmacologic,
                name: "Riluzole",
                notes: "Modestly extends survival; requires liver monitoring.",
                sources: &["MayoClinic"],
            },
            TreatmentEntry {
                kind: TreatmentKind::Pharmacologic,
                name: "Edaravone (in some regions)",
                notes: "May slow progression in selected patients; regionally approved.",
                sources: &["PMCID"],
            },
            TreatmentEntry {
                kind: TreatmentKind::Nonpharmacologic,
                name: "Multidisciplinary supportive care (respiratory, nutritional, PT/OT, speech)",
                notes: "Central to maintaining function and quality of life.",
                sources: &["MayoClinic", "PMCID"],
            },
        ],
    );

    catalog.insert(
        "LewyBody",
        vec![
            TreatmentEntry {
                kind: TreatmentKind::Pharmacologic,
                name: "Cholinesterase inhibitors (rivastigmine, donepezil)",
                notes: "May improve cognition and visual hallucinations in some patients.",
                sources: &["NHS", "PMCID"],
            },
            TreatmentEntry {
                kind: TreatmentKind::Nonpharmacologic,
                name: "Multidisciplinary support",
                notes: "Physio/OT, sleep management, caregiver support.",
                sources: &["NHS", "PMCID"],
            },
        ],
    );

    catalog.insert(
        "NoNeurodegenerativeSignal",
        vec![TreatmentEntry {
            kind: TreatmentKind::Advice,
            name: "Lifestyle and vascular risk optimization",
            notes: "Manage blood pressure, diabetes, stay active, treat hearing loss; reduces \
                    dementia risk.",
            sources: &["PMCID", "NIA"],
        }],
    );

    let mut source_urls: BTreeMap<&'static str, &'static str> = BTreeMap::new();
    source_urls.insert(
        "NIA",
        "https://www.nia.nih.gov/health/alzheimers-treatment/how-alzheimers-disease-treated",
    );
    source_urls.insert("NICE", "https://www.nice.org.uk/guidance");
    source_urls.insert("NHS", "https://www.nhs.uk");
    source_urls.insert("MayoClinic", "https://www.mayoclinic.org");
    source_urls.insert("PMCID", "https://www.ncbi.nlm.nih.gov/pmc/");

    ReferenceData::new(catalog, source_urls)
}
