//! Questionnaire-based risk scoring
//!
//! Weighted scoring of patient risk factors for neurodegenerative disease.
//! This is a demo heuristic, not a validated clinical risk model.

use std::fmt;

/// Patient risk factors collected from the intake questionnaire
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskFactors {
    pub age: u32,
    pub hypertension: bool,
    pub diabetes: bool,
    pub tbi_history: bool,
    pub family_history_alz: bool,
    pub hearing_loss: bool,
}

/// Risk category derived from the weighted score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskCategory::Low => "low",
            RiskCategory::Moderate => "moderate",
            RiskCategory::High => "high",
        };
        write!(f, "{}", name)
    }
}

impl RiskFactors {
    /// Weighted risk score
    ///
    /// Each year above 60 contributes 0.1; hypertension and diabetes 2
    /// points each; traumatic brain injury and family history of
    /// Alzheimer's 3 points each; hearing loss 1 point.
    pub fn score(&self) -> f32 {
        let mut score = 0.0f32;
        score += (self.age.saturating_sub(60)) as f32 * 0.1;
        if self.hypertension {
            score += 2.0;
        }
        if self.diabetes {
            score += 2.0;
        }
        if self.tbi_history {
            score += 3.0;
        }
        if self.family_history_alz {
            score += 3.0;
        }
        if self.hearing_loss {
            score += 1.0;
        }
        score
    }

    /// Category thresholds: above 8 is high, above 4 moderate, else low
    pub fn category(&self) -> RiskCategory {
        let score = self.score();
        if score > 8.0 {
            RiskCategory::High
        } else if score > 4.0 {
            RiskCategory::Moderate
        } else {
            RiskCategory::Low
        }
    }
}
