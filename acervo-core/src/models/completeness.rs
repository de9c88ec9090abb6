use serde::{Deserialize, Serialize};

/// Outcome of scoring an answer against its question.
///
/// Scores honesty/coverage, not verbosity: an answer that truthfully says
/// the information does not exist in context is complete (score 1.0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessReport {
    pub is_complete: bool,
    /// 0.0–1.0 coverage of the question's sub-aspects.
    pub completeness_score: f64,
    /// Sub-aspects the answer did not address.
    pub missing_aspects: Vec<String>,
    /// Validator confidence in its own judgment, 0.0–1.0.
    pub confidence: f64,
}

impl CompletenessReport {
    /// Fail-open default: treat the answer as complete. A false negative
    /// here only wastes a retry round; it never corrupts the answer.
    pub fn assumed_complete() -> Self {
        Self {
            is_complete: true,
            completeness_score: 1.0,
            missing_aspects: Vec::new(),
            confidence: 0.0,
        }
    }
}

/// Explicit state machine for the post-answer validation loop.
/// Every transition has exactly one triggering condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationState {
    /// No validation ran (disabled or answer absent).
    Unvalidated,
    /// Score met the threshold on the first pass.
    Complete,
    /// Below threshold; a retry round ran and the answer was enhanced.
    IncompleteRetried,
    /// Below threshold; the retry round produced no new material,
    /// original answer kept.
    IncompleteExhausted,
}
