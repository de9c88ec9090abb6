use serde::{Deserialize, Serialize};

use super::defaults;

/// Hypothetical-document retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HydeConfig {
    /// Share of top_k given to the hypothetical-document search.
    pub weight: f64,
    /// Floors for the two search arms.
    pub min_hyde_k: usize,
    pub min_original_k: usize,
    /// Generation settings for the hypothetical passage.
    pub temperature: f64,
    pub max_tokens: usize,
    /// Average-score threshold below which the one-shot fallback runs.
    pub fallback_score_threshold: f64,
    /// Relative improvement required to adopt the fallback result.
    pub fallback_adoption_margin: f64,
}

impl Default for HydeConfig {
    fn default() -> Self {
        Self {
            weight: defaults::DEFAULT_HYDE_WEIGHT,
            min_hyde_k: defaults::DEFAULT_HYDE_MIN_K,
            min_original_k: defaults::DEFAULT_ORIGINAL_MIN_K,
            temperature: defaults::DEFAULT_HYDE_TEMPERATURE,
            max_tokens: defaults::DEFAULT_HYDE_MAX_TOKENS,
            fallback_score_threshold: defaults::DEFAULT_FALLBACK_SCORE_THRESHOLD,
            fallback_adoption_margin: defaults::DEFAULT_FALLBACK_ADOPTION_MARGIN,
        }
    }
}

impl HydeConfig {
    /// Split `top_k` between the hypothetical and original search arms.
    pub fn split_top_k(&self, top_k: usize) -> (usize, usize) {
        let hyde_k = ((top_k as f64 * self.weight).round() as usize).max(self.min_hyde_k);
        let original_k = top_k.saturating_sub(hyde_k).max(self.min_original_k);
        (hyde_k, original_k)
    }
}
