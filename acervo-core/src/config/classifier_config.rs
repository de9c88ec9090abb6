use serde::{Deserialize, Serialize};

use super::defaults;

/// Query classifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// A post-structural remainder longer than this makes the query hybrid.
    pub min_remainder_chars: usize,
    /// Sampling temperature for the reasoning-backed decomposer.
    pub reasoning_temperature: f64,
    pub reasoning_max_tokens: usize,
    /// top_k mapping by query characteristic.
    pub aggregation_top_k: usize,
    pub comparison_top_k: usize,
    pub exhaustive_top_k: usize,
    pub hybrid_top_k: usize,
    pub semantic_top_k: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_remainder_chars: defaults::DEFAULT_MIN_REMAINDER_CHARS,
            reasoning_temperature: defaults::DEFAULT_CLASSIFIER_TEMPERATURE,
            reasoning_max_tokens: defaults::DEFAULT_CLASSIFIER_MAX_TOKENS,
            aggregation_top_k: defaults::DEFAULT_AGGREGATION_TOP_K,
            comparison_top_k: defaults::DEFAULT_COMPARISON_TOP_K,
            exhaustive_top_k: defaults::DEFAULT_EXHAUSTIVE_TOP_K,
            hybrid_top_k: defaults::DEFAULT_HYBRID_TOP_K,
            semantic_top_k: defaults::DEFAULT_SEMANTIC_TOP_K,
        }
    }
}
