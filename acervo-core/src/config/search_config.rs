use serde::{Deserialize, Serialize};

use super::defaults;

/// Hybrid search + expansion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// RRF smoothing constant.
    pub rrf_k: u32,
    /// Dense/lexical RRF weights for general queries.
    pub dense_weight: f64,
    pub lexical_weight: f64,
    /// Weights used when the query asks for something exact (digits,
    /// quoted substrings, trigger terms).
    pub biased_dense_weight: f64,
    pub biased_lexical_weight: f64,
    /// Trigger terms for the weight shift. Corpus-specific configuration.
    pub lexical_bias_terms: Vec<String>,
    /// When false, or when the store lacks sparse search, dense-only mode.
    pub hybrid_enabled: bool,
    /// Candidate over-fetch multiplier per retrieval arm.
    pub overfetch_factor: usize,
    /// Default result size when the caller does not specify one.
    pub default_top_k: usize,
    /// Per-step multiplicative decay during context expansion.
    pub context_decay: f64,
    /// Default window for context expansion (steps per direction).
    pub context_window: usize,
    /// Parent score factor for hierarchy expansion.
    pub parent_factor: f64,
    /// First sibling factor; each further sibling loses `sibling_step`,
    /// floored at `sibling_floor`.
    pub first_sibling_factor: f64,
    pub sibling_step: f64,
    pub sibling_floor: f64,
    pub max_siblings: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            rrf_k: defaults::DEFAULT_RRF_K,
            dense_weight: defaults::DEFAULT_DENSE_WEIGHT,
            lexical_weight: defaults::DEFAULT_LEXICAL_WEIGHT,
            biased_dense_weight: defaults::DEFAULT_BIASED_DENSE_WEIGHT,
            biased_lexical_weight: defaults::DEFAULT_BIASED_LEXICAL_WEIGHT,
            lexical_bias_terms: defaults::DEFAULT_LEXICAL_BIAS_TERMS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            hybrid_enabled: defaults::DEFAULT_HYBRID_ENABLED,
            overfetch_factor: defaults::DEFAULT_OVERFETCH_FACTOR,
            default_top_k: defaults::DEFAULT_TOP_K,
            context_decay: defaults::DEFAULT_CONTEXT_DECAY,
            context_window: defaults::DEFAULT_CONTEXT_WINDOW,
            parent_factor: defaults::DEFAULT_PARENT_FACTOR,
            first_sibling_factor: defaults::DEFAULT_FIRST_SIBLING_FACTOR,
            sibling_step: defaults::DEFAULT_SIBLING_FACTOR_STEP,
            sibling_floor: defaults::DEFAULT_SIBLING_FACTOR_FLOOR,
            max_siblings: defaults::DEFAULT_MAX_SIBLINGS,
        }
    }
}

impl SearchConfig {
    /// Score factor for the sibling at `position` (0-based).
    pub fn sibling_factor(&self, position: usize) -> f64 {
        (self.first_sibling_factor - self.sibling_step * position as f64).max(self.sibling_floor)
    }
}
