use serde::{Deserialize, Serialize};

use super::defaults;

/// Completeness validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Completeness score at or above this marks the answer complete.
    pub threshold: f64,
    /// Hard cap on follow-up queries per retry round.
    pub max_retry_queries: usize,
    /// Hard cap on retry rounds.
    pub max_rounds: usize,
    pub temperature: f64,
    pub max_tokens: usize,
    pub enhance_max_tokens: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            threshold: defaults::DEFAULT_COMPLETENESS_THRESHOLD,
            max_retry_queries: defaults::DEFAULT_MAX_RETRY_QUERIES,
            max_rounds: defaults::DEFAULT_MAX_VALIDATION_ROUNDS,
            temperature: defaults::DEFAULT_VALIDATION_TEMPERATURE,
            max_tokens: defaults::DEFAULT_VALIDATION_MAX_TOKENS,
            enhance_max_tokens: defaults::DEFAULT_ENHANCE_MAX_TOKENS,
        }
    }
}
