use serde::{Deserialize, Serialize};

use super::defaults;

/// Multi-hop orchestration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MultihopConfig {
    pub top_k_per_query: usize,
    pub max_total_chunks: usize,
    /// Comparison strategy: per-side result size. max_total becomes
    /// `top_k_per_side × num_sub_queries` so neither side is starved.
    pub comparison_top_k_per_side: usize,
    /// Conditional strategy: earlier sub-queries establish the condition
    /// and matter more, so sizing is fixed.
    pub conditional_top_k_per_query: usize,
    pub conditional_max_total: usize,
    /// Provenance boosts: 1 source → 1.0 (implicit), 2 sources, ≥3 sources.
    pub two_source_boost: f64,
    pub many_source_boost: f64,
}

impl Default for MultihopConfig {
    fn default() -> Self {
        Self {
            top_k_per_query: defaults::DEFAULT_TOP_K_PER_QUERY,
            max_total_chunks: defaults::DEFAULT_MAX_TOTAL_CHUNKS,
            comparison_top_k_per_side: defaults::DEFAULT_COMPARISON_TOP_K_PER_SIDE,
            conditional_top_k_per_query: defaults::DEFAULT_CONDITIONAL_TOP_K_PER_QUERY,
            conditional_max_total: defaults::DEFAULT_CONDITIONAL_MAX_TOTAL,
            two_source_boost: defaults::DEFAULT_TWO_SOURCE_BOOST,
            many_source_boost: defaults::DEFAULT_MANY_SOURCE_BOOST,
        }
    }
}

impl MultihopConfig {
    /// Fusion boost keyed only by provenance count.
    pub fn provenance_boost(&self, sources: usize) -> f64 {
        match sources {
            0 | 1 => 1.0,
            2 => self.two_source_boost,
            _ => self.many_source_boost,
        }
    }
}
