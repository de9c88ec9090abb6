use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SearchStrategy;
use crate::corpus::{ScoredChunk, StructuralField};

/// Aggregate statistics for one retrieval request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalStats {
    pub request_id: Uuid,
    pub executed_at: DateTime<Utc>,
    /// Mean effective score across returned chunks (0.0 when empty).
    pub avg_score: f64,
    /// Best effective score (0.0 when empty).
    pub top_score: f64,
    /// provenance size → number of chunks with that many sources.
    pub provenance_counts: BTreeMap<usize, usize>,
    /// Number of sub-queries executed (1 for single-hop strategies).
    pub sub_query_count: usize,
    /// Whether the low-score HyDE fallback path ran and was adopted.
    pub fallback_used: bool,
    /// Whether the fallback ran but was rejected (original kept).
    pub fallback_attempted: bool,
}

impl RetrievalStats {
    pub fn from_chunks(chunks: &[ScoredChunk], sub_query_count: usize) -> Self {
        let mut provenance_counts: BTreeMap<usize, usize> = BTreeMap::new();
        let mut sum = 0.0f64;
        let mut top = 0.0f64;
        for chunk in chunks {
            let score = chunk.effective_score();
            sum += score;
            if score > top {
                top = score;
            }
            *provenance_counts
                .entry(chunk.provenance.len().max(1))
                .or_default() += 1;
        }
        let avg_score = if chunks.is_empty() {
            0.0
        } else {
            sum / chunks.len() as f64
        };
        Self {
            request_id: Uuid::new_v4(),
            executed_at: Utc::now(),
            avg_score,
            top_score: top,
            provenance_counts,
            sub_query_count,
            fallback_used: false,
            fallback_attempted: false,
        }
    }
}

/// Structured empty response: "nothing indexed" vs "filters too narrow"
/// is the caller's rendering decision, so we hand back everything needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoResults {
    pub query: String,
    pub detected_filters: BTreeMap<StructuralField, String>,
}

/// What `RetrievalPipeline::run` hands back to the generation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalOutcome {
    /// Ranked chunks, best first. Raw text intact for downstream reranking.
    pub chunks: Vec<ScoredChunk>,
    pub strategy_used: SearchStrategy,
    pub stats: RetrievalStats,
    /// Present only when every strategy and fallback produced nothing.
    pub no_results: Option<NoResults>,
}

impl RetrievalOutcome {
    pub fn new(chunks: Vec<ScoredChunk>, strategy: SearchStrategy, sub_query_count: usize) -> Self {
        let stats = RetrievalStats::from_chunks(&chunks, sub_query_count);
        Self {
            chunks,
            strategy_used: strategy,
            stats,
            no_results: None,
        }
    }

    pub fn empty(
        strategy: SearchStrategy,
        query: impl Into<String>,
        detected_filters: BTreeMap<StructuralField, String>,
    ) -> Self {
        let mut outcome = Self::new(Vec::new(), strategy, 0);
        outcome.no_results = Some(NoResults {
            query: query.into(),
            detected_filters,
        });
        outcome
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
