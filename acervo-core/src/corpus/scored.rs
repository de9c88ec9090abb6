use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::Chunk;

/// A chunk plus the scoring envelope accumulated during one request.
/// Created fresh per query, discarded after the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    /// Raw similarity score from the search that surfaced this chunk,
    /// including any expansion decay.
    pub score: f64,
    /// Lexical (BM25) score when hybrid search produced one.
    pub lexical_score: Option<f64>,
    /// Fused score after RRF / provenance boosting. `None` until fusion runs.
    pub fused_score: Option<f64>,
    /// Which sub-queries/strategies surfaced this chunk.
    pub provenance: Vec<String>,
    /// Signed distance from the seed result; 0 for seeds, ±n for
    /// context-expansion neighbors.
    pub expansion_offset: i32,
}

impl ScoredChunk {
    /// A seed result straight out of a search.
    pub fn seed(chunk: Chunk, score: f64) -> Self {
        Self {
            chunk,
            score,
            lexical_score: None,
            fused_score: None,
            provenance: Vec::new(),
            expansion_offset: 0,
        }
    }

    /// The score this chunk ranks by: fused when present, raw otherwise.
    pub fn effective_score(&self) -> f64 {
        self.fused_score.unwrap_or(self.score)
    }

    /// Record that `source` surfaced this chunk, once per source.
    pub fn add_provenance(&mut self, source: &str) {
        if !self.provenance.iter().any(|s| s == source) {
            self.provenance.push(source.to_string());
        }
    }
}

/// Sort by effective score descending, chunk id ascending on ties.
///
/// The tie-break keeps the final ranking a deterministic function of
/// (query, corpus snapshot, configuration) regardless of internal
/// concurrency or hash-map iteration order.
pub fn sort_ranked(chunks: &mut [ScoredChunk]) {
    chunks.sort_by(|a, b| {
        b.effective_score()
            .partial_cmp(&a.effective_score())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.chunk.id.cmp(&b.chunk.id))
    });
}
