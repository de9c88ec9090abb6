//! Sub-query fan-out and provenance-boosted fusion.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{info, warn};

use acervo_core::config::MultihopConfig;
use acervo_core::corpus::{sort_ranked, ScoredChunk};
use acervo_core::errors::{AcervoResult, RetrievalError};
use acervo_core::models::{SearchFilter, SearchStrategy};

use crate::search::HybridSearchEngine;

/// Runs each sub-query independently (in parallel — sub-queries are
/// read-only and commutative under the deterministic merge below) and
/// fuses the results, boosting chunks that several sub-queries agree on.
pub struct MultihopOrchestrator<'a> {
    engine: &'a HybridSearchEngine<'a>,
    config: MultihopConfig,
}

impl<'a> MultihopOrchestrator<'a> {
    pub fn new(engine: &'a HybridSearchEngine<'a>, config: MultihopConfig) -> Self {
        Self { engine, config }
    }

    /// Execute the decomposition and fuse. One failing sub-query is
    /// skipped with a warning; only all of them failing is an error.
    pub fn retrieve(
        &self,
        sub_queries: &[String],
        strategy: SearchStrategy,
        filter: &SearchFilter,
    ) -> AcervoResult<Vec<ScoredChunk>> {
        filter.ensure_partition()?;
        if sub_queries.is_empty() {
            warn!("multihop invoked without sub-queries");
            return Ok(Vec::new());
        }

        let (per_query, max_total) = self.sizing(strategy, sub_queries.len());
        let window = self.engine.config().context_window;

        // Each hop carries its surrounding context into the fusion.
        let results: Vec<(&String, AcervoResult<Vec<ScoredChunk>>)> = sub_queries
            .par_iter()
            .map(|query| {
                (
                    query,
                    self.engine.search_with_context(query, filter, per_query, window),
                )
            })
            .collect();

        // Merge in input order so the outcome does not depend on scheduling.
        let mut merged: BTreeMap<String, ScoredChunk> = BTreeMap::new();
        let mut failed = 0usize;
        for (sub_query, result) in results {
            let chunks = match result {
                Ok(chunks) => chunks,
                Err(e) => {
                    warn!(sub_query = %sub_query, error = %e, "sub-query failed, skipping");
                    failed += 1;
                    continue;
                }
            };
            for mut scored in chunks {
                // Merge in the raw domain: hybrid seeds carry RRF-scale
                // fused scores while expansion chunks carry decayed raw
                // ones, and the provenance boost applies to raw scores.
                let observed = scored.score;
                match merged.entry(scored.chunk.id.clone()) {
                    Entry::Occupied(mut entry) => {
                        let existing = entry.get_mut();
                        // Keep the best raw score any sub-query observed.
                        if observed > existing.score {
                            existing.score = observed;
                        }
                        existing.add_provenance(sub_query);
                    }
                    Entry::Vacant(slot) => {
                        scored.fused_score = None;
                        scored.provenance = vec![sub_query.clone()];
                        slot.insert(scored);
                    }
                }
            }
        }

        if failed == sub_queries.len() {
            return Err(RetrievalError::AllSubQueriesFailed { attempted: failed }.into());
        }

        let mut fused: Vec<ScoredChunk> = merged
            .into_values()
            .map(|mut scored| {
                let boost = self.config.provenance_boost(scored.provenance.len());
                scored.fused_score = Some(scored.score * boost);
                scored
            })
            .collect();
        sort_ranked(&mut fused);
        fused.truncate(max_total);

        info!(
            sub_queries = sub_queries.len(),
            failed,
            fused = fused.len(),
            ?strategy,
            "multihop retrieval fused"
        );
        Ok(fused)
    }

    /// Per-sub-query and total result sizing by strategy.
    fn sizing(&self, strategy: SearchStrategy, sub_query_count: usize) -> (usize, usize) {
        match strategy {
            SearchStrategy::MultihopComparison => (
                self.config.comparison_top_k_per_side,
                self.config.comparison_top_k_per_side * sub_query_count,
            ),
            SearchStrategy::MultihopConditional => (
                self.config.conditional_top_k_per_query,
                self.config.conditional_max_total,
            ),
            _ => (self.config.top_k_per_query, self.config.max_total_chunks),
        }
    }
}
