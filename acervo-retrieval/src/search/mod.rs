//! Hybrid dense + lexical search with weighted RRF fusion and
//! document-boundary-constrained expansion.

pub mod rrf;

mod expansion;
mod weights;

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use acervo_core::config::SearchConfig;
use acervo_core::corpus::ScoredChunk;
use acervo_core::errors::AcervoResult;
use acervo_core::models::{ScoredPoint, SearchFilter};
use acervo_core::traits::{truncate_to_chars, IEmbedder, IPointStore};
use acervo_lexical::Bm25Scorer;

use rrf::RankedArm;

/// Single-query search over one corpus snapshot.
///
/// Runs a dense arm and, when the store supports it and a fitted scorer
/// is present, a lexical arm; fuses both with weighted RRF. Anything that
/// disables the lexical arm (config, store capability, unfitted scorer)
/// degrades to dense-only mode silently — hybrid is an optimization,
/// never a requirement.
pub struct HybridSearchEngine<'a> {
    store: &'a dyn IPointStore,
    embedder: &'a dyn IEmbedder,
    scorer: Option<&'a Bm25Scorer>,
    config: SearchConfig,
}

impl<'a> HybridSearchEngine<'a> {
    pub fn new(
        store: &'a dyn IPointStore,
        embedder: &'a dyn IEmbedder,
        scorer: Option<&'a Bm25Scorer>,
        config: SearchConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            scorer,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Hybrid (or dense-only) search, best first, at most `top_k` results.
    #[instrument(skip(self, filter), fields(area = filter.area()))]
    pub fn search(
        &self,
        query: &str,
        filter: &SearchFilter,
        top_k: usize,
    ) -> AcervoResult<Vec<ScoredChunk>> {
        filter.ensure_partition()?;
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let fetch = top_k * self.config.overfetch_factor.max(1);
        let text = truncate_to_chars(query, self.embedder.max_input_chars());
        let vector = self.embedder.embed(text)?;
        let dense = self.store.search(&vector, filter, fetch)?;

        let Some(lexical) = self.lexical_arm(query, filter, fetch)? else {
            let mut seeds: Vec<ScoredChunk> = dense
                .into_iter()
                .map(|p| ScoredChunk::seed(p.chunk, p.score))
                .collect();
            seeds.truncate(top_k);
            return Ok(seeds);
        };

        Ok(self.fuse_arms(query, dense, lexical, top_k))
    }

    /// Search, then widen each hit with its surrounding chunks.
    pub fn search_with_context(
        &self,
        query: &str,
        filter: &SearchFilter,
        top_k: usize,
        window: usize,
    ) -> AcervoResult<Vec<ScoredChunk>> {
        let seeds = self.search(query, filter, top_k)?;
        expansion::expand_context(self.store, filter, &self.config, seeds, window)
    }

    /// Search, then pull in structural parents and siblings of each hit.
    pub fn search_with_hierarchy(
        &self,
        query: &str,
        filter: &SearchFilter,
        top_k: usize,
    ) -> AcervoResult<Vec<ScoredChunk>> {
        let seeds = self.search(query, filter, top_k)?;
        expansion::expand_hierarchy(self.store, filter, &self.config, seeds)
    }

    /// The lexical arm, or `None` when hybrid mode is unavailable.
    fn lexical_arm(
        &self,
        query: &str,
        filter: &SearchFilter,
        fetch: usize,
    ) -> AcervoResult<Option<Vec<ScoredPoint>>> {
        if !self.config.hybrid_enabled {
            return Ok(None);
        }
        let Some(scorer) = self.scorer.filter(|s| s.is_fitted()) else {
            debug!("no fitted lexical scorer, dense-only mode");
            return Ok(None);
        };
        if !self.store.supports_sparse() {
            debug!("store lacks sparse search, dense-only mode");
            return Ok(None);
        }
        let sparse = scorer.encode(query)?;
        if sparse.is_empty() {
            // Every query term is out-of-vocabulary; nothing to match on.
            return Ok(None);
        }
        Ok(Some(self.store.sparse_search(&sparse, filter, fetch)?))
    }

    fn fuse_arms(
        &self,
        query: &str,
        dense: Vec<ScoredPoint>,
        lexical: Vec<ScoredPoint>,
        top_k: usize,
    ) -> Vec<ScoredChunk> {
        let (dense_weight, lexical_weight) = weights::select(query, &self.config);
        let arms = [
            RankedArm {
                label: "dense",
                weight: dense_weight,
                ids: dense.iter().map(|p| p.id.clone()).collect(),
            },
            RankedArm {
                label: "lexical",
                weight: lexical_weight,
                ids: lexical.iter().map(|p| p.id.clone()).collect(),
            },
        ];
        let fused = rrf::fuse(&arms, self.config.rrf_k);

        let mut dense_by_id: BTreeMap<&str, &ScoredPoint> =
            dense.iter().map(|p| (p.id.as_str(), p)).collect();
        let lexical_by_id: BTreeMap<&str, &ScoredPoint> =
            lexical.iter().map(|p| (p.id.as_str(), p)).collect();

        debug!(
            dense = dense_by_id.len(),
            lexical = lexical_by_id.len(),
            dense_weight,
            lexical_weight,
            "arms fused"
        );

        fused
            .into_iter()
            .take(top_k)
            .filter_map(|(id, fused_score)| {
                let dense_hit = dense_by_id.remove(id.as_str());
                let lexical_hit = lexical_by_id.get(id.as_str());
                let chunk = dense_hit
                    .map(|p| p.chunk.clone())
                    .or_else(|| lexical_hit.map(|p| p.chunk.clone()))?;
                Some(ScoredChunk {
                    chunk,
                    score: dense_hit.map_or(0.0, |p| p.score),
                    lexical_score: lexical_hit.map(|p| p.score),
                    fused_score: Some(fused_score),
                    provenance: Vec::new(),
                    expansion_offset: 0,
                })
            })
            .collect()
    }
}
