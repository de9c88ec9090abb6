use std::cmp::Ordering;

use acervo_core::corpus::Chunk;
use acervo_core::errors::StoreError;
use acervo_core::models::{ScoredPoint, SearchFilter, SparseVector};
use acervo_core::traits::{IEmbedder, IPointStore};
use acervo_lexical::Bm25Scorer;

/// In-memory point store with deterministic dense (cosine) and sparse
/// (dot-product) search. Chunks are embedded at construction time with
/// the same embedder the engine uses, so rankings are reproducible.
pub struct FakePointStore {
    chunks: Vec<Chunk>,
    dense: Vec<Vec<f32>>,
    sparse: Option<Vec<SparseVector>>,
}

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    // Fixture embeddings are L2-normalized, so the dot product is cosine.
    a.iter()
        .zip(b)
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum()
}

fn rank(mut hits: Vec<ScoredPoint>, top_k: usize) -> Vec<ScoredPoint> {
    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    hits.truncate(top_k);
    hits
}

impl FakePointStore {
    /// Dense-only store.
    pub fn new(chunks: Vec<Chunk>, embedder: &dyn IEmbedder) -> Self {
        let dense = chunks
            .iter()
            .map(|c| embedder.embed(&c.text).expect("fixture embed"))
            .collect();
        Self {
            chunks,
            dense,
            sparse: None,
        }
    }

    /// Store with a sparse index encoded by the given fitted scorer —
    /// the same scorer instance the engine encodes queries with.
    pub fn with_sparse(
        chunks: Vec<Chunk>,
        embedder: &dyn IEmbedder,
        scorer: &Bm25Scorer,
    ) -> Self {
        let mut store = Self::new(chunks, embedder);
        store.sparse = Some(
            store
                .chunks
                .iter()
                .map(|c| scorer.encode(&c.text).expect("fixture sparse encode"))
                .collect(),
        );
        store
    }

    pub fn chunk_texts(&self) -> Vec<String> {
        self.chunks.iter().map(|c| c.text.clone()).collect()
    }
}

impl IPointStore for FakePointStore {
    fn search(
        &self,
        vector: &[f32],
        filter: &SearchFilter,
        top_k: usize,
    ) -> Result<Vec<ScoredPoint>, StoreError> {
        let hits = self
            .chunks
            .iter()
            .zip(&self.dense)
            .filter(|(chunk, _)| filter.matches(chunk))
            .map(|(chunk, embedding)| ScoredPoint {
                id: chunk.id.clone(),
                score: cosine(vector, embedding),
                chunk: chunk.clone(),
            })
            .collect();
        Ok(rank(hits, top_k))
    }

    fn supports_sparse(&self) -> bool {
        self.sparse.is_some()
    }

    fn sparse_search(
        &self,
        vector: &SparseVector,
        filter: &SearchFilter,
        top_k: usize,
    ) -> Result<Vec<ScoredPoint>, StoreError> {
        let Some(sparse) = &self.sparse else {
            return Err(StoreError::SparseUnsupported);
        };
        let hits = self
            .chunks
            .iter()
            .zip(sparse)
            .filter(|(chunk, _)| filter.matches(chunk))
            .filter_map(|(chunk, indexed)| {
                let score = vector.dot(indexed);
                (score > 0.0).then(|| ScoredPoint {
                    id: chunk.id.clone(),
                    score,
                    chunk: chunk.clone(),
                })
            })
            .collect();
        Ok(rank(hits, top_k))
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Chunk>, StoreError> {
        Ok(self.chunks.iter().find(|c| c.id == id).cloned())
    }

    fn scroll(
        &self,
        filter: &SearchFilter,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Chunk>, StoreError> {
        Ok(self
            .chunks
            .iter()
            .filter(|chunk| filter.matches(chunk))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
