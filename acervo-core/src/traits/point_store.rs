use crate::corpus::Chunk;
use crate::errors::StoreError;
use crate::models::{ScoredPoint, SearchFilter, SparseVector};

/// The external vector index: dense similarity search, optional sparse
/// (lexical) search, point lookup, and scroll/paging. The store handles
/// its own concurrency; the engine only reads.
pub trait IPointStore: Send + Sync {
    /// Dense similarity search under the filter, best first.
    fn search(
        &self,
        vector: &[f32],
        filter: &SearchFilter,
        top_k: usize,
    ) -> Result<Vec<ScoredPoint>, StoreError>;

    /// Whether [`IPointStore::sparse_search`] is available. Engines fall
    /// back to dense-only mode silently when this is false.
    fn supports_sparse(&self) -> bool {
        false
    }

    /// Sparse (lexical) search under the filter, best first.
    fn sparse_search(
        &self,
        _vector: &SparseVector,
        _filter: &SearchFilter,
        _top_k: usize,
    ) -> Result<Vec<ScoredPoint>, StoreError> {
        Err(StoreError::SparseUnsupported)
    }

    /// Point lookup by chunk id.
    fn get_by_id(&self, id: &str) -> Result<Option<Chunk>, StoreError>;

    /// Paged scan of everything matching the filter.
    fn scroll(
        &self,
        filter: &SearchFilter,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Chunk>, StoreError>;
}
