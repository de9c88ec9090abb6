/// Point-store (vector index) errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("dense search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("sparse search failed: {reason}")]
    SparseSearchFailed { reason: String },

    #[error("sparse search not supported by this store")]
    SparseUnsupported,

    #[error("scroll failed: {reason}")]
    ScrollFailed { reason: String },

    #[error("point store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("point store call timed out after {seconds}s")]
    Timeout { seconds: u64 },
}
