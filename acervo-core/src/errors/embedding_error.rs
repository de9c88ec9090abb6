/// Embedding capability errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("input exceeds embedding ceiling: {chars} chars, max {max}")]
    InputTooLong { chars: usize, max: usize },

    #[error("embedding provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("embedding call timed out after {seconds}s")]
    Timeout { seconds: u64 },
}
