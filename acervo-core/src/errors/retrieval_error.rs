/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    /// Searching without a partition is a programming error in the caller.
    /// This is the one error that must surface immediately, never recovered.
    #[error("search attempted without a partition filter")]
    PartitionViolation,

    #[error("all {attempted} sub-queries failed")]
    AllSubQueriesFailed { attempted: usize },

    #[error("search failed: {reason}")]
    SearchFailed { reason: String },
}
