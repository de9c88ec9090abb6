/// Reasoning/generation capability errors. All call sites treat this
/// capability as unreliable and degrade to a deterministic path.
#[derive(Debug, thiserror::Error)]
pub enum ReasoningError {
    #[error("completion failed: {reason}")]
    CompletionFailed { reason: String },

    #[error("reasoning call timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("malformed response: {snippet}")]
    MalformedResponse { snippet: String },
}
