use crate::errors::ReasoningError;

/// The reasoning/generation capability: decomposition, hypothetical
/// documents, completeness validation, retry queries, answer enhancement.
///
/// Treated as unreliable at every call site — timeouts and malformed
/// output degrade to deterministic fallbacks, they never abort a request.
pub trait IReasoner: Send + Sync {
    fn complete(
        &self,
        prompt: &str,
        temperature: f64,
        max_tokens: usize,
    ) -> Result<String, ReasoningError>;
}
