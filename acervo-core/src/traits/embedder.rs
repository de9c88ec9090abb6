use crate::errors::EmbeddingError;

/// Text → fixed-length float vector. Batchable, with a hard input ceiling:
/// callers pre-truncate with [`truncate_to_chars`] before embedding.
pub trait IEmbedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Hard input ceiling, in characters. Inputs longer than this must be
    /// truncated before the call.
    fn max_input_chars(&self) -> usize;
}

/// Truncate on a char boundary to at most `max` characters.
pub fn truncate_to_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "artículo único"; // multi-byte 'í'
        let cut = truncate_to_chars(text, 4);
        assert_eq!(cut, "artí");
    }

    #[test]
    fn short_input_is_untouched() {
        assert_eq!(truncate_to_chars("ocad", 100), "ocad");
    }
}
