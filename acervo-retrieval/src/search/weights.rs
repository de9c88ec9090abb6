use acervo_core::config::SearchConfig;

/// RRF weights for one query: the lexical arm gains weight when the query
/// asks for something exact (digits, quoted substrings, trigger terms),
/// because embeddings blur numbers and citations.
pub(crate) fn select(query: &str, config: &SearchConfig) -> (f64, f64) {
    if wants_exact_match(query, &config.lexical_bias_terms) {
        (config.biased_dense_weight, config.biased_lexical_weight)
    } else {
        (config.dense_weight, config.lexical_weight)
    }
}

pub(crate) fn wants_exact_match(query: &str, bias_terms: &[String]) -> bool {
    if query.chars().any(|c| c.is_ascii_digit()) {
        return true;
    }
    if query.matches('"').count() >= 2 {
        return true;
    }
    let lowered = query.to_lowercase();
    bias_terms.iter().any(|term| lowered.contains(term.as_str()))
}
