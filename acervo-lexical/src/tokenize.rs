use crate::stopwords::is_stopword;

/// Minimum token length; single characters carry no lexical signal.
const MIN_TOKEN_CHARS: usize = 2;

/// Tokenize for BM25: Unicode-aware lowercase, alphanumeric runs only,
/// stopwords and one-character tokens dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|raw| !raw.is_empty())
        .map(|raw| raw.to_lowercase())
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS && !is_stopword(token))
        .collect()
}
