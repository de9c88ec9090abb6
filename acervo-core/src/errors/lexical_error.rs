/// Lexical scorer (BM25) errors.
#[derive(Debug, thiserror::Error)]
pub enum LexicalError {
    #[error("scorer not fitted: call fit() before encode()")]
    NotFitted,

    #[error("cannot fit on an empty corpus")]
    EmptyCorpus,

    #[error("scorer persistence failed at {path}: {reason}")]
    Persistence { path: String, reason: String },
}
