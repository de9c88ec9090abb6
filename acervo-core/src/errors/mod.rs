//! Per-subsystem error enums plus the workspace-wide aggregate.

mod embedding_error;
mod lexical_error;
mod reasoning_error;
mod retrieval_error;
mod store_error;

pub use embedding_error::EmbeddingError;
pub use lexical_error::LexicalError;
pub use reasoning_error::ReasoningError;
pub use retrieval_error::RetrievalError;
pub use store_error::StoreError;

/// The workspace-wide error type. Subsystem errors convert in via `From`.
#[derive(Debug, thiserror::Error)]
pub enum AcervoError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Reasoning(#[from] ReasoningError),

    #[error(transparent)]
    Lexical(#[from] LexicalError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type AcervoResult<T> = Result<T, AcervoError>;
