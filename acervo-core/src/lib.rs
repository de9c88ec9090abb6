//! # acervo-core
//!
//! Foundation crate for the acervo retrieval engine.
//! Defines all types, traits, errors, and config.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod corpus;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::AcervoConfig;
pub use corpus::{Chunk, ScoredChunk, StructuralTags};
pub use errors::{AcervoError, AcervoResult};
pub use models::{
    Complexity, QueryAnalysis, QueryType, RetrievalOutcome, SearchFilter, SearchStrategy,
};
