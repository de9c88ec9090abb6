//! # acervo-retrieval
//!
//! The adaptive retrieval engine: decides *how* to search, executes the
//! chosen strategy against a hybrid (dense + lexical) index, fuses and
//! deduplicates results, and drives the bounded post-answer retry loop.
//!
//! ## Architecture
//!
//! ```text
//! RetrievalPipeline (sole entry point)
//! ├── QueryClassifier
//! │   ├── Structural detection (regex + SectionIndex name resolution)
//! │   ├── ReasoningBackedDecomposer (strict JSON, vocabulary-constrained)
//! │   └── HeuristicClassifier (keyword cues, never fails)
//! ├── HybridSearchEngine
//! │   ├── Dense search (embedding similarity)
//! │   ├── Lexical search (BM25 sparse vectors)
//! │   ├── Weighted RRF fusion (query-sensitive weights)
//! │   └── Context / hierarchy expansion (document-boundary constrained)
//! ├── MultihopOrchestrator
//! │   └── Sub-query fan-out + provenance-boosted fusion
//! ├── HydeRetriever
//! │   ├── Decision table (should_use_hyde)
//! │   ├── Register-aware hypothetical generation
//! │   └── One-shot low-score fallback state machine
//! └── Refinement loop (acervo-validation + supplementary retrieval)
//! ```

pub mod engine;
pub mod hyde;
pub mod multihop;
pub mod query;
pub mod search;

pub use engine::{RefinedAnswer, RetrievalPipeline, RunOptions};
pub use hyde::{HydeRetriever, HydeState};
pub use multihop::MultihopOrchestrator;
pub use query::{QueryClassifier, SectionIndex};
pub use search::HybridSearchEngine;
