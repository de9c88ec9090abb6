//! Deterministic in-memory collaborators for acervo tests: a fake point
//! store, a hash-bag embedder, a scripted reasoner, and corpus builders.
//! Everything here is reproducible run-to-run — no randomness, no I/O.

mod corpus;
mod embedder;
mod reasoner;
mod store;

pub use corpus::{legal_corpus, ChunkBuilder};
pub use embedder::FakeEmbedder;
pub use reasoner::ScriptedReasoner;
pub use store::FakePointStore;
