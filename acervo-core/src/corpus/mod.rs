//! Corpus types: the indexed [`Chunk`] and its per-request [`ScoredChunk`] envelope.

mod chunk;
mod scored;

pub use chunk::{Chunk, StructuralField, StructuralTags};
pub use scored::{sort_ranked, ScoredChunk};
