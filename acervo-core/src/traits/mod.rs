//! Seams to the external collaborators. The engine never reimplements
//! embedding, vector indexing, or text generation — it consumes them
//! through these traits, injected at construction time.

mod embedder;
mod point_store;
mod reasoner;

pub use embedder::{truncate_to_chars, IEmbedder};
pub use point_store::IPointStore;
pub use reasoner::IReasoner;
