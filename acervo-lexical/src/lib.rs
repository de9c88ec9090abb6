//! # acervo-lexical
//!
//! BM25 lexical scoring over a corpus snapshot. Fit once, score many:
//! after [`Bm25Scorer::fit`] the model is read-only and safe to share
//! across concurrent requests. The fitted vocabulary/IDF table persists
//! to disk so scoring is reproducible across process restarts.

mod scorer;
mod stopwords;
mod tokenize;

pub use scorer::{Bm25Params, Bm25Scorer};
pub use tokenize::tokenize;
