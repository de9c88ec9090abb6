use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use acervo_core::errors::LexicalError;
use acervo_core::models::{SearchFilter, SparseVector};
use acervo_core::traits::IPointStore;

use crate::tokenize::tokenize;

/// BM25 tuning parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bm25Params {
    /// Term-frequency saturation.
    pub k1: f64,
    /// Length normalization strength.
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: 1.5, b: 0.75 }
    }
}

/// The fitted model: vocabulary, per-term IDF, corpus stats.
/// Read-only after fit; serialized as-is for persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FittedModel {
    /// term → stable term id (assigned in lexicographic term order).
    vocabulary: BTreeMap<String, u32>,
    /// term id → IDF. Parallel to `vocabulary`.
    idf: BTreeMap<u32, f64>,
    corpus_size: usize,
    avg_doc_len: f64,
}

/// BM25 scorer over one corpus snapshot.
///
/// `fit` must run once before any `encode`; after that the scorer is
/// immutable and `&self` scoring is safe from any number of threads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bm25Scorer {
    params: Bm25Params,
    model: Option<FittedModel>,
}

impl Default for Bm25Scorer {
    fn default() -> Self {
        Self::new(Bm25Params::default())
    }
}

impl Bm25Scorer {
    pub fn new(params: Bm25Params) -> Self {
        Self {
            params,
            model: None,
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.vocabulary.len())
    }

    /// Build vocabulary, document frequencies, and corpus stats.
    ///
    /// IDF(term) = ln((N − df + 0.5) / (df + 0.5) + 1).
    pub fn fit(&mut self, corpus: &[String]) -> Result<(), LexicalError> {
        if corpus.is_empty() {
            return Err(LexicalError::EmptyCorpus);
        }

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_len = 0usize;

        for document in corpus {
            let tokens = tokenize(document);
            total_len += tokens.len();
            let mut seen: Vec<&String> = Vec::new();
            for token in &tokens {
                if !seen.contains(&token) {
                    seen.push(token);
                }
            }
            for token in seen {
                *document_frequency.entry(token.clone()).or_default() += 1;
            }
        }

        let corpus_size = corpus.len();
        let avg_doc_len = total_len as f64 / corpus_size as f64;

        let mut vocabulary = BTreeMap::new();
        let mut idf = BTreeMap::new();
        for (term_id, (term, df)) in document_frequency.into_iter().enumerate() {
            let term_id = term_id as u32;
            let n = corpus_size as f64;
            let df = df as f64;
            vocabulary.insert(term, term_id);
            idf.insert(term_id, ((n - df + 0.5) / (df + 0.5) + 1.0).ln());
        }

        info!(
            corpus_size,
            vocabulary = vocabulary.len(),
            avg_doc_len,
            "BM25 model fitted"
        );

        self.model = Some(FittedModel {
            vocabulary,
            idf,
            corpus_size,
            avg_doc_len,
        });
        Ok(())
    }

    /// Scroll every chunk in the partition and fit over the chunk texts.
    pub fn fit_from_store(
        &mut self,
        store: &dyn IPointStore,
        filter: &SearchFilter,
    ) -> Result<(), LexicalError> {
        const PAGE: usize = 256;
        let mut corpus = Vec::new();
        let mut offset = 0usize;
        loop {
            let page = store
                .scroll(filter, offset, PAGE)
                .map_err(|e| LexicalError::Persistence {
                    path: format!("store scroll (area {})", filter.area()),
                    reason: e.to_string(),
                })?;
            if page.is_empty() {
                break;
            }
            offset += page.len();
            corpus.extend(page.into_iter().map(|chunk| chunk.text));
        }
        debug!(chunks = corpus.len(), area = filter.area(), "corpus scrolled");
        self.fit(&corpus)
    }

    /// Score `text` against the fitted model as a sparse vector.
    ///
    /// weight(term) = IDF · (tf·(k1+1)) / (tf + k1·(1 − b + b·|doc|/avgdl)).
    /// Terms outside the fitted vocabulary are dropped.
    pub fn encode(&self, text: &str) -> Result<SparseVector, LexicalError> {
        let model = self.model.as_ref().ok_or(LexicalError::NotFitted)?;

        let tokens = tokenize(text);
        let doc_len = tokens.len() as f64;

        let mut term_frequency: BTreeMap<u32, f64> = BTreeMap::new();
        for token in &tokens {
            if let Some(&term_id) = model.vocabulary.get(token) {
                *term_frequency.entry(term_id).or_default() += 1.0;
            }
        }

        let Bm25Params { k1, b } = self.params;
        let norm = k1 * (1.0 - b + b * doc_len / model.avg_doc_len);

        let mut weights: BTreeMap<u32, f64> = BTreeMap::new();
        for (term_id, tf) in term_frequency {
            let idf = model.idf.get(&term_id).copied().unwrap_or(0.0);
            weights.insert(term_id, idf * (tf * (k1 + 1.0)) / (tf + norm));
        }

        Ok(SparseVector::from_map(&weights))
    }

    /// Persist vocabulary, IDF table, and fit parameters as JSON.
    pub fn save(&self, path: &Path) -> Result<(), LexicalError> {
        let json = serde_json::to_string(self).map_err(|e| LexicalError::Persistence {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        std::fs::write(path, json).map_err(|e| LexicalError::Persistence {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Reload a persisted scorer; scoring is then identical to the
    /// instance that was saved, without re-fitting.
    pub fn load(path: &Path) -> Result<Self, LexicalError> {
        let raw = std::fs::read_to_string(path).map_err(|e| LexicalError::Persistence {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| LexicalError::Persistence {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
