use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::corpus::{Chunk, StructuralField};
use crate::errors::RetrievalError;

/// The filter every point-store call carries.
///
/// The partition (`area`) is mandatory and only settable through
/// [`SearchFilter::new`] — there is no way to build a filter without one.
/// Structural filters are exact-match conjunctions on tag numbers; the
/// optional document allow-list restricts results to named documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    area: String,
    #[serde(default)]
    pub structural: BTreeMap<StructuralField, String>,
    #[serde(default)]
    pub document_ids: Option<BTreeSet<String>>,
}

impl SearchFilter {
    pub fn new(area: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            structural: BTreeMap::new(),
            document_ids: None,
        }
    }

    /// The mandatory partition tag.
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Fail fast on an empty partition — that is a caller bug, never a
    /// retrieval outcome.
    pub fn ensure_partition(&self) -> Result<(), RetrievalError> {
        if self.area.trim().is_empty() {
            return Err(RetrievalError::PartitionViolation);
        }
        Ok(())
    }

    pub fn with_structural(mut self, field: StructuralField, value: impl Into<String>) -> Self {
        self.structural.insert(field, value.into());
        self
    }

    /// Restrict to a single document.
    pub fn with_document(self, document_id: impl Into<String>) -> Self {
        self.with_documents([document_id.into()])
    }

    /// Restrict to a set of documents.
    pub fn with_documents<I: IntoIterator<Item = String>>(mut self, ids: I) -> Self {
        self.document_ids = Some(ids.into_iter().collect());
        self
    }

    /// Whether a document passes the allow-list (no list allows all).
    pub fn allows_document(&self, document_id: &str) -> bool {
        match &self.document_ids {
            Some(ids) => ids.contains(document_id),
            None => true,
        }
    }

    /// Full predicate: partition, structural conjunction, allow-list.
    /// Point-store implementations evaluate this against each payload.
    pub fn matches(&self, chunk: &Chunk) -> bool {
        if chunk.area != self.area {
            return false;
        }
        if !self.allows_document(&chunk.document_id) {
            return false;
        }
        self.structural
            .iter()
            .all(|(field, value)| chunk.structure.number(*field) == Some(value.as_str()))
    }
}
