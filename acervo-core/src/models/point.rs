use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::corpus::Chunk;

/// Sparse vector in parallel-array form: `indices[i]` is a term id,
/// `values[i]` its weight. Indices are unique and ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    pub indices: Vec<u32>,
    pub values: Vec<f32>,
}

impl SparseVector {
    pub fn from_map(weights: &BTreeMap<u32, f64>) -> Self {
        let mut indices = Vec::with_capacity(weights.len());
        let mut values = Vec::with_capacity(weights.len());
        for (&term, &weight) in weights {
            indices.push(term);
            values.push(weight as f32);
        }
        Self { indices, values }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Sparse dot product against another vector. Both operands must have
    /// ascending indices (as produced by [`SparseVector::from_map`]).
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0usize, 0usize);
        let mut sum = 0.0f64;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += f64::from(self.values[i]) * f64::from(other.values[j]);
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// One ranked hit from the point store: id, similarity score, full payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPoint {
    pub id: String,
    pub score: f64,
    pub chunk: Chunk,
}
