use std::sync::Mutex;

use acervo_core::errors::EmbeddingError;
use acervo_core::traits::IEmbedder;

const DIMS: usize = 64;

/// FNV-1a, fixed so vectors are stable across Rust versions and runs.
fn fnv1a(token: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in token.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// Deterministic bag-of-tokens embedder: each token bumps one of 64
/// hashed dimensions, then the vector is L2-normalized. Cosine similarity
/// between outputs tracks token overlap, which is exactly what the
/// scenario tests need.
#[derive(Default)]
pub struct FakeEmbedder {
    /// Substrings that make `embed` fail, for capability-failure tests.
    poisoned: Mutex<Vec<String>>,
}

impl FakeEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make any input containing `needle` fail with an inference error.
    pub fn poison(&self, needle: impl Into<String>) {
        self.poisoned
            .lock()
            .expect("poison lock")
            .push(needle.into());
    }
}

impl IEmbedder for FakeEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let poisoned = self.poisoned.lock().expect("poison lock");
        if poisoned.iter().any(|needle| text.contains(needle)) {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("poisoned input: {text:.40}"),
            });
        }
        drop(poisoned);

        let mut vector = vec![0.0f32; DIMS];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let idx = (fnv1a(&token.to_lowercase()) % DIMS as u64) as usize;
            vector[idx] += 1.0;
        }
        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        Ok(vector)
    }

    fn max_input_chars(&self) -> usize {
        2_000
    }
}
