//! TF-IDF text vectorizer with a fixed, pre-fitted vocabulary.
//!
//! The vocabulary and IDF weights come from an offline training run; this
//! module only implements the transform side. Out-of-vocabulary terms are
//! dropped silently, the empty string maps to the zero vector, and the
//! output is L2-normalized so cosine similarity reduces to a dot product
//! between non-zero vectors.

use crate::error::{ModelError, Result};
use crate::sparse::SparseVector;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fitted TF-IDF vectorizer: term → column index, plus one IDF weight per
/// column. Deserialized from `vectorizer.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Build a vectorizer from an explicit vocabulary and IDF table.
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f32>) -> Result<Self> {
        let vectorizer = Self { vocabulary, idf };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    /// Dimensionality of the output vectors, fixed at fit time.
    pub fn dimensions(&self) -> usize {
        self.idf.len()
    }

    /// Map free text to a sparse TF-IDF vector.
    ///
    /// Deterministic: the same text always produces the identical vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut term_counts: HashMap<usize, f32> = HashMap::new();
        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(token.as_str()) {
                *term_counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let weighted = term_counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]));

        SparseVector::from_pairs(self.dimensions(), weighted).l2_normalized()
    }

    /// Consistency check applied after deserializing the artifact.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.vocabulary.len() != self.idf.len() {
            return Err(ModelError::InvalidArtifact {
                artifact: "vectorizer".to_string(),
                reason: format!(
                    "vocabulary has {} terms but idf has {} weights",
                    self.vocabulary.len(),
                    self.idf.len()
                ),
            });
        }
        if let Some((term, &idx)) = self
            .vocabulary
            .iter()
            .find(|&(_, &idx)| idx >= self.idf.len())
        {
            return Err(ModelError::InvalidArtifact {
                artifact: "vectorizer".to_string(),
                reason: format!("term '{}' maps to out-of-range column {}", term, idx),
            });
        }
        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::InvalidArtifact {
                artifact: "vectorizer".to_string(),
                reason: "non-finite idf weight".to_string(),
            });
        }
        Ok(())
    }
}

/// Tokenize text: lowercase, split on non-alphanumeric, keep tokens of
/// length >= 2.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() >= 2)
        .map(|token| token.to_string())
        .collect()
}
