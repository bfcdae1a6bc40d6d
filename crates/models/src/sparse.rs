//! Sparse numeric vectors over the vectorizer's fixed vocabulary.
//!
//! A `SparseVector` is immutable after creation. Indices are strictly
//! ascending and bounded by the vector's dimensionality, which keeps the
//! dot product a single merge walk.

use serde::{Deserialize, Serialize};

/// Sparse vector: explicit (index, value) pairs over `dims` dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    dims: usize,
    indices: Vec<usize>,
    values: Vec<f32>,
}

impl SparseVector {
    /// The zero vector of the given dimensionality.
    pub fn zeros(dims: usize) -> Self {
        Self {
            dims,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from (index, value) pairs.
    ///
    /// Zero values and out-of-range indices are dropped; pairs are sorted
    /// by index. Callers must not pass duplicate indices.
    pub fn from_pairs(dims: usize, pairs: impl IntoIterator<Item = (usize, f32)>) -> Self {
        let mut pairs: Vec<(usize, f32)> = pairs
            .into_iter()
            .filter(|&(idx, value)| idx < dims && value != 0.0)
            .collect();
        pairs.sort_unstable_by_key(|&(idx, _)| idx);
        debug_assert!(pairs.windows(2).all(|w| w[0].0 < w[1].0));

        let (indices, values) = pairs.into_iter().unzip();
        Self {
            dims,
            indices,
            values,
        }
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate stored (index, value) pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Dot product with another sparse vector (merge walk).
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let mut sum = 0.0;
        let mut a = 0;
        let mut b = 0;
        while a < self.indices.len() && b < other.indices.len() {
            match self.indices[a].cmp(&other.indices[b]) {
                std::cmp::Ordering::Less => a += 1,
                std::cmp::Ordering::Greater => b += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[a] * other.values[b];
                    a += 1;
                    b += 1;
                }
            }
        }
        sum
    }

    /// Dot product with a dense row (e.g. a cluster centroid).
    pub fn dot_dense(&self, dense: &[f32]) -> f32 {
        self.iter()
            .map(|(idx, value)| dense.get(idx).copied().unwrap_or(0.0) * value)
            .sum()
    }

    pub fn squared_norm(&self) -> f32 {
        self.values.iter().map(|v| v * v).sum()
    }

    pub fn norm(&self) -> f32 {
        self.squared_norm().sqrt()
    }

    /// Consume and return the vector scaled to unit L2 norm.
    ///
    /// The zero vector stays the zero vector.
    pub fn l2_normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for value in &mut self.values {
                *value /= norm;
            }
        }
        self
    }

    /// Cosine similarity with another vector.
    ///
    /// Returns 0.0 when either vector is zero. TF-IDF weights are
    /// non-negative, so the result lies in [0, 1]; the clamp only guards
    /// float error at the boundaries.
    pub fn cosine(&self, other: &SparseVector) -> f32 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return 0.0;
        }
        (self.dot(other) / denom).clamp(0.0, 1.0)
    }

    /// Structural check used when vectors arrive from an artifact file:
    /// indices strictly ascending, in range, and aligned with values.
    pub fn is_well_formed(&self) -> bool {
        self.indices.len() == self.values.len()
            && self.indices.iter().all(|&idx| idx < self.dims)
            && self.indices.windows(2).all(|w| w[0] < w[1])
            && self.values.iter().all(|v| v.is_finite())
    }
}
