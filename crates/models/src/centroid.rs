//! Nearest-centroid cluster assignment.
//!
//! The centroids are the output of an offline clustering run over the
//! vectorizer's feature space. Assignment picks the centroid with the
//! smallest squared Euclidean distance; ties go to the lowest cluster id.

use crate::error::{ModelError, Result};
use crate::sparse::SparseVector;
use catalog::ClusterId;

/// Pre-trained nearest-centroid model: one dense row per cluster.
#[derive(Debug, Clone)]
pub struct NearestCentroid {
    centroids: Vec<Vec<f32>>,
    // ||c||^2 per centroid; the query's own norm is constant across the
    // argmin, so distance comparison only needs ||c||^2 - 2*c.x.
    squared_norms: Vec<f32>,
}

impl NearestCentroid {
    /// Build the model from raw centroid rows.
    pub fn new(centroids: Vec<Vec<f32>>) -> Result<Self> {
        if centroids.is_empty() {
            return Err(ModelError::InvalidArtifact {
                artifact: "centroids".to_string(),
                reason: "no centroid rows".to_string(),
            });
        }
        let dims = centroids[0].len();
        if let Some(row) = centroids.iter().position(|c| c.len() != dims) {
            return Err(ModelError::InvalidArtifact {
                artifact: "centroids".to_string(),
                reason: format!(
                    "centroid {} has {} dimensions, expected {}",
                    row,
                    centroids[row].len(),
                    dims
                ),
            });
        }
        if centroids.iter().flatten().any(|v| !v.is_finite()) {
            return Err(ModelError::InvalidArtifact {
                artifact: "centroids".to_string(),
                reason: "non-finite centroid value".to_string(),
            });
        }

        let squared_norms = centroids
            .iter()
            .map(|c| c.iter().map(|v| v * v).sum())
            .collect();

        Ok(Self {
            centroids,
            squared_norms,
        })
    }

    /// Number of clusters (K, fixed at model-build time).
    pub fn n_clusters(&self) -> usize {
        self.centroids.len()
    }

    /// Feature-space dimensionality.
    pub fn dimensions(&self) -> usize {
        self.centroids[0].len()
    }

    /// Assign a vector to its nearest centroid.
    ///
    /// Deterministic: same vector, same model, same cluster id, always.
    pub fn predict(&self, vector: &SparseVector) -> ClusterId {
        let mut best = 0;
        let mut best_score = f32::INFINITY;
        for (cluster, centroid) in self.centroids.iter().enumerate() {
            let score = self.squared_norms[cluster] - 2.0 * vector.dot_dense(centroid);
            // Strict comparison keeps the lowest cluster id on ties.
            if score < best_score {
                best = cluster;
                best_score = score;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> NearestCentroid {
        NearestCentroid::new(vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_predict_nearest() {
        let model = model();
        let v = SparseVector::from_pairs(3, vec![(1, 0.9)]);
        assert_eq!(model.predict(&v), 1);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let model = model();
        let v = SparseVector::from_pairs(3, vec![(2, 0.7), (0, 0.1)]);
        let first = model.predict(&v);
        for _ in 0..10 {
            assert_eq!(model.predict(&v), first);
        }
    }

    #[test]
    fn test_tie_breaks_to_lowest_cluster() {
        // Equidistant from both centroids.
        let model = NearestCentroid::new(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let v = SparseVector::from_pairs(2, vec![(0, 0.5), (1, 0.5)]);
        assert_eq!(model.predict(&v), 0);
    }

    #[test]
    fn test_zero_vector_still_assigned() {
        let model = NearestCentroid::new(vec![vec![2.0, 0.0], vec![0.5, 0.5]]).unwrap();
        // Zero vector is nearest to the centroid with the smallest norm.
        assert_eq!(model.predict(&SparseVector::zeros(2)), 1);
    }

    #[test]
    fn test_empty_model_rejected() {
        assert!(matches!(
            NearestCentroid::new(Vec::new()),
            Err(ModelError::InvalidArtifact { .. })
        ));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = NearestCentroid::new(vec![vec![1.0, 2.0], vec![1.0]]);
        assert!(matches!(result, Err(ModelError::InvalidArtifact { .. })));
    }
}
