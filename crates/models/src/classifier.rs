//! Supervised credit-level classifier.
//!
//! Trained offline over the same TF-IDF feature space the vectorizer
//! produces; consumed here as an opaque function from feature vector to
//! one of the three workload categories. The serialized form is one weight
//! row and intercept per class; prediction is the argmax of the class
//! scores, ties going to the first class in artifact order.

use crate::error::{ModelError, Result};
use crate::sparse::SparseVector;
use catalog::CreditLevel;
use serde::{Deserialize, Serialize};

/// Pre-trained workload classifier. Deserialized from `classifier.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditLevelClassifier {
    classes: Vec<CreditLevel>,
    weights: Vec<Vec<f32>>,
    intercepts: Vec<f32>,
}

impl CreditLevelClassifier {
    /// Build a classifier from explicit class rows.
    pub fn new(
        classes: Vec<CreditLevel>,
        weights: Vec<Vec<f32>>,
        intercepts: Vec<f32>,
    ) -> Result<Self> {
        let classifier = Self {
            classes,
            weights,
            intercepts,
        };
        classifier.validate()?;
        Ok(classifier)
    }

    /// Feature-space dimensionality expected by `predict`.
    pub fn dimensions(&self) -> usize {
        self.weights[0].len()
    }

    /// Predict the workload category for one feature vector.
    ///
    /// A dimensionality mismatch is an error, not a default: the caller
    /// built the features from the wrong vectorizer and the request must
    /// fail rather than mislabel every candidate.
    pub fn predict(&self, features: &SparseVector) -> Result<CreditLevel> {
        if features.dims() != self.dimensions() {
            return Err(ModelError::FeatureShape {
                expected: self.dimensions(),
                found: features.dims(),
            });
        }

        let mut best = 0;
        let mut best_score = f32::NEG_INFINITY;
        for (class, (row, intercept)) in self.weights.iter().zip(&self.intercepts).enumerate() {
            let score = features.dot_dense(row) + intercept;
            if score > best_score {
                best = class;
                best_score = score;
            }
        }
        Ok(self.classes[best])
    }

    /// Consistency check applied after deserializing the artifact.
    pub(crate) fn validate(&self) -> Result<()> {
        let invalid = |reason: String| ModelError::InvalidArtifact {
            artifact: "classifier".to_string(),
            reason,
        };

        if self.classes.is_empty() {
            return Err(invalid("no classes".to_string()));
        }
        if self.classes.len() != self.weights.len() || self.classes.len() != self.intercepts.len() {
            return Err(invalid(format!(
                "{} classes, {} weight rows, {} intercepts",
                self.classes.len(),
                self.weights.len(),
                self.intercepts.len()
            )));
        }
        let dims = self.weights[0].len();
        if self.weights.iter().any(|row| row.len() != dims) {
            return Err(invalid("weight rows have unequal dimensions".to_string()));
        }
        if self
            .weights
            .iter()
            .flatten()
            .chain(&self.intercepts)
            .any(|v| !v.is_finite())
        {
            return Err(invalid("non-finite weight".to_string()));
        }
        Ok(())
    }
}
