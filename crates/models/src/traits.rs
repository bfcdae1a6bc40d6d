//! Narrow inference seams between the pipeline and the trained models.
//!
//! The pipeline never sees how a model was trained or serialized, only
//! these three operations. Tests substitute stub implementations.

use crate::classifier::CreditLevelClassifier;
use crate::centroid::NearestCentroid;
use crate::error::Result;
use crate::sparse::SparseVector;
use crate::tfidf::TfidfVectorizer;
use catalog::{ClusterId, CreditLevel};

/// Map free text to a sparse vector over the fitted vocabulary.
pub trait Vectorize: Send + Sync {
    fn vectorize(&self, text: &str) -> SparseVector;

    /// Output dimensionality, fixed at fit time.
    fn dimensions(&self) -> usize;
}

/// Assign a vector to exactly one precomputed cluster.
pub trait RouteCluster: Send + Sync {
    fn route_cluster(&self, vector: &SparseVector) -> ClusterId;
}

/// Predict a workload category from a feature vector.
pub trait ClassifyWorkload: Send + Sync {
    fn classify_workload(&self, features: &SparseVector) -> Result<CreditLevel>;
}

impl Vectorize for TfidfVectorizer {
    fn vectorize(&self, text: &str) -> SparseVector {
        self.transform(text)
    }

    fn dimensions(&self) -> usize {
        TfidfVectorizer::dimensions(self)
    }
}

impl RouteCluster for NearestCentroid {
    fn route_cluster(&self, vector: &SparseVector) -> ClusterId {
        self.predict(vector)
    }
}

impl ClassifyWorkload for CreditLevelClassifier {
    fn classify_workload(&self, features: &SparseVector) -> Result<CreditLevel> {
        self.predict(features)
    }
}
