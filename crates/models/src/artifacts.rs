//! Loading and cross-validation of the pre-trained model artifacts.
//!
//! Four serialized objects make up the artifact set, all produced by the
//! same offline training run:
//!
//! - `vectorizer.json`: fitted vocabulary + IDF weights
//! - `centroids.json`: cluster centroid rows
//! - `course_vectors.json`: precomputed per-course feature vectors
//!   (part of the set; the per-request pipeline re-vectorizes descriptions
//!   and does not consume it)
//! - `classifier.json`: workload classifier
//!
//! All four must agree on the feature-space dimensionality. Any
//! deserialization or consistency failure is fatal at startup; a request
//! must never run against a partially valid set.

use crate::centroid::NearestCentroid;
use crate::classifier::CreditLevelClassifier;
use crate::error::{ModelError, Result};
use crate::sparse::SparseVector;
use crate::tfidf::TfidfVectorizer;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const CENTROIDS_FILE: &str = "centroids.json";
pub const COURSE_VECTORS_FILE: &str = "course_vectors.json";
pub const CLASSIFIER_FILE: &str = "classifier.json";

/// Precomputed feature vectors per course key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseVectors {
    vectors: HashMap<String, SparseVector>,
}

impl CourseVectors {
    pub fn new(vectors: HashMap<String, SparseVector>) -> Self {
        Self { vectors }
    }

    pub fn get(&self, key: &str) -> Option<&SparseVector> {
        self.vectors.get(key)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    fn validate(&self, dims: usize) -> Result<()> {
        for (key, vector) in &self.vectors {
            if vector.dims() != dims || !vector.is_well_formed() {
                return Err(ModelError::InvalidArtifact {
                    artifact: COURSE_VECTORS_FILE.to_string(),
                    reason: format!("vector for course '{}' is malformed", key),
                });
            }
        }
        Ok(())
    }
}

/// Raw on-disk shape of `centroids.json`.
#[derive(Debug, Deserialize)]
struct CentroidRows {
    centroids: Vec<Vec<f32>>,
}

/// The complete, validated artifact set, loaded once at startup.
///
/// Fields are `Arc`-wrapped so the engine can hand each model to its
/// pipeline stage as a shared trait object without cloning the data.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub vectorizer: Arc<TfidfVectorizer>,
    pub centroids: Arc<NearestCentroid>,
    pub course_vectors: Arc<CourseVectors>,
    pub classifier: Arc<CreditLevelClassifier>,
}

impl ArtifactSet {
    /// Load and validate all four artifacts from a directory.
    ///
    /// The four files are parsed in parallel, then checked for mutual
    /// dimensional consistency before anything is returned.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        info!("Loading model artifacts from {}", dir.display());

        let ((vectorizer, centroids), (course_vectors, classifier)) = rayon::join(
            || {
                rayon::join(
                    || read_artifact::<TfidfVectorizer>(dir, VECTORIZER_FILE),
                    || read_artifact::<CentroidRows>(dir, CENTROIDS_FILE),
                )
            },
            || {
                rayon::join(
                    || read_artifact::<CourseVectors>(dir, COURSE_VECTORS_FILE),
                    || read_artifact::<CreditLevelClassifier>(dir, CLASSIFIER_FILE),
                )
            },
        );

        let vectorizer = vectorizer?;
        vectorizer.validate()?;
        let centroids = NearestCentroid::new(centroids?.centroids)?;
        let course_vectors = course_vectors?;
        let classifier = classifier?;
        classifier.validate()?;

        let set = Self {
            vectorizer: Arc::new(vectorizer),
            centroids: Arc::new(centroids),
            course_vectors: Arc::new(course_vectors),
            classifier: Arc::new(classifier),
        };
        set.validate()?;

        info!(
            "Artifact set loaded: {} features, {} clusters, {} course vectors",
            set.vectorizer.dimensions(),
            set.centroids.n_clusters(),
            set.course_vectors.len()
        );
        Ok(set)
    }

    /// Build a set from already-constructed models (tests, embedding).
    pub fn from_parts(
        vectorizer: TfidfVectorizer,
        centroids: NearestCentroid,
        course_vectors: CourseVectors,
        classifier: CreditLevelClassifier,
    ) -> Result<Self> {
        let set = Self {
            vectorizer: Arc::new(vectorizer),
            centroids: Arc::new(centroids),
            course_vectors: Arc::new(course_vectors),
            classifier: Arc::new(classifier),
        };
        set.validate()?;
        Ok(set)
    }

    /// Cross-artifact check: every model must live in the vectorizer's
    /// feature space.
    fn validate(&self) -> Result<()> {
        let dims = self.vectorizer.dimensions();

        if self.centroids.dimensions() != dims {
            return Err(ModelError::InvalidArtifact {
                artifact: CENTROIDS_FILE.to_string(),
                reason: format!(
                    "centroid dimension {} does not match vectorizer dimension {}",
                    self.centroids.dimensions(),
                    dims
                ),
            });
        }
        if self.classifier.dimensions() != dims {
            return Err(ModelError::InvalidArtifact {
                artifact: CLASSIFIER_FILE.to_string(),
                reason: format!(
                    "classifier dimension {} does not match vectorizer dimension {}",
                    self.classifier.dimensions(),
                    dims
                ),
            });
        }
        self.course_vectors.validate(dims)
    }
}

fn read_artifact<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T> {
    let path = dir.join(file);
    let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ModelError::ArtifactNotFound {
            path: path.display().to_string(),
        },
        _ => ModelError::IoError(e),
    })?;

    serde_json::from_str(&content).map_err(|e| ModelError::Deserialize {
        artifact: file.to_string(),
        source: e,
    })
}
