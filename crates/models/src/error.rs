//! Error types for model artifacts and inference.

use thiserror::Error;

/// Errors from loading model artifacts or running inference.
///
/// Everything except `FeatureShape` is a startup error: artifacts are
/// deserialized and cross-validated once, before the process serves any
/// request. `FeatureShape` is the one per-request failure: a candidate's
/// feature vector that does not fit the classifier is fatal for that
/// request, never silently defaulted.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Artifact file could not be found or opened
    #[error("Failed to open artifact file: {path}")]
    ArtifactNotFound { path: String },

    /// I/O error occurred while reading an artifact
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Artifact file is not valid JSON for its expected shape
    #[error("Failed to deserialize artifact {artifact}: {source}")]
    Deserialize {
        artifact: String,
        #[source]
        source: serde_json::Error,
    },

    /// Artifact deserialized but its contents are inconsistent
    #[error("Invalid artifact {artifact}: {reason}")]
    InvalidArtifact { artifact: String, reason: String },

    /// A feature vector does not match the classifier's feature space
    #[error("Classifier input has {found} dimensions, expected {expected}")]
    FeatureShape { expected: usize, found: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ModelError>;
