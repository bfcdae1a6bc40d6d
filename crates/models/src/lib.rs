//! # Models Crate
//!
//! The pre-trained model artifacts behind narrow inference interfaces.
//!
//! ## Main Components
//!
//! - **sparse**: Sparse vectors over the vectorizer's feature space
//! - **tfidf**: Fitted TF-IDF vectorizer (transform only)
//! - **centroid**: Nearest-centroid cluster assignment
//! - **classifier**: Supervised workload (credit-level) classifier
//! - **artifacts**: Startup loading + cross-validation of the four
//!   serialized artifacts
//! - **traits**: The `Vectorize` / `RouteCluster` / `ClassifyWorkload`
//!   seams the pipeline consumes
//!
//! Training is out of scope everywhere in this crate: models arrive as
//! serialized artifacts with a fixed inference interface and are loaded
//! once, shared read-only, and never mutated.

// Public modules
pub mod artifacts;
pub mod centroid;
pub mod classifier;
pub mod error;
pub mod sparse;
pub mod tfidf;
pub mod traits;

// Re-export commonly used types for convenience
pub use artifacts::{ArtifactSet, CourseVectors};
pub use centroid::NearestCentroid;
pub use classifier::CreditLevelClassifier;
pub use error::{ModelError, Result};
pub use sparse::SparseVector;
pub use tfidf::TfidfVectorizer;
pub use traits::{ClassifyWorkload, RouteCluster, Vectorize};
