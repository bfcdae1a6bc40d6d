//! Pipeline stages that turn a user vector into a ranked, workload-filtered
//! candidate set.
//!
//! This crate provides:
//! - ClusterRouter: nearest-centroid cluster assignment + catalog subset
//! - SimilarityRanker: cosine ranking with stable top-K truncation
//! - CreditLevelStage: per-candidate workload prediction
//! - filter_by_level: hard filter on the predicted level
//!
//! ## Architecture
//! Stages run strictly sequentially per request; each consumes the previous
//! stage's output unmodified in schema. Empty candidate sets are values,
//! not errors, at every stage, and propagate to the caller. The catalog and
//! models are shared read-only (`Arc`); every stage output is a new record.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{ClusterRouter, CreditLevelStage, SimilarityRanker, filter_by_level};
//!
//! let router = ClusterRouter::new(catalog.clone(), artifacts.centroids.clone());
//! let ranker = SimilarityRanker::new(artifacts.vectorizer.clone());
//!
//! let user_vector = artifacts.vectorizer.vectorize(&user_text);
//! let (cluster, subset) = router.route(&user_vector);
//! let ranked = ranker.rank(&user_vector, &subset, pipeline::DEFAULT_TOP_K);
//! ```

pub mod candidate;
pub mod classify;
pub mod level_filter;
pub mod rank;
pub mod route;

// Re-export main types
pub use candidate::RankedCandidate;
pub use classify::CreditLevelStage;
pub use level_filter::filter_by_level;
pub use rank::{SimilarityRanker, DEFAULT_TOP_K};
pub use route::ClusterRouter;
