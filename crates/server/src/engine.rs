//! # Recommendation Engine
//!
//! Coordinates the entire recommendation pipeline:
//! 1. Extract intent (external call): workload category + interest keywords
//! 2. Vectorize the keyword text
//! 3. Route to one cluster and pull its courses from the catalog
//! 4. Rank by cosine similarity, keep the top K
//! 5. Predict a credit level per candidate
//! 6. Hard-filter by the preferred level
//! 7. Request per-course reasoning (external call), bounded to 4 results
//!
//! Strictly sequential: no stage begins before the previous one returns,
//! and every stage failure surfaces to the caller unmodified. Empty
//! candidate sets flow through as values; when nothing survives the level
//! filter the explanation call is skipped entirely and the caller decides
//! how to message the end user.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use catalog::{ClusterId, CourseCatalog, CreditLevel};
use llm_client::{CandidateSummary, GenerationService, LlmError, Recommendation};
use models::{ArtifactSet, ModelError, Vectorize};
use pipeline::{
    filter_by_level, ClusterRouter, CreditLevelStage, RankedCandidate, SimilarityRanker,
    DEFAULT_TOP_K,
};

/// Errors surfaced by a recommendation request.
///
/// Transparent wrappers: callers can still tell connectivity failures from
/// contract violations from classifier-input failures.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Everything one request produces.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationOutcome {
    /// Cluster the user vector was routed to
    pub cluster: ClusterId,
    /// Workload category extracted from the user's text
    pub preferred_level: CreditLevel,
    /// Interest keywords extracted upstream (their space-joined text is
    /// what the vectorizer consumed)
    pub interest_keywords: Vec<String>,
    /// Ranked and classified candidates, before the level filter.
    /// Display layers chart these; nothing here aliases shared state.
    pub candidates: Vec<RankedCandidate>,
    /// The subset of `candidates` matching the preferred level
    pub matches: Vec<RankedCandidate>,
    /// Final explained recommendations, at most 4
    pub recommendations: Vec<Recommendation>,
}

/// Main orchestrator wiring the pipeline stages together.
///
/// Built once at startup from the loaded catalog and artifact set; `Clone`
/// and cheap to share across concurrent requests, since every stage only
/// reads `Arc`-shared state.
#[derive(Clone)]
pub struct RecommendationEngine {
    vectorizer: Arc<dyn Vectorize>,
    router: ClusterRouter,
    ranker: SimilarityRanker,
    level_stage: CreditLevelStage,
    llm: Arc<dyn GenerationService>,
    top_k: usize,
}

impl RecommendationEngine {
    /// Create an engine from the shared catalog, the validated artifact
    /// set, and a generation-service handle.
    pub fn new(
        catalog: Arc<CourseCatalog>,
        artifacts: &ArtifactSet,
        llm: Arc<dyn GenerationService>,
    ) -> Self {
        let vectorizer: Arc<dyn Vectorize> = artifacts.vectorizer.clone();
        Self {
            router: ClusterRouter::new(catalog, artifacts.centroids.clone()),
            ranker: SimilarityRanker::new(vectorizer.clone()),
            level_stage: CreditLevelStage::new(vectorizer.clone(), artifacts.classifier.clone()),
            vectorizer,
            llm,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Override the ranker's top-K bound (default 25).
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Main entry point: run the full pipeline for one user request.
    pub async fn recommend(&self, user_input: &str) -> Result<RecommendationOutcome, EngineError> {
        let started = Instant::now();

        // Intent extraction runs before any local stage and supplies both
        // the level preference and the text the pipeline actually embeds.
        let intent = self.llm.extract_intent(user_input).await?;
        let user_text = intent.keyword_text();
        info!(
            "Extracted intent: category={}, keywords={:?}",
            intent.category, intent.interest_key_words
        );

        let user_vector = self.vectorizer.vectorize(&user_text);
        let (cluster, subset) = self.router.route(&user_vector);
        info!(
            "User vector routed to cluster {} ({} courses)",
            cluster,
            subset.len()
        );

        let ranked = self.ranker.rank(&user_vector, &subset, self.top_k);
        info!("Similarity ranking kept {} candidates", ranked.len());

        let candidates = self.level_stage.predict_levels(ranked)?;

        let matches = filter_by_level(candidates.clone(), Some(intent.category));
        info!(
            "{} of {} candidates match preferred level {}",
            matches.len(),
            candidates.len(),
            intent.category
        );

        let recommendations = if matches.is_empty() {
            // Empty is a legal outcome, not an error; there is nothing to
            // explain, so don't call the service.
            info!("No candidates after level filtering; skipping explanation request");
            Vec::new()
        } else {
            let summaries: Vec<CandidateSummary> = matches.iter().map(summarize).collect();
            self.llm.explain(&summaries, &user_text).await?
        };

        info!(
            "Request completed in {:.2?} with {} recommendations",
            started.elapsed(),
            recommendations.len()
        );

        Ok(RecommendationOutcome {
            cluster,
            preferred_level: intent.category,
            interest_keywords: intent.interest_key_words,
            candidates,
            matches,
            recommendations,
        })
    }
}

/// Candidate view sent to the generation service: documented defaults
/// applied, similarity rounded to 2 decimals.
fn summarize(candidate: &RankedCandidate) -> CandidateSummary {
    CandidateSummary {
        key: candidate.key.clone(),
        title: candidate.title.clone(),
        description: candidate.description.clone(),
        minimum_credits: candidate.minimum_credits_or_default(),
        similarity: (candidate.similarity * 100.0).round() / 100.0,
    }
}
