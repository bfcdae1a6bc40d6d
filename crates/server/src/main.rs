//! Test harness for the recommendation engine.
//!
//! Runs one end-to-end request against a live generation service. Paths
//! and service configuration come from the environment:
//! `COURSE_CATALOG`, `MODEL_ARTIFACTS`, `LLM_API_URL`, `LLM_API_KEY`,
//! `LLM_MODEL`. The query is whatever follows on the command line.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use catalog::CourseCatalog;
use llm_client::{LlmClient, LlmConfig};
use models::ArtifactSet;
use server::RecommendationEngine;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let catalog_path =
        std::env::var("COURSE_CATALOG").unwrap_or_else(|_| "data/courses.tsv".to_string());
    let artifacts_dir =
        std::env::var("MODEL_ARTIFACTS").unwrap_or_else(|_| "data/artifacts".to_string());

    info!("Loading course catalog from {}", catalog_path);
    let catalog = Arc::new(
        CourseCatalog::load_from_file(Path::new(&catalog_path))
            .context("Failed to load course catalog")?,
    );
    info!("Catalog loaded: {} courses", catalog.len());

    let artifacts = ArtifactSet::load_from_dir(Path::new(&artifacts_dir))
        .context("Failed to load model artifacts")?;

    let base_url = std::env::var("LLM_API_URL").context("LLM_API_URL is not set")?;
    let mut config = LlmConfig::new(base_url);
    config.api_key = std::env::var("LLM_API_KEY").ok();
    if let Ok(model) = std::env::var("LLM_MODEL") {
        config.model = model;
    }
    let llm = Arc::new(LlmClient::new(config).context("Failed to build generation client")?);

    let engine = RecommendationEngine::new(catalog, &artifacts, llm);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let user_input = if args.is_empty() {
        "I like biology and hands-on lab work".to_string()
    } else {
        args.join(" ")
    };

    info!("Requesting recommendations for: {}", user_input);
    let outcome = engine.recommend(&user_input).await?;

    info!(
        "Cluster {}, preferred level {}, {} ranked candidates, {} matches",
        outcome.cluster,
        outcome.preferred_level,
        outcome.candidates.len(),
        outcome.matches.len()
    );
    for (i, rec) in outcome.recommendations.iter().enumerate() {
        info!(
            "{}. {} ({}) - similarity {:.2}",
            i + 1,
            rec.title,
            rec.key,
            rec.similarity
        );
        info!("   {}", rec.reasoning);
    }
    if outcome.recommendations.is_empty() {
        info!("No recommendations matched the requested workload level");
    }

    Ok(())
}
