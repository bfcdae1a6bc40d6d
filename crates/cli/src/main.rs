use anyhow::{anyhow, Context, Result};
use catalog::{Course, CourseCatalog};
use clap::{Parser, Subcommand};
use colored::Colorize;
use llm_client::{LlmClient, LlmConfig};
use models::ArtifactSet;
use server::{RecommendationEngine, RecommendationOutcome};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// CourseRecs - University Course Recommendation Engine
#[derive(Parser)]
#[command(name = "course-recs")]
#[command(about = "Course recommendations from free-text interests", long_about = None)]
struct Cli {
    /// Path to the tab-separated course catalog
    #[arg(short, long, default_value = "data/courses.tsv")]
    catalog: PathBuf,

    /// Directory holding the serialized model artifacts
    #[arg(short, long, default_value = "data/artifacts")]
    artifacts: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get course recommendations for a statement of interest
    Recommend {
        /// Free-text statement of interest
        #[arg(long)]
        interests: String,

        /// Number of candidates kept by the similarity ranker
        #[arg(long, default_value = "25")]
        top_k: usize,

        /// Also print the ranked candidate table
        #[arg(long)]
        candidates: bool,
    },

    /// Show a single course from the catalog
    Course {
        /// Course key to display
        #[arg(long)]
        key: String,
    },

    /// Search the catalog by title
    Search {
        /// Course title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the catalog (fast; the model artifacts load only when needed)
    let start = Instant::now();
    let catalog = Arc::new(
        CourseCatalog::load_from_file(&cli.catalog).context("Failed to load course catalog")?,
    );
    println!(
        "{} Loaded {} courses in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Recommend {
            interests,
            top_k,
            candidates,
        } => handle_recommend(catalog, &cli.artifacts, interests, top_k, candidates).await?,
        Commands::Course { key } => handle_course(catalog, &key)?,
        Commands::Search { title } => handle_search(catalog, &title)?,
    }

    Ok(())
}

/// Build the generation-service client from the environment.
///
/// Endpoint and credentials belong to the surrounding application, not the
/// core: LLM_API_URL (required), LLM_API_KEY, LLM_MODEL.
fn llm_from_env() -> Result<LlmClient> {
    let base_url = std::env::var("LLM_API_URL")
        .context("LLM_API_URL is not set (endpoint of the generation service)")?;

    let mut config = LlmConfig::new(base_url);
    config.api_key = std::env::var("LLM_API_KEY").ok();
    if let Ok(model) = std::env::var("LLM_MODEL") {
        config.model = model;
    }

    LlmClient::new(config).map_err(|e| anyhow!("Failed to build generation client: {e}"))
}

/// Handle the 'recommend' command
async fn handle_recommend(
    catalog: Arc<CourseCatalog>,
    artifacts_dir: &Path,
    interests: String,
    top_k: usize,
    show_candidates: bool,
) -> Result<()> {
    let artifacts =
        ArtifactSet::load_from_dir(artifacts_dir).context("Failed to load model artifacts")?;
    let llm = Arc::new(llm_from_env()?);

    let engine = RecommendationEngine::new(catalog, &artifacts, llm).with_top_k(top_k);

    let start = Instant::now();
    let outcome = engine.recommend(&interests).await?;
    println!(
        "{} Pipeline finished in {:?}",
        "✓".green(),
        start.elapsed()
    );

    print_outcome(&outcome, show_candidates);
    Ok(())
}

/// Handle the 'course' command
fn handle_course(catalog: Arc<CourseCatalog>, key: &str) -> Result<()> {
    let course = catalog
        .get(key)
        .ok_or_else(|| anyhow!("Course {} not found", key))?;

    println!("{}", format!("{} - {}", course.key, course.title).bold().blue());
    println!("{}Cluster: {}", "• ".green(), course.cluster);
    println!(
        "{}Minimum credits: {}",
        "• ".green(),
        course.minimum_credits_or_default()
    );
    if course.description.is_empty() {
        println!("{}No description", "• ".cyan());
    } else {
        println!("{}{}", "• ".cyan(), course.description);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(catalog: Arc<CourseCatalog>, title: &str) -> Result<()> {
    let title_lower = title.to_lowercase();

    // Exact title matches first, then substring matches.
    let mut matches: Vec<(&Course, usize)> = catalog
        .iter()
        .filter_map(|course| {
            let course_title = course.title.to_lowercase();
            if course_title == title_lower {
                Some((course, 0))
            } else if course_title.contains(&title_lower) {
                Some((course, 1))
            } else {
                None
            }
        })
        .collect();
    matches.sort_by_key(|&(_, rank)| rank);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("No matching courses");
        return Ok(());
    }
    for (course, _) in matches.iter().take(20) {
        println!(
            "{}: {} [cluster {}] {} credits",
            course.key,
            course.title,
            course.cluster,
            course.minimum_credits_or_default()
        );
    }
    Ok(())
}

/// Format and print one recommendation outcome
fn print_outcome(outcome: &RecommendationOutcome, show_candidates: bool) {
    println!(
        "Preferred workload: {} | cluster {} | keywords: {}",
        outcome.preferred_level.to_string().bold(),
        outcome.cluster,
        outcome.interest_keywords.join(", ")
    );

    if show_candidates {
        println!("{}", "Ranked candidates:".bold().blue());
        for candidate in &outcome.candidates {
            println!(
                "  {:<10} {:<40} sim {:.3}  level {}",
                candidate.key,
                candidate.title,
                candidate.similarity,
                candidate.credit_level_or_default()
            );
        }
    }

    println!("{}", "Recommendations:".bold().blue());
    if outcome.recommendations.is_empty() {
        // Empty is a legal outcome; messaging the user is our job, not the
        // pipeline's.
        println!(
            "No courses matched your interests at the {} workload level.",
            outcome.preferred_level
        );
        return;
    }
    for (i, rec) in outcome.recommendations.iter().enumerate() {
        println!(
            "{}. {} ({}) - similarity {:.2}, {} credits",
            (i + 1).to_string().green(),
            rec.title,
            rec.key,
            rec.similarity,
            rec.minimum_credits.unwrap_or(catalog::DEFAULT_MINIMUM_CREDITS)
        );
        println!("   {}", rec.reasoning);
    }
}
