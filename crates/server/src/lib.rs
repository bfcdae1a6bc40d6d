//! Server crate for the course recommendation engine.
//!
//! Contains the engine that coordinates all components of the
//! recommendation pipeline into one sequential request.

pub mod engine;

pub use engine::{EngineError, RecommendationEngine, RecommendationOutcome};
