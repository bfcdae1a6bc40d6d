//! Error types for the generation-service gateway.

use thiserror::Error;

/// Errors from the external text-generation service.
///
/// Connectivity failures and contract violations are separate variants so
/// callers can distinguish an unreachable service from a reply that broke
/// the schema. Every variant is fatal for the current request: there is no
/// retry, no backoff, and no partial recommendation list.
#[derive(Error, Debug)]
pub enum LlmError {
    /// The service is unreachable, timed out, answered with an error
    /// status, or its response envelope could not be decoded.
    #[error("Generation service request failed: {0}")]
    Upstream(String),

    /// The service answered but produced no usable completion.
    #[error("Generation service returned no output")]
    EmptyCompletion,

    /// The completion text could not be parsed as the expected structure.
    #[error("Malformed generation service reply: {0}")]
    Schema(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, LlmError>;
