//! Gateway to the external text-generation service.
//!
//! This crate provides a Rust client for the two service calls the
//! recommendation pipeline makes:
//! - intent extraction: user free text → workload category + interest
//!   keywords (runs before any local stage)
//! - explanation: filtered candidate list + user text → at most four
//!   recommendation records with per-course reasoning
//!
//! Both calls are synchronous from the pipeline's perspective: one request,
//! one reply, no retry. The service speaks an OpenAI-compatible
//! chat-completions protocol; replies are parsed with strict,
//! schema-validated deserialization that fails closed.

pub mod error;
pub mod mock;
mod prompts;
pub mod types;

pub use error::{LlmError, Result};
pub use mock::MockGenerationService;
pub use types::{CandidateSummary, IntentReply, Recommendation, MAX_RECOMMENDATIONS};

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};
use types::{ChatMessage, ChatRequest, ChatResponse};

/// Sampling temperature for both calls.
const TEMPERATURE: f32 = 0.4;

/// Completion budget for the intent-extraction call.
const INTENT_MAX_TOKENS: u32 = 300;

/// Completion budget for the explanation call.
const EXPLAIN_MAX_TOKENS: u32 = 10_000;

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// The two operations of the external text-generation service.
///
/// The pipeline only ever sees this trait; tests substitute
/// [`MockGenerationService`].
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Extract the preferred workload category and interest keywords from
    /// the user's free text.
    async fn extract_intent(&self, user_text: &str) -> Result<IntentReply>;

    /// Produce per-course reasoning for the filtered candidate set.
    /// Bounded to at most [`MAX_RECOMMENDATIONS`] results.
    async fn explain(
        &self,
        candidates: &[CandidateSummary],
        user_text: &str,
    ) -> Result<Vec<Recommendation>>;
}

/// Configuration for the HTTP generation-service client.
///
/// Endpoint and credentials are owned by the surrounding application; this
/// crate just consumes them.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible API, e.g. "https://llm.example.com/v1"
    pub base_url: String,
    /// Bearer token; optional for local endpoints
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl LlmConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// HTTP client for the generation service.
pub struct LlmClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    /// Build a client with the given configuration.
    pub fn new(config: LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Upstream(format!("failed to build HTTP client: {e}")))?;

        info!(
            "Generation service client: url={}, model={}",
            config.base_url, config.model
        );
        Ok(Self { http, config })
    }

    /// One chat-completion round trip; returns the completion text.
    async fn chat(&self, prompt: String, max_tokens: u32) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompts::SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens,
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let mut req = self.http.post(&url).json(&request);
        if let Some(api_key) = &self.config.api_key {
            req = req.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = req
            .send()
            .await
            .map_err(|e| LlmError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Generation service returned {}: {}", status, body);
            return Err(LlmError::Upstream(format!("HTTP {status}")));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Upstream(format!("undecodable response envelope: {e}")))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(LlmError::EmptyCompletion);
        }
        Ok(content)
    }
}

#[async_trait]
impl GenerationService for LlmClient {
    async fn extract_intent(&self, user_text: &str) -> Result<IntentReply> {
        debug!("Requesting workload category and interest keywords");
        let content = self
            .chat(prompts::intent_prompt(user_text), INTENT_MAX_TOKENS)
            .await?;
        let reply = types::parse_intent_reply(&content)?;
        debug!(
            "Extracted category {} with {} keywords",
            reply.category,
            reply.interest_key_words.len()
        );
        Ok(reply)
    }

    async fn explain(
        &self,
        candidates: &[CandidateSummary],
        user_text: &str,
    ) -> Result<Vec<Recommendation>> {
        debug!("Requesting reasoning for {} candidates", candidates.len());
        let candidates_json = serde_json::to_string_pretty(candidates)
            .map_err(|e| LlmError::Schema(format!("serializing candidates: {e}")))?;

        let content = self
            .chat(
                prompts::explanation_prompt(&candidates_json, user_text),
                EXPLAIN_MAX_TOKENS,
            )
            .await?;
        types::parse_explanation_reply(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::CreditLevel;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(url: &str) -> LlmConfig {
        LlmConfig {
            base_url: url.to_string(),
            api_key: None,
            model: "test-model".to_string(),
            timeout_secs: 5,
        }
    }

    fn chat_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": content } }
            ]
        })
    }

    #[tokio::test]
    async fn test_extract_intent_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({"model": "test-model"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(
                r#"{"category": "High", "reasoning": "lab work", "interest_key_words": ["biology", "cells"]}"#,
            )))
            .mount(&server)
            .await;

        let client = LlmClient::new(config(&server.uri())).unwrap();
        let reply = client.extract_intent("I like biology").await.unwrap();

        assert_eq!(reply.category, CreditLevel::High);
        assert_eq!(reply.keyword_text(), "biology cells");
    }

    #[tokio::test]
    async fn test_http_error_is_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = LlmClient::new(config(&server.uri())).unwrap();
        let result = client.extract_intent("x").await;
        assert!(matches!(result, Err(LlmError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_empty_choices_is_empty_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let client = LlmClient::new(config(&server.uri())).unwrap();
        let result = client.extract_intent("x").await;
        assert!(matches!(result, Err(LlmError::EmptyCompletion)));
    }

    #[tokio::test]
    async fn test_non_json_completion_is_schema_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(chat_body("The user prefers a standard workload.")),
            )
            .mount(&server)
            .await;

        let client = LlmClient::new(config(&server.uri())).unwrap();
        let result = client.extract_intent("x").await;
        assert!(matches!(result, Err(LlmError::Schema(_))));
    }

    #[tokio::test]
    async fn test_explain_parses_and_bounds_reply() {
        let items: Vec<String> = (0..5)
            .map(|i| {
                format!(
                    r#"{{"key": "C{i}", "title": "T", "description": "D", "minimum_credits": 3, "similarity": 0.9, "reasoning": "R"}}"#
                )
            })
            .collect();
        let content = format!("```json\n[{}]\n```", items.join(","));

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(&content)))
            .mount(&server)
            .await;

        let client = LlmClient::new(config(&server.uri())).unwrap();
        let candidates = vec![CandidateSummary {
            key: "C0".to_string(),
            title: "T".to_string(),
            description: "D".to_string(),
            minimum_credits: 3.0,
            similarity: 0.9,
        }];
        let recommendations = client.explain(&candidates, "biology").await.unwrap();

        assert_eq!(recommendations.len(), MAX_RECOMMENDATIONS);
        assert_eq!(recommendations[0].key, "C0");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_upstream() {
        // Port 1 is never listening.
        let client = LlmClient::new(config("http://127.0.0.1:1")).unwrap();
        let result = client.extract_intent("x").await;
        assert!(matches!(result, Err(LlmError::Upstream(_))));
    }
}
