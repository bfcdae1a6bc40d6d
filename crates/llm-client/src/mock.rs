//! Deterministic generation-service stub for tests.
//!
//! Replies are configured up front with the builder methods. A raw
//! explanation body routes through the real reply parser, so tests can
//! drive schema failures along the same path a live service would.

use crate::error::{LlmError, Result};
use crate::types::{parse_explanation_reply, CandidateSummary, IntentReply, Recommendation};
use crate::GenerationService;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Configurable stand-in for the generation service.
#[derive(Default)]
pub struct MockGenerationService {
    intent: Option<IntentReply>,
    recommendations: Option<Vec<Recommendation>>,
    raw_explanation: Option<String>,
    intent_calls: AtomicUsize,
    explain_calls: AtomicUsize,
}

impl MockGenerationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed reply for `extract_intent`. Without one, the call fails with
    /// an `Upstream` error (an unconfigured service is an unreachable one).
    pub fn with_intent(mut self, intent: IntentReply) -> Self {
        self.intent = Some(intent);
        self
    }

    /// Fixed reply for `explain`.
    pub fn with_recommendations(mut self, recommendations: Vec<Recommendation>) -> Self {
        self.recommendations = Some(recommendations);
        self
    }

    /// Raw completion text for `explain`, run through the real parser.
    pub fn with_raw_explanation(mut self, raw: impl Into<String>) -> Self {
        self.raw_explanation = Some(raw.into());
        self
    }

    /// How many times `extract_intent` was called.
    pub fn intent_calls(&self) -> usize {
        self.intent_calls.load(Ordering::Relaxed)
    }

    /// How many times `explain` was called.
    pub fn explain_calls(&self) -> usize {
        self.explain_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl GenerationService for MockGenerationService {
    async fn extract_intent(&self, _user_text: &str) -> Result<IntentReply> {
        self.intent_calls.fetch_add(1, Ordering::Relaxed);
        self.intent
            .clone()
            .ok_or_else(|| LlmError::Upstream("mock: no intent reply configured".to_string()))
    }

    async fn explain(
        &self,
        _candidates: &[CandidateSummary],
        _user_text: &str,
    ) -> Result<Vec<Recommendation>> {
        self.explain_calls.fetch_add(1, Ordering::Relaxed);
        if let Some(raw) = &self.raw_explanation {
            return parse_explanation_reply(raw);
        }
        self.recommendations
            .clone()
            .ok_or_else(|| LlmError::Upstream("mock: no explanation configured".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::CreditLevel;

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let mock = MockGenerationService::new().with_intent(IntentReply {
            category: CreditLevel::Standard,
            reasoning: String::new(),
            interest_key_words: vec!["art".to_string()],
        });

        let _ = mock.extract_intent("x").await.unwrap();
        let _ = mock.extract_intent("y").await.unwrap();
        assert_eq!(mock.intent_calls(), 2);
        assert_eq!(mock.explain_calls(), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_calls_fail_upstream() {
        let mock = MockGenerationService::new();
        assert!(matches!(
            mock.extract_intent("x").await,
            Err(LlmError::Upstream(_))
        ));
        assert!(matches!(
            mock.explain(&[], "x").await,
            Err(LlmError::Upstream(_))
        ));
    }

    #[tokio::test]
    async fn test_raw_explanation_exercises_parser() {
        let mock = MockGenerationService::new().with_raw_explanation("not json at all");
        assert!(matches!(
            mock.explain(&[], "x").await,
            Err(LlmError::Schema(_))
        ));
    }
}
