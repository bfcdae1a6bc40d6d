//! Wire types for the chat-completions contract and the structured reply
//! schemas, plus the fail-closed reply parsers.
//!
//! Reply parsing is strict serde deserialization: a missing required field
//! or a non-JSON body is a `Schema` error, never a guessed default. The
//! single concession to real model output is stripping a Markdown code
//! fence around an otherwise-valid JSON body.

use crate::error::{LlmError, Result};
use catalog::CreditLevel;
use serde::{Deserialize, Serialize};

/// Hard cap on recommendations returned per request.
pub const MAX_RECOMMENDATIONS: usize = 4;

// ---------------------------------------------------------------------------
// Chat-completions envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoiceMessage {
    #[serde(default)]
    pub content: String,
}

// ---------------------------------------------------------------------------
// Structured replies
// ---------------------------------------------------------------------------

/// Parsed reply of the intent-extraction call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentReply {
    /// Preferred workload category; drives the level filter
    pub category: CreditLevel,
    /// Why the category was chosen; informational only
    pub reasoning: String,
    /// Extracted + suggested interest keywords, in reply order
    pub interest_key_words: Vec<String>,
}

impl IntentReply {
    /// Space-joined keywords: the user text the vectorizer consumes.
    pub fn keyword_text(&self) -> String {
        self.interest_key_words.join(" ")
    }
}

/// One candidate as presented to the service in the explanation request.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateSummary {
    pub key: String,
    pub title: String,
    pub description: String,
    pub minimum_credits: f32,
    /// Rounded to 2 decimals for the request payload
    pub similarity: f32,
}

/// Terminal recommendation record parsed from the explanation reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub key: String,
    pub title: String,
    /// Possibly summarized by the service when the original is long
    pub description: String,
    #[serde(default)]
    pub minimum_credits: Option<f32>,
    /// As echoed (and rounded) by the service
    pub similarity: f32,
    pub reasoning: String,
}

// ---------------------------------------------------------------------------
// Reply parsing
// ---------------------------------------------------------------------------

pub(crate) fn parse_intent_reply(content: &str) -> Result<IntentReply> {
    serde_json::from_str(strip_code_fences(content))
        .map_err(|e| LlmError::Schema(format!("intent reply: {e}")))
}

pub(crate) fn parse_explanation_reply(content: &str) -> Result<Vec<Recommendation>> {
    let mut recommendations: Vec<Recommendation> =
        serde_json::from_str(strip_code_fences(content))
            .map_err(|e| LlmError::Schema(format!("explanation reply: {e}")))?;

    // The prompt caps the list, but the bound is ours to enforce.
    recommendations.truncate(MAX_RECOMMENDATIONS);
    Ok(recommendations)
}

/// Strip a Markdown code fence wrapped around a JSON body.
fn strip_code_fences(s: &str) -> &str {
    let s = s.trim();
    let Some(inner) = s.strip_prefix("```") else {
        return s;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_intent_reply() {
        let reply = parse_intent_reply(
            r#"{"category": "High", "reasoning": "lab-heavy interests", "interest_key_words": ["biology", "cells"]}"#,
        )
        .unwrap();

        assert_eq!(reply.category, CreditLevel::High);
        assert_eq!(reply.interest_key_words.len(), 2);
        assert_eq!(reply.keyword_text(), "biology cells");
    }

    #[test]
    fn test_parse_intent_reply_with_code_fence() {
        let content = "```json\n{\"category\": \"Low\", \"reasoning\": \"r\", \"interest_key_words\": []}\n```";
        let reply = parse_intent_reply(content).unwrap();
        assert_eq!(reply.category, CreditLevel::Low);
    }

    #[test]
    fn test_parse_intent_reply_not_json() {
        let result = parse_intent_reply("I'd say the workload is Standard.");
        assert!(matches!(result, Err(LlmError::Schema(_))));
    }

    #[test]
    fn test_parse_intent_reply_missing_field() {
        // No interest_key_words: must fail closed, not default.
        let result = parse_intent_reply(r#"{"category": "Low", "reasoning": "r"}"#);
        assert!(matches!(result, Err(LlmError::Schema(_))));
    }

    #[test]
    fn test_parse_intent_reply_unknown_category() {
        let result = parse_intent_reply(
            r#"{"category": "Medium", "reasoning": "r", "interest_key_words": []}"#,
        );
        assert!(matches!(result, Err(LlmError::Schema(_))));
    }

    fn recommendation_json(key: &str) -> String {
        format!(
            r#"{{"key": "{key}", "title": "T", "description": "D", "minimum_credits": 3.0, "similarity": 0.82, "reasoning": "Matches your interests."}}"#
        )
    }

    #[test]
    fn test_parse_explanation_reply() {
        let content = format!("[{}]", recommendation_json("BIO101"));
        let recommendations = parse_explanation_reply(&content).unwrap();
        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].key, "BIO101");
        assert!((recommendations[0].similarity - 0.82).abs() < 1e-6);
    }

    #[test]
    fn test_parse_explanation_reply_truncates_to_four() {
        let items: Vec<String> = (0..6).map(|i| recommendation_json(&format!("C{i}"))).collect();
        let content = format!("[{}]", items.join(","));

        let recommendations = parse_explanation_reply(&content).unwrap();
        assert_eq!(recommendations.len(), MAX_RECOMMENDATIONS);
        assert_eq!(recommendations[0].key, "C0");
    }

    #[test]
    fn test_parse_explanation_reply_missing_credits_defaults_to_none() {
        let content = r#"[{"key": "K", "title": "T", "description": "D", "similarity": 0.5, "reasoning": "R"}]"#;
        let recommendations = parse_explanation_reply(content).unwrap();
        assert_eq!(recommendations[0].minimum_credits, None);
    }

    #[test]
    fn test_parse_explanation_reply_not_an_array() {
        let result = parse_explanation_reply(&recommendation_json("BIO101"));
        assert!(matches!(result, Err(LlmError::Schema(_))));
    }

    #[test]
    fn test_strip_code_fences_passthrough() {
        assert_eq!(strip_code_fences("  {\"a\": 1} "), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```{\"a\": 1}```"), "{\"a\": 1}");
    }
}
