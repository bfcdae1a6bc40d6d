//! Per-request candidate records.
//!
//! A `RankedCandidate` is born in the similarity ranker and flows through
//! classification and level filtering as a new record each time; the
//! catalog itself is never written to.

use catalog::{ClusterId, Course, CreditLevel};
use serde::Serialize;

/// A course that survived cluster routing and similarity ranking.
///
/// `predicted_credit_level` is populated by the classifier stage; the
/// documented default for an absent label is `Standard`.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub key: String,
    pub title: String,
    pub description: String,
    pub minimum_credits: Option<f32>,
    pub cluster: ClusterId,
    /// Cosine similarity to the user vector, in [0, 1]
    pub similarity: f32,
    pub predicted_credit_level: Option<CreditLevel>,
}

impl RankedCandidate {
    pub fn from_course(course: &Course, similarity: f32) -> Self {
        Self {
            key: course.key.clone(),
            title: course.title.clone(),
            description: course.description.clone(),
            minimum_credits: course.minimum_credits,
            cluster: course.cluster,
            similarity,
            predicted_credit_level: None,
        }
    }

    /// Predicted level with the documented default applied (`Standard`).
    pub fn credit_level_or_default(&self) -> CreditLevel {
        self.predicted_credit_level.unwrap_or(CreditLevel::Standard)
    }

    /// Minimum credits with the documented default applied (1.0).
    pub fn minimum_credits_or_default(&self) -> f32 {
        self.minimum_credits
            .unwrap_or(catalog::DEFAULT_MINIMUM_CREDITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let course = Course {
            key: "BIO101".to_string(),
            title: "Intro Biology".to_string(),
            description: String::new(),
            minimum_credits: None,
            cluster: 2,
        };
        let candidate = RankedCandidate::from_course(&course, 0.4);

        assert_eq!(candidate.predicted_credit_level, None);
        assert_eq!(candidate.credit_level_or_default(), CreditLevel::Standard);
        assert_eq!(candidate.minimum_credits_or_default(), 1.0);
    }
}
