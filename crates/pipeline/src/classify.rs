//! Credit-level prediction for ranked candidates.
//!
//! Each candidate's description is vectorized with the same fitted
//! vectorizer that produced the user vector; that vector is the
//! classifier's feature input. Classifier failures are fatal for the
//! request, and a candidate is never silently labeled.

use crate::candidate::RankedCandidate;
use models::{ClassifyWorkload, Result, Vectorize};
use std::sync::Arc;
use tracing::debug;

/// Pipeline stage that populates `predicted_credit_level` on every
/// candidate, returning new records.
#[derive(Clone)]
pub struct CreditLevelStage {
    vectorizer: Arc<dyn Vectorize>,
    classifier: Arc<dyn ClassifyWorkload>,
}

impl CreditLevelStage {
    pub fn new(vectorizer: Arc<dyn Vectorize>, classifier: Arc<dyn ClassifyWorkload>) -> Self {
        Self {
            vectorizer,
            classifier,
        }
    }

    /// Predict a workload label for each candidate.
    ///
    /// Order and membership are preserved; only the predicted level is
    /// added. The first classifier error aborts the whole batch.
    pub fn predict_levels(
        &self,
        candidates: Vec<RankedCandidate>,
    ) -> Result<Vec<RankedCandidate>> {
        let total = candidates.len();
        let labeled = candidates
            .into_iter()
            .map(|mut candidate| {
                let features = self.vectorizer.vectorize(&candidate.description);
                let level = self.classifier.classify_workload(&features)?;
                candidate.predicted_credit_level = Some(level);
                Ok(candidate)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Predicted credit levels for {} candidates", total);
        Ok(labeled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Course, CreditLevel};
    use models::{CreditLevelClassifier, SparseVector, TfidfVectorizer};
    use std::collections::HashMap;

    fn vectorizer() -> Arc<dyn Vectorize> {
        let vocabulary = HashMap::from([
            ("seminar".to_string(), 0),
            ("laboratory".to_string(), 1),
        ]);
        Arc::new(TfidfVectorizer::new(vocabulary, vec![1.0, 1.0]).unwrap())
    }

    /// "seminar" votes Low, "laboratory" votes High, otherwise Standard.
    fn classifier() -> Arc<dyn ClassifyWorkload> {
        Arc::new(
            CreditLevelClassifier::new(
                vec![CreditLevel::Low, CreditLevel::Standard, CreditLevel::High],
                vec![vec![2.0, 0.0], vec![0.0, 0.0], vec![0.0, 2.0]],
                vec![0.0, 0.5, 0.0],
            )
            .unwrap(),
        )
    }

    fn candidate(key: &str, description: &str) -> RankedCandidate {
        RankedCandidate::from_course(
            &Course {
                key: key.to_string(),
                title: key.to_string(),
                description: description.to_string(),
                minimum_credits: None,
                cluster: 0,
            },
            0.5,
        )
    }

    #[test]
    fn test_levels_populated() {
        let stage = CreditLevelStage::new(vectorizer(), classifier());
        let labeled = stage
            .predict_levels(vec![
                candidate("A", "weekly seminar"),
                candidate("B", "laboratory sessions"),
                candidate("C", ""),
            ])
            .unwrap();

        assert_eq!(labeled[0].predicted_credit_level, Some(CreditLevel::Low));
        assert_eq!(labeled[1].predicted_credit_level, Some(CreditLevel::High));
        assert_eq!(
            labeled[2].predicted_credit_level,
            Some(CreditLevel::Standard)
        );
    }

    #[test]
    fn test_order_preserved() {
        let stage = CreditLevelStage::new(vectorizer(), classifier());
        let labeled = stage
            .predict_levels(vec![candidate("X", "seminar"), candidate("Y", "seminar")])
            .unwrap();
        let keys: Vec<_> = labeled.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["X", "Y"]);
    }

    #[test]
    fn test_classifier_failure_aborts_batch() {
        /// Stub classifier that rejects every feature vector.
        struct Broken;

        impl ClassifyWorkload for Broken {
            fn classify_workload(&self, features: &SparseVector) -> Result<CreditLevel> {
                Err(models::ModelError::FeatureShape {
                    expected: 99,
                    found: features.dims(),
                })
            }
        }

        let stage = CreditLevelStage::new(vectorizer(), Arc::new(Broken));
        let result = stage.predict_levels(vec![candidate("A", "seminar")]);
        assert!(matches!(
            result,
            Err(models::ModelError::FeatureShape { .. })
        ));
    }

    #[test]
    fn test_empty_batch() {
        let stage = CreditLevelStage::new(vectorizer(), classifier());
        assert!(stage.predict_levels(Vec::new()).unwrap().is_empty());
    }
}
