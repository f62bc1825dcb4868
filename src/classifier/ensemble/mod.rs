//! Soft-voting ensemble classifier
//!
//! Three base learners with different bias/variance profiles are trained
//! independently on the same feature matrix; the ensemble probability is the
//! unweighted mean of their positive-class probabilities. Base learners are
//! swappable behind the [`ProbabilisticModel`] trait.

pub mod bagging;
pub mod logistic;
pub mod naive_bayes;

use bagging::BaggedTrees;
use logistic::LogisticRegression;
use naive_bayes::MultinomialNb;
use serde::{Deserialize, Serialize};

/// Seed for the bagged learner, fixed for reproducible training runs
const BAGGING_SEED: u64 = 42;

/// Interface every probability estimator in the ensemble implements
pub trait ProbabilisticModel: Send + Sync {
    /// Probability that the record belongs to the positive (PII) class
    fn predict_proba(&self, features: &[f64]) -> f64;
}

/// A fitted base learner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BaseLearner {
    /// Linear probabilistic model
    Logistic(LogisticRegression),
    /// Bagged decision-tree ensemble
    Bagging(BaggedTrees),
    /// Multinomial-event probabilistic model
    NaiveBayes(MultinomialNb),
}

impl ProbabilisticModel for BaseLearner {
    fn predict_proba(&self, features: &[f64]) -> f64 {
        match self {
            BaseLearner::Logistic(model) => model.predict_proba(features),
            BaseLearner::Bagging(model) => model.predict_proba(features),
            BaseLearner::NaiveBayes(model) => model.predict_proba(features),
        }
    }
}

/// Soft-voting ensemble over the fitted base learners
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftVotingEnsemble {
    learners: Vec<BaseLearner>,
}

impl SoftVotingEnsemble {
    /// Fit the default three-learner lineup on a feature matrix
    pub fn fit(x: &[Vec<f64>], y: &[u8]) -> Self {
        let learners = vec![
            BaseLearner::Logistic(LogisticRegression::fit(x, y)),
            BaseLearner::Bagging(BaggedTrees::fit(x, y, BAGGING_SEED)),
            BaseLearner::NaiveBayes(MultinomialNb::fit(x, y)),
        ];

        Self { learners }
    }

    /// Number of base learners
    pub fn n_learners(&self) -> usize {
        self.learners.len()
    }
}

impl ProbabilisticModel for SoftVotingEnsemble {
    /// Unweighted mean of the base learners' positive-class probabilities
    fn predict_proba(&self, features: &[f64]) -> f64 {
        if self.learners.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .learners
            .iter()
            .map(|learner| learner.predict_proba(features))
            .sum();
        total / self.learners.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_data() -> (Vec<Vec<f64>>, Vec<u8>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..15 {
            let jitter = (i % 5) as f64 * 0.02;
            x.push(vec![0.9 - jitter, 0.05, 0.0]);
            y.push(1);
            x.push(vec![0.05, 0.9 - jitter, 0.1]);
            y.push(0);
        }
        (x, y)
    }

    #[test]
    fn test_ensemble_has_three_learners() {
        let (x, y) = separable_data();
        let ensemble = SoftVotingEnsemble::fit(&x, &y);
        assert_eq!(ensemble.n_learners(), 3);
    }

    #[test]
    fn test_ensemble_separates_classes() {
        let (x, y) = separable_data();
        let ensemble = SoftVotingEnsemble::fit(&x, &y);

        assert!(ensemble.predict_proba(&[0.9, 0.0, 0.0]) > 0.5);
        assert!(ensemble.predict_proba(&[0.0, 0.9, 0.0]) < 0.5);
    }

    #[test]
    fn test_ensemble_probability_is_mean_of_learners() {
        let (x, y) = separable_data();
        let ensemble = SoftVotingEnsemble::fit(&x, &y);

        let probe = vec![0.5, 0.5, 0.0];
        let mean: f64 = ensemble
            .learners
            .iter()
            .map(|l| l.predict_proba(&probe))
            .sum::<f64>()
            / 3.0;
        assert!((ensemble.predict_proba(&probe) - mean).abs() < 1e-12);
    }

    #[test]
    fn test_ensemble_roundtrips_through_json() {
        let (x, y) = separable_data();
        let ensemble = SoftVotingEnsemble::fit(&x, &y);
        let probe = vec![0.8, 0.1, 0.0];
        let before = ensemble.predict_proba(&probe);

        let json = serde_json::to_string(&ensemble).unwrap();
        let restored: SoftVotingEnsemble = serde_json::from_str(&json).unwrap();

        assert_eq!(before, restored.predict_proba(&probe));
    }
}
