//! Multinomial naive Bayes base learner

use serde::{Deserialize, Serialize};

const SMOOTHING: f64 = 1.0;

/// Multinomial-event probabilistic model with Lidstone smoothing
///
/// Operates on non-negative feature weights (tf-idf values work as
/// fractional counts, the way scikit-learn's MultinomialNB treats them).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    /// Log prior per class, indexed by label
    class_log_prior: Vec<f64>,
    /// Log feature likelihood per class, indexed by label
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Fit on a dense feature matrix and binary labels
    pub fn fit(x: &[Vec<f64>], y: &[u8]) -> Self {
        let n_samples = x.len();
        let n_features = x.first().map_or(0, Vec::len);

        let mut class_counts = [0usize; 2];
        let mut feature_sums = vec![vec![0.0; n_features]; 2];

        for (row, &label) in x.iter().zip(y) {
            let class = usize::from(label.min(1));
            class_counts[class] += 1;
            for (sum, &value) in feature_sums[class].iter_mut().zip(row) {
                *sum += value;
            }
        }

        let class_log_prior = class_counts
            .iter()
            .map(|&count| ((count.max(1)) as f64 / n_samples as f64).ln())
            .collect();

        let feature_log_prob = feature_sums
            .iter()
            .map(|sums| {
                let total: f64 = sums.iter().sum::<f64>() + SMOOTHING * n_features as f64;
                sums.iter()
                    .map(|&sum| ((sum + SMOOTHING) / total).ln())
                    .collect()
            })
            .collect();

        Self {
            class_log_prior,
            feature_log_prob,
        }
    }

    /// Probability of the positive class
    ///
    /// Joint log-likelihood per class, converted to a probability with a
    /// numerically stable two-class softmax.
    pub fn predict_proba(&self, features: &[f64]) -> f64 {
        let jll = |class: usize| -> f64 {
            self.class_log_prior[class]
                + features
                    .iter()
                    .zip(&self.feature_log_prob[class])
                    .map(|(&value, &log_prob)| value * log_prob)
                    .sum::<f64>()
        };

        let negative = jll(0);
        let positive = jll(1);
        1.0 / (1.0 + (negative - positive).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_data() -> (Vec<Vec<f64>>, Vec<u8>) {
        // Feature 0 dominates the positive class, feature 1 the negative.
        let x = vec![
            vec![3.0, 0.0, 1.0],
            vec![2.0, 1.0, 0.0],
            vec![4.0, 0.0, 0.0],
            vec![0.0, 3.0, 1.0],
            vec![1.0, 2.0, 0.0],
            vec![0.0, 4.0, 1.0],
        ];
        let y = vec![1, 1, 1, 0, 0, 0];
        (x, y)
    }

    #[test]
    fn test_fit_separates_classes() {
        let (x, y) = count_data();
        let model = MultinomialNb::fit(&x, &y);

        assert!(model.predict_proba(&[5.0, 0.0, 0.0]) > 0.5);
        assert!(model.predict_proba(&[0.0, 5.0, 0.0]) < 0.5);
    }

    #[test]
    fn test_probability_bounds() {
        let (x, y) = count_data();
        let model = MultinomialNb::fit(&x, &y);

        for row in &x {
            let p = model.predict_proba(row);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_handles_unseen_features_via_smoothing() {
        let (x, y) = count_data();
        let model = MultinomialNb::fit(&x, &y);

        // Feature 2 never dominates; smoothing keeps the estimate finite.
        let p = model.predict_proba(&[0.0, 0.0, 10.0]);
        assert!(p.is_finite());
    }
}
