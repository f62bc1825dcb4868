//! L2-regularized logistic regression base learner

use serde::{Deserialize, Serialize};

const LEARNING_RATE: f64 = 0.5;
const L2_PENALTY: f64 = 1e-4;
const MAX_ITERATIONS: usize = 1000;

/// Linear probabilistic model trained by full-batch gradient descent
///
/// Deterministic: no random initialization, fixed iteration count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    bias: f64,
}

impl LogisticRegression {
    /// Fit on a dense feature matrix and binary labels
    pub fn fit(x: &[Vec<f64>], y: &[u8]) -> Self {
        let n_samples = x.len();
        let n_features = x.first().map_or(0, Vec::len);
        let mut weights = vec![0.0; n_features];
        let mut bias = 0.0;

        for _ in 0..MAX_ITERATIONS {
            let mut grad_w = vec![0.0; n_features];
            let mut grad_b = 0.0;

            for (row, &label) in x.iter().zip(y) {
                let error = sigmoid(dot(&weights, row) + bias) - f64::from(label);
                for (g, &value) in grad_w.iter_mut().zip(row) {
                    *g += error * value;
                }
                grad_b += error;
            }

            let scale = LEARNING_RATE / n_samples as f64;
            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= scale * g + LEARNING_RATE * L2_PENALTY * *w;
            }
            bias -= scale * grad_b;
        }

        Self { weights, bias }
    }

    /// Probability of the positive class
    pub fn predict_proba(&self, features: &[f64]) -> f64 {
        sigmoid(dot(&self.weights, features) + self.bias)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
