//! Bootstrap-aggregated decision tree base learner

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const N_ESTIMATORS: usize = 100;
const MAX_DEPTH: usize = 10;
const MIN_SAMPLES_SPLIT: usize = 2;

/// One node of a fitted CART tree
#[derive(Debug, Clone, Serialize, Deserialize)]
enum TreeNode {
    Leaf {
        probability: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    fn predict(&self, features: &[f64]) -> f64 {
        match self {
            TreeNode::Leaf { probability } => *probability,
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if features.get(*feature).copied().unwrap_or(0.0) <= *threshold {
                    left.predict(features)
                } else {
                    right.predict(features)
                }
            }
        }
    }
}

/// Bagged ensemble of Gini-split decision trees
///
/// Each tree is fitted on a bootstrap sample of the corpus with a random
/// sqrt-sized feature subset considered per split. The RNG is seeded so
/// fitting is reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaggedTrees {
    trees: Vec<TreeNode>,
}

impl BaggedTrees {
    /// Fit on a dense feature matrix and binary labels
    pub fn fit(x: &[Vec<f64>], y: &[u8], seed: u64) -> Self {
        let n_samples = x.len();
        let n_features = x.first().map_or(0, Vec::len);
        let mut rng = StdRng::seed_from_u64(seed);

        let trees = (0..N_ESTIMATORS)
            .map(|_| {
                let sample: Vec<usize> =
                    (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();
                build_node(x, y, &sample, n_features, 0, &mut rng)
            })
            .collect();

        Self { trees }
    }

    /// Probability of the positive class: mean of per-tree leaf estimates
    pub fn predict_proba(&self, features: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let total: f64 = self.trees.iter().map(|t| t.predict(features)).sum();
        total / self.trees.len() as f64
    }
}

fn build_node(
    x: &[Vec<f64>],
    y: &[u8],
    indices: &[usize],
    n_features: usize,
    depth: usize,
    rng: &mut StdRng,
) -> TreeNode {
    let positives = indices.iter().filter(|&&i| y[i] == 1).count();
    let probability = positives as f64 / indices.len() as f64;

    let is_pure = positives == 0 || positives == indices.len();
    if is_pure || depth >= MAX_DEPTH || indices.len() < MIN_SAMPLES_SPLIT {
        return TreeNode::Leaf { probability };
    }

    let Some((feature, threshold)) = best_split(x, y, indices, n_features, rng) else {
        return TreeNode::Leaf { probability };
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| x[i][feature] <= threshold);

    if left_idx.is_empty() || right_idx.is_empty() {
        return TreeNode::Leaf { probability };
    }

    TreeNode::Split {
        feature,
        threshold,
        left: Box::new(build_node(x, y, &left_idx, n_features, depth + 1, rng)),
        right: Box::new(build_node(x, y, &right_idx, n_features, depth + 1, rng)),
    }
}

/// Pick the Gini-optimal split over a random sqrt-sized feature subset
fn best_split(
    x: &[Vec<f64>],
    y: &[u8],
    indices: &[usize],
    n_features: usize,
    rng: &mut StdRng,
) -> Option<(usize, f64)> {
    if n_features == 0 {
        return None;
    }

    let n_candidates = (n_features as f64).sqrt().ceil() as usize;
    let candidates = rand::seq::index::sample(rng, n_features, n_candidates.min(n_features));

    let parent_gini = gini(y, indices);
    let mut best: Option<(usize, f64, f64)> = None;

    for feature in candidates {
        let mut values: Vec<(f64, u8)> = indices.iter().map(|&i| (x[i][feature], y[i])).collect();
        values.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let total = values.len();
        let total_pos: usize = values.iter().filter(|(_, label)| *label == 1).count();
        let mut left_pos = 0usize;

        for split_at in 1..total {
            if values[split_at - 1].1 == 1 {
                left_pos += 1;
            }
            // Cannot split between equal values.
            if values[split_at - 1].0 == values[split_at].0 {
                continue;
            }

            let left_n = split_at;
            let right_n = total - split_at;
            let right_pos = total_pos - left_pos;

            let weighted = (left_n as f64 * gini_counts(left_pos, left_n)
                + right_n as f64 * gini_counts(right_pos, right_n))
                / total as f64;
            let gain = parent_gini - weighted;

            if gain > 1e-12 && best.map_or(true, |(_, _, g)| gain > g) {
                let threshold = (values[split_at - 1].0 + values[split_at].0) / 2.0;
                best = Some((feature, threshold, gain));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}

fn gini(y: &[u8], indices: &[usize]) -> f64 {
    let positives = indices.iter().filter(|&&i| y[i] == 1).count();
    gini_counts(positives, indices.len())
}

fn gini_counts(positives: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positives as f64 / total as f64;
    2.0 * p * (1.0 - p)
}
