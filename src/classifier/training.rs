//! Model training procedure
//!
//! Fits the vectorizer and ensemble on a labeled corpus, reports 5-fold
//! cross-validated F1, refits on the full corpus and persists both
//! artifacts. Training is the only writer of model artifacts.

use crate::classifier::ensemble::{ProbabilisticModel, SoftVotingEnsemble};
use crate::classifier::store::{ModelStore, ENSEMBLE_ARTIFACT, VECTORIZER_ARTIFACT};
use crate::classifier::vectorizer::TfidfVectorizer;
use crate::domain::{Result, TriagemError};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Number of cross-validation folds
const CV_FOLDS: usize = 5;

/// Seed for the cross-validation shuffle
const CV_SEED: u64 = 42;

/// Decision cutoff used when scoring cross-validation folds
const CV_DECISION_THRESHOLD: f64 = 0.5;

/// Summary of a completed training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Corpus size
    pub n_documents: usize,
    /// Fitted vocabulary size
    pub n_features: usize,
    /// F1 score per cross-validation fold
    pub cv_f1_scores: Vec<f64>,
    /// Mean cross-validated F1
    pub cv_f1_mean: f64,
    /// Standard deviation of the fold F1 scores
    pub cv_f1_std: f64,
    /// When the model was trained
    pub trained_at: DateTime<Utc>,
}

/// Train and persist a classifier model
///
/// Validates the corpus before any fitting: with fewer than two distinct
/// label values cross-validation is undefined and no artifact is written.
/// On success both artifacts are atomically replaced in the store.
pub fn train(texts: &[String], labels: &[u8], store: &ModelStore) -> Result<TrainingSummary> {
    if texts.len() != labels.len() {
        return Err(TriagemError::InvalidInput(format!(
            "corpus size mismatch: {} texts vs {} labels",
            texts.len(),
            labels.len()
        )));
    }

    let has_positive = labels.contains(&1);
    let has_negative = labels.contains(&0);
    if !(has_positive && has_negative) {
        return Err(TriagemError::InsufficientData(
            "training requires at least two distinct label values".to_string(),
        ));
    }

    tracing::info!(n_documents = texts.len(), "Fitting TF-IDF vectorizer");
    let vectorizer = TfidfVectorizer::fit(texts);
    let matrix = vectorizer.transform_all(texts);
    tracing::info!(
        n_features = vectorizer.vocabulary_size(),
        "Vectorizer fitted"
    );

    let cv_f1_scores = cross_validate(&matrix, labels);
    let cv_f1_mean = mean(&cv_f1_scores);
    let cv_f1_std = std_dev(&cv_f1_scores, cv_f1_mean);
    tracing::info!(cv_f1_mean, cv_f1_std, "Cross-validation complete");

    // The reported scores come from fold models; the persisted model is
    // refit on the entire corpus.
    let ensemble = SoftVotingEnsemble::fit(&matrix, labels);

    store.save(VECTORIZER_ARTIFACT, &vectorizer)?;
    store.save(ENSEMBLE_ARTIFACT, &ensemble)?;
    tracing::info!(model_dir = %store.dir().display(), "Model artifacts persisted");

    Ok(TrainingSummary {
        n_documents: texts.len(),
        n_features: vectorizer.vocabulary_size(),
        cv_f1_scores,
        cv_f1_mean,
        cv_f1_std,
        trained_at: Utc::now(),
    })
}

/// Shuffled k-fold cross-validation on F1, for reporting only
fn cross_validate(matrix: &[Vec<f64>], labels: &[u8]) -> Vec<f64> {
    let n = matrix.len();
    let folds = CV_FOLDS.min(n);
    if folds < 2 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut StdRng::seed_from_u64(CV_SEED));

    let mut scores = Vec::with_capacity(folds);
    for fold in 0..folds {
        let holdout: Vec<usize> = order
            .iter()
            .copied()
            .skip(fold)
            .step_by(folds)
            .collect();
        let training: Vec<usize> = order
            .iter()
            .copied()
            .filter(|i| !holdout.contains(i))
            .collect();

        let train_x: Vec<Vec<f64>> = training.iter().map(|&i| matrix[i].clone()).collect();
        let train_y: Vec<u8> = training.iter().map(|&i| labels[i]).collect();

        // A fold whose training split collapses to a single class is skipped;
        // the final model is unaffected either way.
        if !(train_y.contains(&0) && train_y.contains(&1)) {
            continue;
        }

        let model = SoftVotingEnsemble::fit(&train_x, &train_y);
        let y_true: Vec<u8> = holdout.iter().map(|&i| labels[i]).collect();
        let y_pred: Vec<u8> = holdout
            .iter()
            .map(|&i| u8::from(model.predict_proba(&matrix[i]) >= CV_DECISION_THRESHOLD))
            .collect();

        scores.push(f1_score(&y_true, &y_pred));
    }

    scores
}

/// Binary F1 for the positive class, zero when undefined
fn f1_score(y_true: &[u8], y_pred: &[u8]) -> f64 {
    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut fn_ = 0usize;

    for (&truth, &pred) in y_true.iter().zip(y_pred) {
        match (truth, pred) {
            (1, 1) => tp += 1,
            (0, 1) => fp += 1,
            (1, 0) => fn_ += 1,
            _ => {}
        }
    }

    if 2 * tp + fp + fn_ == 0 {
        return 0.0;
    }
    2.0 * tp as f64 / (2 * tp + fp + fn_) as f64
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
