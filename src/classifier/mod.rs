//! Statistical classification layer
//!
//! TF-IDF feature extraction, the soft-voting ensemble, the training
//! procedure and the model artifact store. The fitted model is immutable:
//! retraining produces a new artifact pair that atomically replaces the old
//! one; nothing mutates a loaded model in place.

pub mod ensemble;
pub mod store;
pub mod training;
pub mod vectorizer;

// Re-export main types
pub use ensemble::{ProbabilisticModel, SoftVotingEnsemble};
pub use store::{ModelStore, ENSEMBLE_ARTIFACT, VECTORIZER_ARTIFACT};
pub use training::{train, TrainingSummary};
pub use vectorizer::TfidfVectorizer;

use crate::domain::Result;

/// A fitted classifier model: vectorizer plus ensemble
///
/// Created by [`train`], loaded from a [`ModelStore`], shared read-only
/// across classification calls.
#[derive(Debug, Clone)]
pub struct ClassifierModel {
    vectorizer: TfidfVectorizer,
    ensemble: SoftVotingEnsemble,
}

impl ClassifierModel {
    /// Assemble a model from already-fitted parts (used by tests/fixtures)
    pub fn new(vectorizer: TfidfVectorizer, ensemble: SoftVotingEnsemble) -> Self {
        Self {
            vectorizer,
            ensemble,
        }
    }

    /// Load both artifacts from the store
    ///
    /// Both must be present and well-formed; a missing or corrupt artifact
    /// surfaces as [`TriagemError::ModelUnavailable`](crate::domain::TriagemError::ModelUnavailable).
    pub fn load(store: &ModelStore) -> Result<Self> {
        let vectorizer: TfidfVectorizer = store.load(VECTORIZER_ARTIFACT)?;
        let ensemble: SoftVotingEnsemble = store.load(ENSEMBLE_ARTIFACT)?;
        Ok(Self {
            vectorizer,
            ensemble,
        })
    }

    /// Whether both artifacts exist in the store
    pub fn is_available(store: &ModelStore) -> bool {
        store.exists(VECTORIZER_ARTIFACT) && store.exists(ENSEMBLE_ARTIFACT)
    }

    /// Probability that a text contains PII
    pub fn predict_proba(&self, text: &str) -> f64 {
        let features = self.vectorizer.transform(text);
        self.ensemble.predict_proba(&features)
    }
}
