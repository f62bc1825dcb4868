//! Hybrid decision orchestrator
//!
//! The runtime classification entry point. The rule layer runs first and
//! short-circuits the statistical layer entirely; rules are treated as
//! ground truth. When no rule fires, the ensemble probability is compared
//! against a caller-supplied threshold. A missing or unloadable model
//! degrades to a safe negative result instead of failing the caller.

use crate::classifier::{ClassifierModel, ModelStore};
use crate::config::TriagemConfig;
use crate::detection::audit::AuditLogger;
use crate::detection::models::DetectionResult;
use crate::detection::rules::{patterns::RuleRegistry, RuleSet};
use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::{Arc, OnceLock};

/// Default confidence threshold for the statistical layer
pub const DEFAULT_THRESHOLD: f64 = 0.35;

/// Hybrid rule + statistical PII detector
///
/// # Thread Safety
///
/// The detector is thread-safe and can be shared across threads using
/// `Arc`. The classifier model is loaded lazily, at most once on success,
/// and shared read-only afterwards; a failed load is not cached, so a model
/// trained after process start is picked up on the next call.
pub struct HybridDetector {
    rules: RuleSet,
    store: ModelStore,
    audit_logger: Option<AuditLogger>,
    model: OnceLock<Arc<ClassifierModel>>,
}

impl HybridDetector {
    /// Create a detector from configuration
    ///
    /// Loads the pattern library (built-in or the configured override),
    /// binds the model store to the configured model directory and opens
    /// the audit log if enabled.
    pub fn new(config: &TriagemConfig) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let rules = if let Some(ref pattern_path) = config.pattern_library {
            RuleSet::with_registry(RuleRegistry::from_file(pattern_path)?)
        } else {
            RuleSet::new()?
        };

        let audit_logger = if config.audit.enabled {
            Some(AuditLogger::new(config.audit.log_path.clone())?)
        } else {
            None
        };

        Ok(Self {
            rules,
            store: ModelStore::new(&config.model_dir),
            audit_logger,
            model: OnceLock::new(),
        })
    }

    /// Create a detector over an explicit store with built-in rules
    pub fn with_store(store: ModelStore) -> Result<Self> {
        Ok(Self {
            rules: RuleSet::new()?,
            store,
            audit_logger: None,
            model: OnceLock::new(),
        })
    }

    /// Create a detector with a pre-loaded fixture model
    ///
    /// Lets tests substitute a model without touching the filesystem.
    pub fn with_model(store: ModelStore, model: ClassifierModel) -> Result<Self> {
        let detector = Self::with_store(store)?;
        let _ = detector.model.set(Arc::new(model));
        Ok(detector)
    }

    /// Classify one text record
    ///
    /// Never fails: malformed input and missing models degrade to a
    /// negative result rather than an error, because a false negative is
    /// less damaging to the calling system's availability than a crash.
    pub fn detect(&self, text: &str, threshold: f64) -> DetectionResult {
        let rule_result = self.rules.match_text(text);

        let result = if rule_result.matched {
            tracing::debug!(
                categories = ?rule_result.categories,
                "Rule layer matched"
            );
            DetectionResult::from_rules(rule_result)
        } else {
            match self.model() {
                Ok(model) => {
                    let probability = model.predict_proba(text);
                    tracing::debug!(probability, threshold, "Statistical layer consulted");
                    DetectionResult::from_probability(probability, threshold)
                }
                Err(reason) => {
                    tracing::warn!(%reason, "Statistical layer unavailable, degrading");
                    DetectionResult::unavailable(reason.to_string())
                }
            }
        };

        if let Some(ref logger) = self.audit_logger {
            if let Err(e) = logger.log_detection(&result) {
                tracing::warn!(error = %e, "Failed to write audit entry");
            }
        }

        result
    }

    /// Classify with the default threshold
    pub fn detect_default(&self, text: &str) -> DetectionResult {
        self.detect(text, DEFAULT_THRESHOLD)
    }

    /// Run the rule layer alone, bypassing the statistical fallback
    ///
    /// Used by the evaluation harness's rule-only mode.
    pub fn match_rules(&self, text: &str) -> crate::detection::models::RuleResult {
        self.rules.match_text(text)
    }

    /// Classify a JSON value as supplied by a request layer
    ///
    /// Non-string values go through the rule layer's empty match and then
    /// the degraded/statistical path is skipped entirely: there is no text
    /// to vectorize, so the record is reported as PII-free.
    pub fn detect_value(&self, value: &Value, threshold: f64) -> DetectionResult {
        match value {
            Value::String(text) => self.detect(text, threshold),
            _ => {
                tracing::debug!("Non-string input, returning empty result");
                DetectionResult::unavailable("input is not text")
            }
        }
    }

    /// Lazily load the shared classifier model
    fn model(&self) -> crate::domain::Result<&Arc<ClassifierModel>> {
        if let Some(model) = self.model.get() {
            return Ok(model);
        }

        let loaded = Arc::new(ClassifierModel::load(&self.store)?);
        Ok(self.model.get_or_init(|| loaded))
    }
}
