//! Evaluation harness
//!
//! Replays a labeled corpus through the hybrid detector (or the rule layer
//! alone) and aggregates confusion-matrix statistics. Records with an
//! unknown true label are excluded from scoring but their predictions are
//! still reported.

use crate::detection::models::DetectionMethod;
use crate::detection::HybridDetector;
use crate::domain::LabeledExample;
use crate::evaluation::report::{EvaluationRecord, EvaluationReport};

/// Evaluation mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvaluationMode {
    /// Rule layer only, no statistical fallback
    RuleOnly,
    /// Full hybrid pipeline at the given confidence threshold
    Hybrid { threshold: f64 },
}

impl EvaluationMode {
    fn describe(&self) -> String {
        match self {
            EvaluationMode::RuleOnly => "rule_only".to_string(),
            EvaluationMode::Hybrid { threshold } => format!("hybrid (threshold={threshold})"),
        }
    }
}

/// Evaluate a corpus of records against ground truth
///
/// Record evaluations are independent of each other; the detector is only
/// read, never mutated.
pub fn evaluate(
    detector: &HybridDetector,
    records: &[LabeledExample],
    mode: EvaluationMode,
) -> EvaluationReport {
    let mut report = EvaluationReport::new(mode.describe());

    for example in records {
        let (predicted_label, method, confidence) = match mode {
            EvaluationMode::RuleOnly => {
                let rules = detector.match_rules(&example.text);
                let predicted = u8::from(rules.matched);
                let confidence = if rules.matched { 1.0 } else { 0.0 };
                (predicted, DetectionMethod::Rule, confidence)
            }
            EvaluationMode::Hybrid { threshold } => {
                let result = detector.detect(&example.text, threshold);
                (result.predicted_label(), result.method, result.confidence)
            }
        };

        report.add_record(EvaluationRecord {
            text: example.text.clone(),
            true_label: example.label,
            predicted_label,
            method,
            confidence,
            correct: example.label.map(|truth| truth == predicted_label),
        });
    }

    tracing::info!(
        mode = %report.mode,
        total = report.total_records(),
        f1 = report.f1_score(),
        "Evaluation complete"
    );

    report
}
