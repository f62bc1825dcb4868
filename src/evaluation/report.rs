//! Evaluation reporting
//!
//! Aggregated confusion-matrix statistics plus the full per-record result
//! set. Console output previews a capped number of misclassified examples;
//! JSON output preserves every record with full text and evidence.

use crate::detection::models::DetectionMethod;
use serde::{Deserialize, Serialize};

/// Number of misclassified examples previewed in console output
const ERROR_PREVIEW_COUNT: usize = 3;

/// One scored (or unlabeled) record from an evaluation run
///
/// Derived data: recomputed on each run, never persisted as source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Full record text (never truncated here; preview truncation is
    /// display-only)
    pub text: String,
    /// Ground-truth label, `None` for unlabeled records
    pub true_label: Option<u8>,
    /// Predicted label
    pub predicted_label: u8,
    /// Layer that produced the prediction
    pub method: DetectionMethod,
    /// Prediction confidence
    pub confidence: f64,
    /// Whether the prediction matched ground truth; `None` when unlabeled
    pub correct: Option<bool>,
}

/// Binary confusion-matrix counts
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    /// Total scored records
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Overall accuracy, zero when nothing was scored
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.true_positives + self.true_negatives) as f64 / total as f64
    }
}

/// Precision/recall/F1 for one class
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of ground-truth records of this class
    pub support: usize,
}

impl ClassMetrics {
    fn compute(tp: usize, fp: usize, fn_: usize, support: usize) -> Self {
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            precision,
            recall,
            f1,
            support,
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Full evaluation report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Evaluation mode description (e.g. `hybrid (threshold=0.35)`)
    pub mode: String,
    /// Confusion counts over the labeled records
    pub confusion: ConfusionMatrix,
    /// Records that carried no usable ground-truth label
    pub unlabeled_records: usize,
    /// Every evaluated record, in input order, with full text retained
    pub records: Vec<EvaluationRecord>,
}

impl EvaluationReport {
    /// Create an empty report for the given mode
    pub fn new(mode: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            confusion: ConfusionMatrix::default(),
            unlabeled_records: 0,
            records: Vec::new(),
        }
    }

    /// Add one evaluated record, updating confusion counts when labeled
    pub fn add_record(&mut self, record: EvaluationRecord) {
        match record.true_label {
            Some(truth) => match (truth, record.predicted_label) {
                (1, 1) => self.confusion.true_positives += 1,
                (0, 1) => self.confusion.false_positives += 1,
                (0, 0) => self.confusion.true_negatives += 1,
                (1, 0) => self.confusion.false_negatives += 1,
                _ => {}
            },
            None => self.unlabeled_records += 1,
        }
        self.records.push(record);
    }

    /// Total evaluated records (labeled and unlabeled)
    pub fn total_records(&self) -> usize {
        self.records.len()
    }

    /// Metrics for the positive (contains-PII) class
    pub fn positive_metrics(&self) -> ClassMetrics {
        let c = &self.confusion;
        ClassMetrics::compute(
            c.true_positives,
            c.false_positives,
            c.false_negatives,
            c.true_positives + c.false_negatives,
        )
    }

    /// Metrics for the negative class
    pub fn negative_metrics(&self) -> ClassMetrics {
        let c = &self.confusion;
        ClassMetrics::compute(
            c.true_negatives,
            c.false_negatives,
            c.false_positives,
            c.true_negatives + c.false_positives,
        )
    }

    /// F1 for the positive class — the headline score
    pub fn f1_score(&self) -> f64 {
        self.positive_metrics().f1
    }

    /// Misclassified records predicted positive (labeled negative)
    pub fn false_positive_records(&self) -> Vec<&EvaluationRecord> {
        self.records
            .iter()
            .filter(|r| r.correct == Some(false) && r.predicted_label == 1)
            .collect()
    }

    /// Misclassified records predicted negative (labeled positive)
    pub fn false_negative_records(&self) -> Vec<&EvaluationRecord> {
        self.records
            .iter()
            .filter(|r| r.correct == Some(false) && r.predicted_label == 0)
            .collect()
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();
        let positive = self.positive_metrics();
        let negative = self.negative_metrics();
        let c = &self.confusion;

        output.push_str("\n══════════════════════════════════════════════════════\n");
        output.push_str(&format!("  EVALUATION — {}\n", self.mode));
        output.push_str("══════════════════════════════════════════════════════\n\n");

        output.push_str(&format!("  Records evaluated:  {}\n", self.total_records()));
        output.push_str(&format!("  Scored:             {}\n", c.total()));
        output.push_str(&format!("  Unlabeled:          {}\n\n", self.unlabeled_records));

        output.push_str("  Class                precision  recall     f1  support\n");
        output.push_str(&format!(
            "  Sem Dados Pessoais      {:.4}  {:.4}  {:.4}  {:>5}\n",
            negative.precision, negative.recall, negative.f1, negative.support
        ));
        output.push_str(&format!(
            "  Com Dados Pessoais      {:.4}  {:.4}  {:.4}  {:>5}\n\n",
            positive.precision, positive.recall, positive.f1, positive.support
        ));

        output.push_str("  Confusion matrix:\n");
        output.push_str("                    Pred: Sem PII   Pred: Com PII\n");
        output.push_str(&format!(
            "  Real: Sem PII         {:>7}         {:>7}\n",
            c.true_negatives, c.false_positives
        ));
        output.push_str(&format!(
            "  Real: Com PII         {:>7}         {:>7}\n\n",
            c.false_negatives, c.true_positives
        ));

        output.push_str(&format!("  Accuracy: {:.4}\n", c.accuracy()));
        output.push_str(&format!("  F1-Score: {:.4}\n", self.f1_score()));

        let false_positives = self.false_positive_records();
        if !false_positives.is_empty() {
            output.push_str(&format!(
                "\n  False positives ({}):\n",
                false_positives.len()
            ));
            for record in false_positives.iter().take(ERROR_PREVIEW_COUNT) {
                output.push_str(&format!("    - {}\n", preview(&record.text)));
            }
        }

        let false_negatives = self.false_negative_records();
        if !false_negatives.is_empty() {
            output.push_str(&format!(
                "\n  False negatives ({}):\n",
                false_negatives.len()
            ));
            for record in false_negatives.iter().take(ERROR_PREVIEW_COUNT) {
                output.push_str(&format!("    - {}\n", preview(&record.text)));
            }
        }

        output.push_str("\n══════════════════════════════════════════════════════\n");
        output
    }

    /// Format report as JSON, retaining every record in full
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the JSON report to a file
    pub fn write_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self
            .format_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}

/// Truncate long text for console display only
fn preview(text: &str) -> String {
    const MAX: usize = 100;
    if text.chars().count() > MAX {
        let truncated: String = text.chars().take(MAX).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}
