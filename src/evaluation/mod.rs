//! Evaluation harness and reporting
//!
//! Batch scoring of labeled corpora against ground truth, with
//! confusion-matrix statistics, per-class precision/recall/F1 and
//! misclassification analysis.

pub mod harness;
pub mod report;

// Re-export main types
pub use harness::{evaluate, EvaluationMode};
pub use report::{ClassMetrics, ConfusionMatrix, EvaluationRecord, EvaluationReport};
