//! Labeled corpus loading
//!
//! Thin CSV plumbing for training and evaluation datasets. The text column
//! is probed under the names the datasets have shipped with (`texto`,
//! `text`); the `label` column holds `0`/`1`, and anything else is carried
//! through as unlabeled.

use crate::domain::{LabeledExample, Result, TriagemError};
use std::path::Path;

/// Column names probed for the record text, in order
const TEXT_COLUMNS: &[&str] = &["texto", "text"];

/// Column name holding the ground-truth label
const LABEL_COLUMN: &str = "label";

/// Load a labeled corpus from a CSV file
///
/// Requires a text column; the label column is optional per row — rows with
/// an empty or non-binary label become unlabeled examples.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledExample>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        TriagemError::Corpus(format!("cannot open dataset {}: {e}", path.display()))
    })?;

    let headers = reader.headers()?.clone();
    let text_idx = TEXT_COLUMNS
        .iter()
        .find_map(|name| headers.iter().position(|h| h == *name))
        .ok_or_else(|| {
            TriagemError::Corpus(format!(
                "no text column found in {} (expected one of: {})",
                path.display(),
                TEXT_COLUMNS.join(", ")
            ))
        })?;
    let label_idx = headers.iter().position(|h| h == LABEL_COLUMN);

    let mut examples = Vec::new();
    for record in reader.records() {
        let record = record?;
        let Some(text) = record.get(text_idx) else {
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }

        let label = label_idx
            .and_then(|idx| record.get(idx))
            .and_then(parse_label);

        examples.push(LabeledExample {
            text: text.to_string(),
            label,
        });
    }

    if examples.is_empty() {
        return Err(TriagemError::Corpus(format!(
            "dataset {} contains no usable records",
            path.display()
        )));
    }

    tracing::info!(
        path = %path.display(),
        records = examples.len(),
        labeled = examples.iter().filter(|e| e.is_labeled()).count(),
        "Corpus loaded"
    );

    Ok(examples)
}

/// Parse a `0`/`1` label cell; anything else is the unlabeled sentinel
fn parse_label(cell: &str) -> Option<u8> {
    match cell.trim() {
        "0" => Some(0),
        "1" => Some(1),
        _ => None,
    }
}

/// Split a corpus into parallel text/label vectors for training
///
/// Unlabeled examples are dropped — training requires ground truth.
pub fn into_training_pairs(examples: &[LabeledExample]) -> (Vec<String>, Vec<u8>) {
    let mut texts = Vec::new();
    let mut labels = Vec::new();
    for example in examples {
        if let Some(label) = example.label {
            texts.push(example.text.clone());
            labels.push(label);
        }
    }
    (texts, labels)
}
