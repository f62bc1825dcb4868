//! Corpus record types
//!
//! Labeled text records as supplied by corpus collaborators (CSV datasets,
//! request-handling layers). A record's label may be unknown: rows without a
//! usable label are carried through with `label: None` so predictions can
//! still be reported for them.

use serde::{Deserialize, Serialize};

/// Positive class label: the record contains personal data.
pub const LABEL_PII: u8 = 1;

/// Negative class label: the record contains no personal data.
pub const LABEL_CLEAN: u8 = 0;

/// One text record with an optional ground-truth label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledExample {
    /// Raw record text
    pub text: String,
    /// Ground-truth label (`0` or `1`), or `None` when unlabeled
    pub label: Option<u8>,
}

impl LabeledExample {
    /// Create a labeled example
    pub fn new(text: impl Into<String>, label: u8) -> Self {
        Self {
            text: text.into(),
            label: Some(label),
        }
    }

    /// Create an example whose ground truth is unknown
    pub fn unlabeled(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: None,
        }
    }

    /// Whether this example carries a usable ground-truth label
    pub fn is_labeled(&self) -> bool {
        self.label.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_example() {
        let example = LabeledExample::new("meu CPF é 123.456.789-00", LABEL_PII);
        assert_eq!(example.label, Some(1));
        assert!(example.is_labeled());
    }

    #[test]
    fn test_unlabeled_example() {
        let example = LabeledExample::unlabeled("solicito informação");
        assert_eq!(example.label, None);
        assert!(!example.is_labeled());
    }
}
