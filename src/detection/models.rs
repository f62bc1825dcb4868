//! Detection data models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// PII category enumeration covering the structured categories the rule
/// layer detects, plus the generic flag used by the statistical layer.
///
/// Ordering follows rule evaluation order; `Ord` is derived so categories
/// can key ordered maps without losing that order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PiiCategory {
    /// CPF — 11-digit national taxpayer ID
    Cpf,
    /// RG — state-issued identity card number
    Rg,
    /// Email addresses
    Email,
    /// Telephone numbers
    Phone,
    /// Matrícula — employee/registration number in context
    EmployeeId,
    /// Residential address (street + number, CEP, unit, named district)
    Address,
    /// Person name in identifying context
    PersonName,
    /// Birth date in context
    BirthDate,
    /// Prontuário or registry ID
    RecordId,
    /// SEI administrative process number
    SeiProcess,
    /// Positive detection by the statistical layer (no specific category)
    MachineLearning,
}

impl PiiCategory {
    /// Human-readable label used in result records and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cpf => "CPF",
            Self::Rg => "RG",
            Self::Email => "Email",
            Self::Phone => "Telefone",
            Self::EmployeeId => "Matrícula",
            Self::Address => "Endereço",
            Self::PersonName => "Nome",
            Self::BirthDate => "Data de Nascimento",
            Self::RecordId => "Prontuário",
            Self::SeiProcess => "Processo SEI",
            Self::MachineLearning => "ML",
        }
    }

    /// Whether the category is produced by the rule layer
    pub fn is_rule_category(&self) -> bool {
        !matches!(self, Self::MachineLearning)
    }
}

/// Detection method recorded in a [`DetectionResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Deterministic rule match — treated as ground truth
    Rule,
    /// Statistical classifier fallback
    Statistical,
    /// Classifier model missing or unloadable; degraded default
    Unavailable,
}

/// Result of running the rule layer over one text record
///
/// Invariant: `matched == !categories.is_empty()`. Categories appear in rule
/// evaluation order, first match per category wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleResult {
    /// Whether any rule fired
    pub matched: bool,
    /// Categories detected, in rule evaluation order
    pub categories: Vec<PiiCategory>,
    /// Matched substring per category
    pub evidence: BTreeMap<PiiCategory, String>,
}

impl RuleResult {
    /// Empty result — nothing matched
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record a category match, keeping the first evidence per category
    pub fn add(&mut self, category: PiiCategory, evidence: String) {
        if !self.categories.contains(&category) {
            self.categories.push(category);
            self.evidence.insert(category, evidence);
            self.matched = true;
        }
    }
}

/// Uniform result record for one classification call
///
/// Invariants: `method == Rule` implies `confidence == 1.0`;
/// `method == Unavailable` implies `contains_pii == false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Whether the record was classified as containing PII
    pub contains_pii: bool,
    /// Layer that produced the decision
    pub method: DetectionMethod,
    /// Detected categories, in detection order
    pub categories: Vec<PiiCategory>,
    /// Decision confidence in `[0, 1]`; 1.0 for rule matches, the model
    /// probability for statistical decisions, 0.0 when degraded
    pub confidence: f64,
    /// Supporting details: matched substrings keyed by category label, or
    /// `reason`/`ml_score` entries for the non-rule paths
    pub evidence: BTreeMap<String, String>,
}

impl DetectionResult {
    /// Build the result for a rule-layer match
    pub fn from_rules(rules: RuleResult) -> Self {
        let evidence = rules
            .evidence
            .iter()
            .map(|(category, matched)| (category.label().to_string(), matched.clone()))
            .collect();

        Self {
            contains_pii: true,
            method: DetectionMethod::Rule,
            categories: rules.categories,
            confidence: 1.0,
            evidence,
        }
    }

    /// Build the result for a statistical-layer decision
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        let contains_pii = probability >= threshold;
        let categories = if contains_pii {
            vec![PiiCategory::MachineLearning]
        } else {
            Vec::new()
        };
        let mut evidence = BTreeMap::new();
        evidence.insert("ml_score".to_string(), format!("{probability:.6}"));

        Self {
            contains_pii,
            method: DetectionMethod::Statistical,
            categories,
            confidence: probability,
            evidence,
        }
    }

    /// Build the degraded result used when the model cannot be consulted
    pub fn unavailable(reason: impl Into<String>) -> Self {
        let mut evidence = BTreeMap::new();
        evidence.insert("reason".to_string(), reason.into());

        Self {
            contains_pii: false,
            method: DetectionMethod::Unavailable,
            categories: Vec::new(),
            confidence: 0.0,
            evidence,
        }
    }

    /// Predicted binary label (`1` for PII, `0` otherwise)
    pub fn predicted_label(&self) -> u8 {
        u8::from(self.contains_pii)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_result_invariant() {
        let mut result = RuleResult::empty();
        assert!(!result.matched);
        assert!(result.categories.is_empty());

        result.add(PiiCategory::Cpf, "123.456.789-00".to_string());
        assert!(result.matched);
        assert_eq!(result.categories, vec![PiiCategory::Cpf]);
    }

    #[test]
    fn test_rule_result_first_match_wins() {
        let mut result = RuleResult::empty();
        result.add(PiiCategory::Email, "a@b.com".to_string());
        result.add(PiiCategory::Email, "c@d.com".to_string());

        assert_eq!(result.categories.len(), 1);
        assert_eq!(
            result.evidence.get(&PiiCategory::Email).map(String::as_str),
            Some("a@b.com")
        );
    }

    #[test]
    fn test_rule_result_preserves_insertion_order() {
        let mut result = RuleResult::empty();
        result.add(PiiCategory::Phone, "9999-9999".to_string());
        result.add(PiiCategory::Cpf, "123.456.789-00".to_string());

        assert_eq!(result.categories, vec![PiiCategory::Phone, PiiCategory::Cpf]);
    }

    #[test]
    fn test_detection_result_from_rules() {
        let mut rules = RuleResult::empty();
        rules.add(PiiCategory::Email, "joao@exemplo.com".to_string());

        let result = DetectionResult::from_rules(rules);
        assert!(result.contains_pii);
        assert_eq!(result.method, DetectionMethod::Rule);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(
            result.evidence.get("Email").map(String::as_str),
            Some("joao@exemplo.com")
        );
    }

    #[test]
    fn test_detection_result_from_probability_positive() {
        let result = DetectionResult::from_probability(0.72, 0.35);
        assert!(result.contains_pii);
        assert_eq!(result.method, DetectionMethod::Statistical);
        assert_eq!(result.categories, vec![PiiCategory::MachineLearning]);
        assert!((result.confidence - 0.72).abs() < f64::EPSILON);
    }

    #[test]
    fn test_detection_result_from_probability_negative() {
        let result = DetectionResult::from_probability(0.2, 0.35);
        assert!(!result.contains_pii);
        assert_eq!(result.method, DetectionMethod::Statistical);
        assert!(result.categories.is_empty());
    }

    #[test]
    fn test_detection_result_unavailable_invariant() {
        let result = DetectionResult::unavailable("model artifacts missing");
        assert!(!result.contains_pii);
        assert_eq!(result.method, DetectionMethod::Unavailable);
        assert_eq!(result.confidence, 0.0);
        assert!(result.evidence.contains_key("reason"));
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(PiiCategory::Cpf.label(), "CPF");
        assert_eq!(PiiCategory::MachineLearning.label(), "ML");
        assert!(PiiCategory::Cpf.is_rule_category());
        assert!(!PiiCategory::MachineLearning.is_rule_category());
    }
}
