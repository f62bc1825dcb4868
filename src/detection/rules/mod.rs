//! Deterministic rule layer
//!
//! Ordered pattern detectors for structured PII categories. The rule layer
//! is a pure function of the input text: no learned state, no I/O.

pub mod patterns;

use crate::detection::models::RuleResult;
use anyhow::Result;
use patterns::RuleRegistry;
use serde_json::Value;

/// The fixed, ordered rule matcher
///
/// Evaluates each rule independently against the full text. A category is
/// added on its first matching pattern; a rule whose suppressor matches
/// anywhere in the text is skipped entirely — context suppression always
/// wins over a raw pattern match.
pub struct RuleSet {
    registry: RuleRegistry,
}

impl RuleSet {
    /// Create a rule set with the built-in pattern library
    pub fn new() -> Result<Self> {
        Ok(Self {
            registry: RuleRegistry::default_patterns()?,
        })
    }

    /// Create a rule set with a custom registry
    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// Match all rules against a text record
    ///
    /// Returns every category found, in rule evaluation order, with the
    /// first matched substring per category as evidence.
    pub fn match_text(&self, text: &str) -> RuleResult {
        let mut result = RuleResult::empty();
        if text.is_empty() {
            return result;
        }

        for rule in self.registry.rules() {
            if rule.suppressors.iter().any(|s| s.is_match(text)) {
                continue;
            }

            for pattern in &rule.patterns {
                if let Some(found) = pattern.find(text) {
                    result.add(rule.category, found.as_str().to_string());
                    break;
                }
            }
        }

        result
    }

    /// Match rules against a JSON value as supplied by a request layer
    ///
    /// Non-string values (numbers, null, objects…) yield an empty result
    /// rather than an error: a malformed submission is treated as containing
    /// no detectable PII.
    pub fn match_value(&self, value: &Value) -> RuleResult {
        match value {
            Value::String(s) => self.match_text(s),
            _ => RuleResult::empty(),
        }
    }
}

/// Validate a CPF's two check digits (mod-11)
///
/// Accepts formatted (`123.456.789-09`) or bare (`12345678909`) input.
/// Rejects the degenerate all-same-digit CPFs. Available for tightening the
/// CPF rule against false positives; the default rule set does not require
/// check digits, matching the production behavior it was tuned against.
pub fn validate_cpf(cpf: &str) -> bool {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 || digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let check = |partial: &[u32]| -> u32 {
        let len = partial.len() as u32;
        let sum: u32 = partial
            .iter()
            .enumerate()
            .map(|(i, &d)| d * (len + 1 - i as u32))
            .sum();
        let rest = sum % 11;
        if rest < 2 {
            0
        } else {
            11 - rest
        }
    };

    check(&digits[..9]) == digits[9] && check(&digits[..10]) == digits[10]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::models::PiiCategory;
    use serde_json::json;

    fn rules() -> RuleSet {
        RuleSet::new().unwrap()
    }

    #[test]
    fn test_cpf_detected_with_punctuation() {
        let result = rules().match_text("Meu CPF é 123.456.789-00, atenciosamente");
        assert!(result.matched);
        assert!(result.categories.contains(&PiiCategory::Cpf));
        assert_eq!(
            result.evidence.get(&PiiCategory::Cpf).map(String::as_str),
            Some("123.456.789-00")
        );
    }

    #[test]
    fn test_cpf_detected_bare_digits() {
        let result = rules().match_text("documento 12345678900 anexo");
        assert!(result.categories.contains(&PiiCategory::Cpf));
    }

    #[test]
    fn test_rg_suppressed_by_process_context() {
        // The digit shape matches the RG pattern, but the administrative
        // context must win.
        let result = rules().match_text("Solicito cópia do processo nº 1234567");
        assert!(!result.categories.contains(&PiiCategory::Rg));
    }

    #[test]
    fn test_rg_suppressed_by_contract_context() {
        let result = rules().match_text("referente ao contrato n° 2345678 firmado em 2023");
        assert!(!result.categories.contains(&PiiCategory::Rg));
    }

    #[test]
    fn test_email_detected() {
        let result = rules().match_text("Contato: joao@exemplo.com");
        assert!(result.matched);
        assert!(result.categories.contains(&PiiCategory::Email));
    }

    #[test]
    fn test_phone_detected() {
        let result = rules().match_text("me liga no (61) 99999-8888");
        assert!(result.categories.contains(&PiiCategory::Phone));
    }

    #[test]
    fn test_employee_id_requires_context() {
        let with_context = rules().match_text("servidor de matrícula 123456");
        assert!(with_context.categories.contains(&PiiCategory::EmployeeId));

        let without_context = rules().match_text("foram empenhados 123456 reais");
        assert!(!without_context.categories.contains(&PiiCategory::EmployeeId));
    }

    #[test]
    fn test_address_cep_detected() {
        let result = rules().match_text("Entregar no CEP: 70040-010");
        assert!(result.categories.contains(&PiiCategory::Address));
    }

    #[test]
    fn test_person_name_with_honorific() {
        let result = rules().match_text("atendimento prestado ao Sr. João Silva Santos");
        assert!(result.categories.contains(&PiiCategory::PersonName));
    }

    #[test]
    fn test_person_name_self_identification() {
        let result = rules().match_text("me chamo Maria Souza e peço acesso");
        assert!(result.categories.contains(&PiiCategory::PersonName));
    }

    #[test]
    fn test_lowercase_names_are_not_flagged() {
        let result = rules().match_text("o servidor joão silva foi notificado");
        assert!(!result.categories.contains(&PiiCategory::PersonName));
    }

    #[test]
    fn test_birth_date_detected() {
        let result = rules().match_text("nascido em 01/01/1990");
        assert!(result.categories.contains(&PiiCategory::BirthDate));
    }

    #[test]
    fn test_record_id_detected() {
        let result = rules().match_text("prontuário: 445566 da unidade de saúde");
        assert!(result.categories.contains(&PiiCategory::RecordId));
    }

    #[test]
    fn test_sei_process_detected() {
        let result = rules().match_text("Processo SEI nº 00060-00012345/2024-11");
        assert!(result.categories.contains(&PiiCategory::SeiProcess));
    }

    #[test]
    fn test_multiple_categories_in_one_record() {
        let result =
            rules().match_text("Sou o servidor de matrícula 445566, email fulano@gdf.gov.br");
        assert!(result.categories.contains(&PiiCategory::Email));
        assert!(result.categories.contains(&PiiCategory::EmployeeId));
        assert!(result.categories.len() >= 2);
    }

    #[test]
    fn test_empty_text_yields_empty_result() {
        let result = rules().match_text("");
        assert!(!result.matched);
        assert!(result.categories.is_empty());
        assert!(result.evidence.is_empty());
    }

    #[test]
    fn test_clean_text_yields_empty_result() {
        let result = rules().match_text("solicito informações sobre horários de atendimento");
        assert!(!result.matched);
    }

    #[test]
    fn test_non_string_value_yields_empty_result() {
        let r = rules();
        assert!(!r.match_value(&json!(42)).matched);
        assert!(!r.match_value(&json!(null)).matched);
        assert!(!r.match_value(&json!({"texto": "CPF 123.456.789-00"})).matched);
    }

    #[test]
    fn test_string_value_is_matched() {
        let result = rules().match_value(&json!("CPF: 123.456.789-00"));
        assert!(result.matched);
    }

    #[test]
    fn test_validate_cpf_accepts_valid_check_digits() {
        // 529.982.247-25 is a canonically valid CPF.
        assert!(validate_cpf("529.982.247-25"));
        assert!(validate_cpf("52998224725"));
    }

    #[test]
    fn test_validate_cpf_rejects_bad_check_digits() {
        assert!(!validate_cpf("123.456.789-00"));
    }

    #[test]
    fn test_validate_cpf_rejects_repeated_digits() {
        assert!(!validate_cpf("111.111.111-11"));
    }

    #[test]
    fn test_validate_cpf_rejects_wrong_length() {
        assert!(!validate_cpf("1234567890"));
    }
}
