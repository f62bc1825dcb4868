//! Pattern library for the rule layer

use crate::detection::models::PiiCategory;
use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::path::Path;

/// Rule definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDefinition {
    /// PII category label
    pub category: String,
    /// Regex patterns for this category
    pub patterns: Vec<String>,
    /// Patterns that suppress this rule when they match anywhere in the text
    #[serde(default)]
    pub suppressors: Vec<String>,
    /// Compile patterns case-insensitively (defaults to true)
    #[serde(default = "default_case_insensitive")]
    pub case_insensitive: bool,
}

fn default_case_insensitive() -> bool {
    true
}

/// Compiled rule with its category and optional suppressors
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// PII category this rule detects
    pub category: PiiCategory,
    /// Compiled detection patterns, tried in order
    pub patterns: Vec<Regex>,
    /// Compiled suppression patterns; any hit disables the rule for the text
    pub suppressors: Vec<Regex>,
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct RuleLibrary {
    rules: Vec<RuleDefinition>,
}

/// Ordered rule registry for PII detection
///
/// Rules keep the order they appear in the library file; evaluation order is
/// part of the detection contract (category order in results, suppression
/// precedence).
pub struct RuleRegistry {
    rules: Vec<CompiledRule>,
}

impl RuleRegistry {
    /// Create a new rule registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml(&content)
    }

    /// Create a rule registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: RuleLibrary =
            toml::from_str(content).context("Failed to parse pattern library TOML")?;

        let mut rules = Vec::with_capacity(library.rules.len());
        for def in library.rules {
            let category = Self::parse_category(&def.category)
                .with_context(|| format!("Invalid category in pattern library: {}", def.category))?;

            let patterns = def
                .patterns
                .iter()
                .map(|p| compile(p, def.case_insensitive))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("Invalid regex in rule '{}'", def.category))?;

            let suppressors = def
                .suppressors
                .iter()
                .map(|p| compile(p, true))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("Invalid suppressor in rule '{}'", def.category))?;

            rules.push(CompiledRule {
                category,
                patterns,
                suppressors,
            });
        }

        Ok(Self { rules })
    }

    /// Create the default registry with built-in patterns
    pub fn default_patterns() -> Result<Self> {
        // Use embedded default patterns
        let default_toml = include_str!("../../../patterns/pii_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// All rules in evaluation order
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Get the rule for a specific category, if defined
    pub fn rule_for_category(&self, category: PiiCategory) -> Option<&CompiledRule> {
        self.rules.iter().find(|r| r.category == category)
    }

    /// Parse category string to PiiCategory enum
    fn parse_category(s: &str) -> Result<PiiCategory> {
        match s.to_uppercase().as_str() {
            "CPF" => Ok(PiiCategory::Cpf),
            "RG" => Ok(PiiCategory::Rg),
            "EMAIL" => Ok(PiiCategory::Email),
            "PHONE" | "TELEFONE" => Ok(PiiCategory::Phone),
            "EMPLOYEE_ID" | "MATRICULA" => Ok(PiiCategory::EmployeeId),
            "ADDRESS" | "ENDERECO" => Ok(PiiCategory::Address),
            "PERSON_NAME" | "NAME" => Ok(PiiCategory::PersonName),
            "BIRTH_DATE" => Ok(PiiCategory::BirthDate),
            "RECORD_ID" | "PRONTUARIO" => Ok(PiiCategory::RecordId),
            "SEI_PROCESS" | "SEI" => Ok(PiiCategory::SeiProcess),
            _ => anyhow::bail!("Unknown PII category: {s}"),
        }
    }
}

fn compile(pattern: &str, case_insensitive: bool) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .with_context(|| format!("Invalid regex: {pattern}"))
}
