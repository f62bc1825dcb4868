//! Configuration management for Triagem.
//!
//! TOML-based configuration loading and validation for the detection
//! pipeline: model directory, pattern-library override, default threshold,
//! logging and audit settings.

use crate::detection::detector::DEFAULT_THRESHOLD;
use crate::domain::{Result, TriagemError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level Triagem configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriagemConfig {
    /// Directory holding the model artifact pair
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    /// Optional custom pattern library; built-in patterns are used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_library: Option<PathBuf>,

    /// Default confidence threshold for the statistical layer
    #[serde(default = "default_threshold")]
    pub default_threshold: f64,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_log_path")]
    pub local_path: PathBuf,
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable the detection audit log
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path (JSONL, hashed evidence)
    #[serde(default = "default_audit_path")]
    pub log_path: PathBuf,
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("ml")
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_path() -> PathBuf {
    PathBuf::from("logs")
}

fn default_audit_path() -> PathBuf {
    PathBuf::from("logs/audit.jsonl")
}

impl Default for TriagemConfig {
    fn default() -> Self {
        Self {
            model_dir: default_model_dir(),
            pattern_library: None,
            default_threshold: default_threshold(),
            logging: LoggingConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            local_enabled: false,
            local_path: default_log_path(),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_path(),
        }
    }
}

impl TriagemConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TriagemError::Configuration(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            TriagemError::Configuration(format!(
                "Failed to read configuration file {}: {e}",
                path.display()
            ))
        })?;

        let config: TriagemConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.default_threshold) {
            return Err(TriagemError::Configuration(format!(
                "default_threshold must be in [0, 1], got {}",
                self.default_threshold
            )));
        }

        if let Some(ref pattern_path) = self.pattern_library {
            if !pattern_path.exists() {
                return Err(TriagemError::Configuration(format!(
                    "pattern_library not found: {}",
                    pattern_path.display()
                )));
            }
        }

        Ok(())
    }

    /// Serialize the default configuration as a commented starting point
    pub fn default_toml() -> String {
        let config = TriagemConfig::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TriagemConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.model_dir, PathBuf::from("ml"));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let mut config = TriagemConfig::default();
        config.default_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_pattern_library_rejected() {
        let mut config = TriagemConfig::default();
        config.pattern_library = Some(PathBuf::from("/nonexistent/patterns.toml"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_missing_is_configuration_error() {
        let err = TriagemConfig::from_file("/nonexistent/triagem.toml").unwrap_err();
        assert!(matches!(err, TriagemError::Configuration(_)));
    }

    #[test]
    fn test_from_toml_partial_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triagem.toml");
        std::fs::write(&path, "model_dir = \"models\"\n").unwrap();

        let config = TriagemConfig::from_file(&path).unwrap();
        assert_eq!(config.model_dir, PathBuf::from("models"));
        assert_eq!(config.default_threshold, DEFAULT_THRESHOLD);
        assert!(!config.audit.enabled);
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = TriagemConfig::default_toml();
        let parsed: TriagemConfig = toml::from_str(&toml_str).unwrap();
        assert!(parsed.validate().is_ok());
    }
}
