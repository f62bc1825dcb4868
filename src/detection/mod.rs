//! Detection module
//!
//! The hybrid PII detection pipeline: an ordered rule layer treated as
//! ground truth, backed by the statistical classifier under a caller-tuned
//! confidence threshold, with optional hashed audit logging.
//!
//! # Usage
//!
//! ```rust,no_run
//! use triagem::config::TriagemConfig;
//! use triagem::detection::HybridDetector;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = TriagemConfig::default();
//! let detector = HybridDetector::new(&config)?;
//! let result = detector.detect("Contato: joao@exemplo.com", 0.35);
//! assert!(result.contains_pii);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod detector;
pub mod models;
pub mod rules;

// Re-export main types
pub use detector::{HybridDetector, DEFAULT_THRESHOLD};
pub use models::{DetectionMethod, DetectionResult, PiiCategory, RuleResult};
pub use rules::RuleSet;
