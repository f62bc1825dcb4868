// Triagem - Hybrid PII Detection Engine
// Copyright (c) 2026 Triagem Contributors
// Licensed under the MIT License

//! # Triagem - Hybrid PII Detection
//!
//! Triagem classifies free-form public-records request text to determine
//! whether it contains personally identifiable information (PII), combining
//! a deterministic pattern-matching layer with a probabilistic fallback
//! classifier.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Detecting** structured PII categories (CPF, RG, email, phone,
//!   addresses, names in context…) with an ordered rule set
//! - **Classifying** rule-free text with a TF-IDF + soft-voting ensemble
//!   under a caller-tuned confidence threshold
//! - **Training** the statistical model on a labeled corpus with
//!   cross-validated quality reporting
//! - **Evaluating** either layer against ground truth with full
//!   misclassification analysis
//!
//! ## Architecture
//!
//! Triagem follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`detection`] - Rule layer, hybrid orchestrator, audit logging
//! - [`classifier`] - Vectorizer, ensemble, training, artifact store
//! - [`evaluation`] - Batch scoring harness and reports
//! - [`corpus`] - Labeled dataset loading
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use triagem::config::TriagemConfig;
//! use triagem::detection::HybridDetector;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TriagemConfig::from_file("triagem.toml")?;
//!     let detector = HybridDetector::new(&config)?;
//!
//!     let result = detector.detect("CPF: 123.456.789-00", 0.35);
//!     println!("PII: {} via {:?}", result.contains_pii, result.method);
//!     Ok(())
//! }
//! ```
//!
//! ## Decision Pipeline
//!
//! The rule layer runs first and is treated as ground truth: any match
//! returns immediately with confidence 1.0. Only rule-free text reaches the
//! statistical layer, whose probability is compared against the
//! caller-supplied threshold. A missing or corrupt model never fails a
//! classification call — the result degrades to `method: unavailable`,
//! `contains_pii: false`.
//!
//! ## Error Handling
//!
//! Triagem uses the [`domain::TriagemError`] type for all errors:
//!
//! ```rust,no_run
//! use triagem::domain::TriagemError;
//!
//! fn example() -> Result<(), TriagemError> {
//!     let config = triagem::config::TriagemConfig::from_file("triagem.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Triagem uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting evaluation");
//! warn!(threshold = 0.35, "Low threshold may inflate false positives");
//! ```

pub mod classifier;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod detection;
pub mod domain;
pub mod evaluation;
pub mod logging;
