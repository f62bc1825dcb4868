//! Domain types for Triagem.
//!
//! This module contains the core domain types shared across the detection,
//! classification, and evaluation layers.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Corpus records** ([`LabeledExample`]) — text plus optional ground truth
//! - **Error types** ([`TriagemError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, TriagemError>`]:
//!
//! ```rust
//! use triagem::domain::{Result, TriagemError};
//!
//! fn example() -> Result<()> {
//!     let config = triagem::config::TriagemConfig::default();
//!     config.validate()?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::TriagemError;
pub use record::{LabeledExample, LABEL_CLEAN, LABEL_PII};
pub use result::Result;
