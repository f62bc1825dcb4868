//! Result type alias for Triagem
//!
//! This module provides a convenient Result type alias that uses TriagemError
//! as the error type.

use super::errors::TriagemError;

/// Result type alias for Triagem operations
///
/// This is a convenience type alias that uses `TriagemError` as the error type.
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use triagem::domain::result::Result;
/// use triagem::domain::errors::TriagemError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(TriagemError::InvalidInput("not text".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, TriagemError>;
