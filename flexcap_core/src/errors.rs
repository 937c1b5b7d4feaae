//! # Error Types
//!
//! Structured error types for flexcap_core. Each variant carries enough
//! context to tell the caller which input, section or file caused the
//! failure, and every error serializes to JSON for tooling.
//!
//! ## Example
//!
//! ```rust
//! use flexcap_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_mm: f64) -> CalcResult<()> {
//!     if length_mm <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "length".to_string(),
//!             value: length_mm.to_string(),
//!             reason: "Unbraced length must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for flexcap_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value violates the calculation contract (non-positive
    /// length or geometry, factor out of range, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Section name absent from the section database
    #[error("Section not found: {section}")]
    SectionNotFound { section: String },

    /// Web slenderness exceeds the code limit; no class can be assigned
    #[error("Web is excessively slender: {web_check:.1} > {limit:.0}. Choose a different section")]
    SectionTooSlender { web_check: f64, limit: f64 },

    /// A section table could not be parsed
    #[error("Section data error in '{source_name}': {reason}")]
    DataError { source_name: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Internal invariant violation (should never happen)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a SectionNotFound error
    pub fn section_not_found(section: impl Into<String>) -> Self {
        CalcError::SectionNotFound {
            section: section.into(),
        }
    }

    /// Create a SectionTooSlender error
    pub fn section_too_slender(web_check: f64, limit: f64) -> Self {
        CalcError::SectionTooSlender { web_check, limit }
    }

    /// Create a DataError
    pub fn data_error(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DataError {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        CalcError::Internal {
            message: message.into(),
        }
    }

    /// True for caller contract violations, as opposed to data-driven failures
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, CalcError::InvalidInput { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::SectionNotFound { .. } => "SECTION_NOT_FOUND",
            CalcError::SectionTooSlender { .. } => "SECTION_TOO_SLENDER",
            CalcError::DataError { .. } => "DATA_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("length", "-5", "Unbraced length must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::section_not_found("W999X1").error_code(), "SECTION_NOT_FOUND");
        assert_eq!(CalcError::section_too_slender(90000.0, 83000.0).error_code(), "SECTION_TOO_SLENDER");
        assert_eq!(CalcError::internal("x").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_slender_message() {
        let msg = CalcError::section_too_slender(91234.56, 83000.0).to_string();
        assert_eq!(msg, "Web is excessively slender: 91234.6 > 83000. Choose a different section");
    }

    #[test]
    fn test_contract_violation() {
        assert!(CalcError::invalid_input("tf", "0", "must be positive").is_contract_violation());
        assert!(!CalcError::section_not_found("W1").is_contract_violation());
    }
}
