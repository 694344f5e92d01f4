//! # Error Types
//!
//! Domain-specific error types for dindin-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dindin-core errors (this file)                                        │
//! │  ├── CoreError        - Parsing of closed enumerations                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  dindin-db errors (separate crate)                                     │
//! │  └── DbError          - Storage gateway failures                       │
//! │                                                                         │
//! │  dindin-state                                                          │
//! │  └── error: Option<String> - What the UI displays                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while turning raw text into domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Color name is not part of the category palette.
    #[error("Unknown category color: {0}")]
    UnknownColor(String),

    /// Icon name is not part of the icon set.
    #[error("Unknown icon: {0}")]
    UnknownIcon(String),

    /// Category type is neither expense nor income.
    #[error("Unknown category type: {0} (expected 'gasto' or 'receita')")]
    UnknownCategoryType(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// The gateway checks them before touching the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownColor("magenta".to_string());
        assert_eq!(err.to_string(), "Unknown category color: magenta");

        let err = CoreError::UnknownCategoryType("both".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown category type: both (expected 'gasto' or 'receita')"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 50,
        };
        assert_eq!(err.to_string(), "name must be at most 50 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
