//! # Validation Module
//!
//! Input validation applied by the storage gateway before any write.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Type system                                                  │
//! │  └── IconName / CategoryColor / CategoryType are closed enums          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Free-text fields (category name)                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── NOT NULL / PRIMARY KEY constraints                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{CreateCategoryInput, UpdateCategoryInput};
use crate::MAX_CATEGORY_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a category name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 50 characters (counted as chars, not bytes)
///
/// ## Example
/// ```rust
/// use dindin_core::validation::validate_category_name;
///
/// assert_eq!(validate_category_name("  Lazer ").unwrap(), "Lazer");
/// assert!(validate_category_name("   ").is_err());
/// ```
pub fn validate_category_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_CATEGORY_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_CATEGORY_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a create input, returning a copy with the name normalized.
pub fn validate_create_category(input: &CreateCategoryInput) -> ValidationResult<CreateCategoryInput> {
    Ok(CreateCategoryInput {
        name: validate_category_name(&input.name)?,
        ..input.clone()
    })
}

/// Validates the fields present in a partial update.
pub fn validate_update_category(input: &UpdateCategoryInput) -> ValidationResult<()> {
    if input.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if let Some(name) = &input.name {
        validate_category_name(name)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
