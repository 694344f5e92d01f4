//! # dindin-core: Pure Domain Model for Dindin
//!
//! This crate holds the types every other Dindin crate speaks: categories,
//! payment methods, their closed enumerations, validation rules, the built-in
//! seed tables and date labels. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dindin Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front end (apps/cli, mobile UI)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           dindin-state (CategoryStore, PaymentMethodStore)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              dindin-db (Database, repositories)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dindin-core (THIS CRATE) ★                      │   │
//! │  │   types • validation • seed • dates • error                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, PaymentMethod, inputs, enums)
//! - [`validation`] - Input validation rules
//! - [`seed`] - Built-in payment methods and sample categories
//! - [`dates`] - Relative day labels
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use dindin_core::types::CategoryColor;
//!
//! assert_eq!(CategoryColor::Purple.hex(), "#8B5CF6");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dates;
pub mod error;
pub mod seed;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use dates::relative_day_label;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// File name of the local database inside the app data directory.
pub const DATABASE_FILE_NAME: &str = "dindin.db";

/// Longest category name accepted by validation.
pub const MAX_CATEGORY_NAME_LEN: usize = 50;
