//! Turning gateway errors into the text a screen shows.
//!
//! ```text
//! DbError::Validation(..)   → the validation message ("name is required")
//! anything else             → "Failed to <action>", full error logged
//! ```

use dindin_db::{DbError, ErrorKind};
use tracing::{error, warn};

/// Message stored in `ViewState::error` when `action` fails with `err`.
///
/// `action` reads like "update category".
pub fn user_message(action: &str, err: &DbError) -> String {
    match err {
        DbError::Validation(e) => {
            warn!(action, error = %e, "Rejected input");
            e.to_string()
        }
        _ => {
            match err.kind() {
                ErrorKind::StorageIo => error!(action, error = %err, "Storage failure"),
                kind => warn!(action, ?kind, error = %err, "Action failed"),
            }
            format!("Failed to {}", action)
        }
    }
}
