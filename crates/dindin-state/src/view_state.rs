//! # View State
//!
//! The snapshot every store exposes, and the cell that guards it.
//!
//! ## Thread Safety
//! State lives in `Arc<Mutex<ViewState<T>>>` (std mutex): it is only ever
//! held for a synchronous read or patch, never across an `.await`.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

/// What a screen renders: the cached rows plus loading and error flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState<T> {
    /// Cached rows, sorted by name.
    pub items: Vec<T>,

    /// True while `load()` is waiting on the database.
    pub is_loading: bool,

    /// Message from the last failed action, until cleared.
    pub error: Option<String>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState {
            items: Vec::new(),
            is_loading: false,
            error: None,
        }
    }
}

/// Shared, lock-protected [`ViewState`].
#[derive(Debug)]
pub(crate) struct StateCell<T> {
    inner: Arc<Mutex<ViewState<T>>>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        StateCell {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> StateCell<T> {
    pub fn new() -> Self {
        StateCell {
            inner: Arc::new(Mutex::new(ViewState::default())),
        }
    }

    /// Executes a function with read access to the state.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ViewState<T>) -> R,
    {
        // A panic inside a patch leaves plain data behind, still usable
        let state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Executes a function with write access to the state.
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ViewState<T>) -> R,
    {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

impl<T: Clone> StateCell<T> {
    pub fn snapshot(&self) -> ViewState<T> {
        self.with(ViewState::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle_and_empty() {
        let cell: StateCell<String> = StateCell::new();
        assert_eq!(cell.snapshot(), ViewState::default());
    }

    #[test]
    fn test_clones_share_state() {
        let cell: StateCell<String> = StateCell::new();
        let other = cell.clone();

        other.with_mut(|s| s.error = Some("boom".to_string()));

        assert_eq!(cell.with(|s| s.error.clone()), Some("boom".to_string()));
    }

    #[test]
    fn test_serializes_camel_case() {
        let state = ViewState {
            items: vec![1, 2],
            is_loading: true,
            error: None,
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["isLoading"], true);
        assert_eq!(json["items"][1], 2);
    }
}
