//! # Category Store
//!
//! Cached, name-sorted category list kept in step with the database.
//!
//! ## Action Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Category Store Actions                               │
//! │                                                                         │
//! │  Screen Action            Store Action           Cache Change           │
//! │  ─────────────            ────────────           ────────────           │
//! │                                                                         │
//! │  Open screen ───────────► load() ──────────────► items = list()        │
//! │                                                                         │
//! │  First run ─────────────► seed() ──────────────► samples, then list()  │
//! │                                                                         │
//! │  Save new ──────────────► create(input) ───────► push(returned), sort  │
//! │                                                                         │
//! │  Save edit ─────────────► update(input) ───────► replace(returned),    │
//! │                                                   sort                  │
//! │                                                                         │
//! │  Delete ────────────────► delete(id) ──────────► retain(id != id)      │
//! │                                                                         │
//! │  NOTE: the cache changes only after the database accepted the write.   │
//! │        On failure items stay as they were and `error` is set.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use dindin_core::{sort_by_name, Category, CreateCategoryInput, UpdateCategoryInput};
use dindin_db::{Database, DbError};
use tokio::sync::Mutex;
use tracing::debug;

use crate::message::user_message;
use crate::view_state::{StateCell, ViewState};

/// View-state store for categories.
///
/// Clones share the same cache and action queue.
///
/// ## Usage
/// ```rust,ignore
/// let store = CategoryStore::new(db.clone());
/// store.load().await?;
///
/// let names: Vec<String> = store.with_state(|s| s.items.iter().map(|c| c.name.clone()).collect());
/// ```
#[derive(Debug, Clone)]
pub struct CategoryStore {
    db: Database,
    state: StateCell<Category>,
    /// Serializes actions so a gateway call and its cache patch never interleave with another's.
    actions: Arc<Mutex<()>>,
}

impl CategoryStore {
    pub fn new(db: Database) -> Self {
        CategoryStore {
            db,
            state: StateCell::new(),
            actions: Arc::new(Mutex::new(())),
        }
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> ViewState<Category> {
        self.state.snapshot()
    }

    /// Executes a function with read access to the state.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ViewState<Category>) -> R,
    {
        self.state.with(f)
    }

    /// Replaces the cache with the stored list.
    ///
    /// On failure the previous items stay visible alongside the error.
    pub async fn load(&self) -> Result<(), DbError> {
        let _queued = self.actions.lock().await;
        self.refresh().await
    }

    /// Inserts the sample categories into an empty table, then reloads.
    ///
    /// Returns how many samples were inserted.
    pub async fn seed(&self) -> Result<usize, DbError> {
        let _queued = self.actions.lock().await;
        self.clear_error();

        let inserted = match self.db.seed_sample_categories().await {
            Ok(n) => n,
            Err(e) => {
                self.fail("seed categories", &e);
                return Err(e);
            }
        };
        self.refresh().await?;
        Ok(inserted)
    }

    async fn refresh(&self) -> Result<(), DbError> {
        self.state.with_mut(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.db.categories().list().await {
            Ok(mut items) => {
                sort_by_name(&mut items);
                debug!(count = items.len(), "Loaded categories");
                self.state.with_mut(|s| {
                    s.items = items;
                    s.is_loading = false;
                });
                Ok(())
            }
            Err(e) => {
                self.fail("load categories", &e);
                Err(e)
            }
        }
    }

    /// Creates a category and adds the stored record to the cache.
    pub async fn create(&self, input: &CreateCategoryInput) -> Result<Category, DbError> {
        let _queued = self.actions.lock().await;
        self.clear_error();

        match self.db.categories().create(input).await {
            Ok(category) => {
                self.state.with_mut(|s| {
                    s.items.push(category.clone());
                    sort_by_name(&mut s.items);
                });
                Ok(category)
            }
            Err(e) => {
                self.fail("create category", &e);
                Err(e)
            }
        }
    }

    /// Updates a category and caches the record the database returned.
    ///
    /// Only a record already in the cache is replaced; load first to see it.
    pub async fn update(&self, input: &UpdateCategoryInput) -> Result<Category, DbError> {
        let _queued = self.actions.lock().await;
        self.clear_error();

        match self.db.categories().update(input).await {
            Ok(category) => {
                self.state.with_mut(|s| {
                    if let Some(cached) = s.items.iter_mut().find(|c| c.id == category.id) {
                        *cached = category.clone();
                        sort_by_name(&mut s.items);
                    }
                });
                Ok(category)
            }
            Err(e) => {
                self.fail("update category", &e);
                Err(e)
            }
        }
    }

    /// Deletes a category. Deleting an unknown id succeeds.
    pub async fn delete(&self, id: &str) -> Result<(), DbError> {
        let _queued = self.actions.lock().await;
        self.clear_error();

        match self.db.categories().delete(id).await {
            Ok(_) => {
                self.state.with_mut(|s| s.items.retain(|c| c.id != id));
                Ok(())
            }
            Err(e) => {
                self.fail("delete category", &e);
                Err(e)
            }
        }
    }

    /// Clears the error, leaving items and the loading flag alone.
    pub fn clear_error(&self) {
        self.state.with_mut(|s| s.error = None);
    }

    fn fail(&self, action: &str, err: &DbError) {
        let message = user_message(action, err);
        self.state.with_mut(|s| {
            s.error = Some(message);
            s.is_loading = false;
        });
    }
}
