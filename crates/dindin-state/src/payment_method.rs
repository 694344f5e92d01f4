//! # Payment Method Store
//!
//! Same contract as the category store, with a single mutation: toggling
//! `enabled`.

use std::sync::Arc;

use dindin_core::{sort_by_name, PaymentMethod, UpdatePaymentMethodInput};
use dindin_db::{Database, DbError};
use tokio::sync::Mutex;
use tracing::debug;

use crate::message::user_message;
use crate::view_state::{StateCell, ViewState};

/// View-state store for payment methods.
#[derive(Debug, Clone)]
pub struct PaymentMethodStore {
    db: Database,
    state: StateCell<PaymentMethod>,
    actions: Arc<Mutex<()>>,
}

impl PaymentMethodStore {
    pub fn new(db: Database) -> Self {
        PaymentMethodStore {
            db,
            state: StateCell::new(),
            actions: Arc::new(Mutex::new(())),
        }
    }

    pub fn snapshot(&self) -> ViewState<PaymentMethod> {
        self.state.snapshot()
    }

    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ViewState<PaymentMethod>) -> R,
    {
        self.state.with(f)
    }

    /// Replaces the cache with the stored list; keeps stale items on failure.
    pub async fn load(&self) -> Result<(), DbError> {
        let _queued = self.actions.lock().await;
        self.refresh().await
    }

    /// Inserts the default payment methods into an empty table, then reloads.
    pub async fn seed(&self) -> Result<usize, DbError> {
        let _queued = self.actions.lock().await;
        self.clear_error();

        let inserted = match self.db.seed_payment_methods().await {
            Ok(n) => n,
            Err(e) => {
                self.fail("seed payment methods", &e);
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

        match self.db.payment_methods().list().await {
            Ok(mut items) => {
                sort_by_name(&mut items);
                debug!(count = items.len(), "Loaded payment methods");
                self.state.with_mut(|s| {
                    s.items = items;
                    s.is_loading = false;
                });
                Ok(())
            }
            Err(e) => {
                self.fail("load payment methods", &e);
                Err(e)
            }
        }
    }

    /// Sets `enabled` and replaces the cached record, if any, with the one
    /// the database returned.
    pub async fn update(&self, input: &UpdatePaymentMethodInput) -> Result<PaymentMethod, DbError> {
        let _queued = self.actions.lock().await;
        self.clear_error();

        match self.db.payment_methods().update(input).await {
            Ok(method) => {
                self.state.with_mut(|s| {
                    if let Some(cached) = s.items.iter_mut().find(|m| m.id == method.id) {
                        *cached = method.clone();
                    }
                });
                Ok(method)
            }
            Err(e) => {
                self.fail("update payment method", &e);
                Err(e)
            }
        }
    }

    /// Payment methods currently enabled, in display order.
    pub fn enabled(&self) -> Vec<PaymentMethod> {
        self.state
            .with(|s| s.items.iter().filter(|m| m.enabled).cloned().collect())
    }

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
