//! # dindin-state: View-State Stores
//!
//! Each store mirrors one table for the screens that show it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐          ┌──────────────────────┐                │
//! │  │  CategoryStore   │          │  PaymentMethodStore  │                │
//! │  │                  │          │                      │                │
//! │  │  ViewState {     │          │  ViewState {         │                │
//! │  │    items,        │          │    items,            │                │
//! │  │    is_loading,   │          │    is_loading,       │                │
//! │  │    error }       │          │    error }           │                │
//! │  └────────┬─────────┘          └──────────┬───────────┘                │
//! │           └───────────────┬───────────────┘                            │
//! │                           ▼                                             │
//! │                  Database (dindin-db, one shared handle)               │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • state: Arc<std Mutex>, never held across .await                     │
//! │  • actions: tokio Mutex queue per store                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stores are plain values built from a [`Database`](dindin_db::Database);
//! whoever owns the screens owns the stores.

mod category;
mod message;
mod payment_method;
mod view_state;

pub use category::CategoryStore;
pub use message::user_message;
pub use payment_method::PaymentMethodStore;
pub use view_state::ViewState;
