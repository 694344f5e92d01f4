//! # Repository Module
//!
//! Per-table repositories handed out by [`Database`](crate::Database).
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Store action (dindin-state)                                           │
//! │       │                                                                 │
//! │       │  db.categories().update(&input)                                │
//! │       ▼                                                                 │
//! │  CategoryRepository                                                    │
//! │  ├── list / get / count          (read, no lock)                       │
//! │  └── create / update / delete    (write lock for `categories`)         │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories hold a clone of the gateway, not a pool, so a handle taken
//! before `initialize()` works once initialization is done and fails with
//! `NotInitialized` after `close()`.
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`](category::CategoryRepository) - Category CRUD
//! - [`PaymentMethodRepository`](payment_method::PaymentMethodRepository) - List and toggle

pub mod category;
pub mod payment_method;
