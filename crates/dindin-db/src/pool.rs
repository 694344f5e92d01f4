//! # Database Pool Management
//!
//! Connection pool creation, lifecycle and first-run seeding for SQLite.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Gateway Lifecycle                                  │
//! │                                                                         │
//! │  Database::new(DbConfig)      ← cheap, no I/O, state = Uninitialized   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  initialize().await                                                    │
//! │       ├── open pool (file created if missing)                          │
//! │       ├── run migrations                                               │
//! │       ├── seed payment methods if the table is empty                   │
//! │       └── optionally seed sample categories                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  state = Ready  ──► categories() / payment_methods() usable            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  close().await                ← back to Uninitialized                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Calls made while `initialize()` is running wait for it to finish;
//! calls made before it started (or after `close()`) fail with
//! [`DbError::NotInitialized`].
//!
//! ## WAL Mode
//! File databases use WAL so readers don't block the single writer.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::category::{self, CategoryRepository};
use crate::repository::payment_method::{self, PaymentMethodRepository};

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/dindin.db")
///     .max_connections(4)
///     .seed_sample_categories(false);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file (ignored for in-memory databases).
    pub database_path: PathBuf,

    /// Private in-memory database instead of a file.
    pub in_memory: bool,

    /// Maximum number of connections in the pool.
    /// Default: 4
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// How long to wait for a free connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether `initialize()` runs migrations.
    /// Default: true
    pub run_migrations: bool,

    /// Whether `initialize()` inserts the sample categories into an empty table.
    /// Default: true
    pub seed_sample_categories: bool,
}

impl DbConfig {
    /// Creates a configuration for a database file.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            in_memory: false,
            max_connections: 4,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
            seed_sample_categories: true,
        }
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::in_memory());
    /// db.initialize().await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            in_memory: true,
            max_connections: 1, // Every connection would get its own empty database
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
            seed_sample_categories: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on initialize.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Sets whether to seed the sample categories on initialize.
    pub fn seed_sample_categories(mut self, seed: bool) -> Self {
        self.seed_sample_categories = seed;
        self
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        if self.in_memory {
            return SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()));
        }

        Ok(SqliteConnectOptions::new()
            .filename(&self.database_path)
            // WAL mode: readers don't block the writer
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL synchronous: safe from corruption, may lose the last transaction on crash
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Per-table write locks.
///
/// Every mutation of a table holds its lock for the whole
/// read-modify-write, so concurrent writers never interleave.
#[derive(Debug, Default)]
pub(crate) struct WriteLocks {
    pub categories: Mutex<()>,
    pub payment_methods: Mutex<()>,
}

#[derive(Debug)]
struct Inner {
    config: DbConfig,
    pool: RwLock<Option<SqlitePool>>,
    locks: WriteLocks,
}

/// The storage gateway: one handle shared by every store.
///
/// Cloning is cheap and every clone sees the same pool and locks.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./dindin.db"));
/// db.initialize().await?;
///
/// let categories = db.categories().list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<Inner>,
}

impl Database {
    /// Creates an unopened gateway. No I/O happens until [`initialize`](Self::initialize).
    pub fn new(config: DbConfig) -> Self {
        Database {
            inner: Arc::new(Inner {
                config,
                pool: RwLock::new(None),
                locks: WriteLocks::default(),
            }),
        }
    }

    /// Opens the database, applies the schema and seeds first-run data.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Runs migrations (if enabled)
    /// 3. Inserts the default payment methods when that table is empty
    /// 4. Inserts the sample categories when that table is empty (unless disabled)
    ///
    /// Idempotent: a second call on a ready gateway does nothing. On
    /// failure the gateway stays uninitialized and the call may be retried.
    pub async fn initialize(&self) -> DbResult<()> {
        let mut slot = self.inner.pool.write().await;
        if slot.is_some() {
            debug!("Database already initialized");
            return Ok(());
        }

        let config = &self.inner.config;
        info!(
            path = %config.database_path.display(),
            in_memory = config.in_memory,
            "Initializing database"
        );

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            // An in-memory database lives only as long as its connection
            .idle_timeout((!config.in_memory).then_some(config.idle_timeout))
            .max_lifetime(if config.in_memory { None } else { Some(Duration::from_secs(1800)) })
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        if let Err(e) = self.prepare(&pool).await {
            warn!(error = %e, "Database initialization failed");
            pool.close().await;
            return Err(e);
        }

        *slot = Some(pool);
        info!(max_connections = config.max_connections, "Database ready");
        Ok(())
    }

    async fn prepare(&self, pool: &SqlitePool) -> DbResult<()> {
        let config = &self.inner.config;

        if config.run_migrations {
            migrations::run_migrations(pool).await?;
        }

        let locks = &self.inner.locks;
        {
            let _guard = locks.payment_methods.lock().await;
            payment_method::seed_defaults(pool).await?;
        }
        if config.seed_sample_categories {
            let _guard = locks.categories.lock().await;
            category::seed_samples(pool).await?;
        }
        Ok(())
    }

    /// Closes the pool. Every later call fails with `NotInitialized`
    /// until [`initialize`](Self::initialize) runs again.
    pub async fn close(&self) {
        let pool = self.inner.pool.write().await.take();
        if let Some(pool) = pool {
            info!("Closing database connection pool");
            pool.close().await;
        }
    }

    /// True once `initialize()` has completed and `close()` has not been called.
    pub async fn is_initialized(&self) -> bool {
        self.inner.pool.read().await.is_some()
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        match self.pool().await {
            Ok(pool) => sqlx::query("SELECT 1").execute(&pool).await.is_ok(),
            Err(_) => false,
        }
    }

    /// Returns `(total_migrations, applied_migrations)`.
    pub async fn migration_status(&self) -> DbResult<(usize, usize)> {
        let pool = self.pool().await?;
        migrations::migration_status(&pool).await
    }

    /// The configuration this gateway was built with.
    pub fn config(&self) -> &DbConfig {
        &self.inner.config
    }

    /// Returns the category repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let all = db.categories().list().await?;
    /// ```
    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.clone())
    }

    /// Returns the payment method repository.
    pub fn payment_methods(&self) -> PaymentMethodRepository {
        PaymentMethodRepository::new(self.clone())
    }

    /// Inserts the default payment methods if the table is empty.
    ///
    /// Returns how many rows were inserted (0 when the table already had rows).
    pub async fn seed_payment_methods(&self) -> DbResult<usize> {
        let pool = self.pool().await?;
        let _guard = self.inner.locks.payment_methods.lock().await;
        payment_method::seed_defaults(&pool).await
    }

    /// Inserts the sample categories if the table is empty.
    pub async fn seed_sample_categories(&self) -> DbResult<usize> {
        let pool = self.pool().await?;
        let _guard = self.inner.locks.categories.lock().await;
        category::seed_samples(&pool).await
    }

    /// The live pool, or `NotInitialized`.
    pub(crate) async fn pool(&self) -> DbResult<SqlitePool> {
        self.inner
            .pool
            .read()
            .await
            .clone()
            .ok_or(DbError::NotInitialized)
    }

    pub(crate) fn locks(&self) -> &WriteLocks {
        &self.inner.locks
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory());
        assert!(!db.is_initialized().await);
        assert!(!db.health_check().await);

        db.initialize().await.unwrap();

        assert!(db.is_initialized().await);
        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let db = Database::new(DbConfig::in_memory());
        db.initialize().await.unwrap();
        db.initialize().await.unwrap();

        assert_eq!(db.payment_methods().count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_calls_before_initialize_fail() {
        let db = Database::new(DbConfig::in_memory());

        assert!(matches!(
            db.categories().list().await,
            Err(DbError::NotInitialized)
        ));
        assert!(matches!(
            db.seed_payment_methods().await,
            Err(DbError::NotInitialized)
        ));
        assert!(matches!(
            db.seed_sample_categories().await,
            Err(DbError::NotInitialized)
        ));
        assert!(matches!(
            db.migration_status().await,
            Err(DbError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn test_close_returns_to_uninitialized() {
        let db = Database::new(DbConfig::in_memory());
        db.initialize().await.unwrap();
        db.close().await;

        assert!(!db.is_initialized().await);
        assert!(matches!(
            db.payment_methods().list().await,
            Err(DbError::NotInitialized)
        ));

        // Closing twice is harmless
        db.close().await;
    }

    #[tokio::test]
    async fn test_migration_status() {
        let db = Database::new(DbConfig::in_memory());
        db.initialize().await.unwrap();

        let (total, applied) = db.migration_status().await.unwrap();
        assert_eq!(total, applied);
        assert!(total >= 1);
    }

    #[tokio::test]
    async fn test_sample_categories_seeded_by_default() {
        let db = Database::new(DbConfig::in_memory());
        db.initialize().await.unwrap();

        assert_eq!(db.categories().count().await.unwrap(), 5);
        // Already populated, so nothing more is inserted
        assert_eq!(db.seed_sample_categories().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sample_categories_can_be_disabled() {
        let db = Database::new(DbConfig::in_memory().seed_sample_categories(false));
        db.initialize().await.unwrap();

        assert_eq!(db.categories().count().await.unwrap(), 0);
        assert_eq!(db.payment_methods().count().await.unwrap(), 5);
    }

    #[test]
    fn test_config_defaults() {
        assert!(DbConfig::new("/tmp/test.db").seed_sample_categories);
        assert!(DbConfig::in_memory().seed_sample_categories);
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2)
            .seed_sample_categories(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.seed_sample_categories);
        assert!(!config.in_memory);
    }

    #[tokio::test]
    async fn test_file_database_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dindin.db");

        let db = Database::new(DbConfig::new(&path));
        db.initialize().await.unwrap();
        let created = db
            .categories()
            .create(&dindin_core::CreateCategoryInput::new(
                "Mercado",
                dindin_core::IconName::ShoppingCart,
                dindin_core::CategoryColor::Green,
                dindin_core::CategoryType::Expense,
            ))
            .await
            .unwrap();
        db.close().await;

        let reopened = Database::new(DbConfig::new(&path));
        reopened.initialize().await.unwrap();

        let found = reopened.categories().get(&created.id).await.unwrap();
        assert_eq!(found, Some(created));
        // Seeding did not run a second time
        assert_eq!(reopened.payment_methods().count().await.unwrap(), 5);
    }
}
