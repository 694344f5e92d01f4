//! # Payment Method Repository
//!
//! Payment methods are seeded on first run and only ever toggled afterwards.

use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use dindin_core::seed::DEFAULT_PAYMENT_METHODS;
use dindin_core::{PaymentMethod, UpdatePaymentMethodInput, ValidationError};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::timestamps::{format_timestamp, next_update_timestamp, now, parse_timestamp};

const TABLE: &str = "payment_methods";

const SELECT_COLUMNS: &str = "SELECT id, name, icon, enabled, created_at, updated_at FROM payment_methods";

#[derive(Debug, sqlx::FromRow)]
struct PaymentMethodRow {
    id: String,
    name: String,
    icon: String,
    enabled: i64,
    created_at: String,
    updated_at: String,
}

impl TryFrom<PaymentMethodRow> for PaymentMethod {
    type Error = DbError;

    fn try_from(row: PaymentMethodRow) -> DbResult<Self> {
        Ok(PaymentMethod {
            icon: row
                .icon
                .parse()
                .map_err(|e: dindin_core::CoreError| DbError::invalid_row(TABLE, &row.id, e))?,
            enabled: row.enabled != 0,
            created_at: parse_timestamp(TABLE, &row.id, &row.created_at)?,
            updated_at: parse_timestamp(TABLE, &row.id, &row.updated_at)?,
            name: row.name,
            id: row.id,
        })
    }
}

/// Repository for payment method database operations.
#[derive(Debug, Clone)]
pub struct PaymentMethodRepository {
    db: Database,
}

impl PaymentMethodRepository {
    /// Creates a new PaymentMethodRepository.
    pub fn new(db: Database) -> Self {
        PaymentMethodRepository { db }
    }

    /// Lists every payment method ordered by name (then id).
    pub async fn list(&self) -> DbResult<Vec<PaymentMethod>> {
        let pool = self.db.pool().await?;

        let rows = sqlx::query_as::<_, PaymentMethodRow>(&format!("{} ORDER BY name ASC, id ASC", SELECT_COLUMNS))
            .fetch_all(&pool)
            .await?;

        debug!(count = rows.len(), "Listed payment methods");
        rows.into_iter().map(PaymentMethod::try_from).collect()
    }

    /// Gets a payment method by id.
    ///
    /// ## Returns
    /// * `Ok(Some(method))` - Found
    /// * `Ok(None)` - No row with that id
    pub async fn get(&self, id: &str) -> DbResult<Option<PaymentMethod>> {
        let pool = self.db.pool().await?;

        let row = sqlx::query_as::<_, PaymentMethodRow>(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&pool)
            .await?;

        row.map(PaymentMethod::try_from).transpose()
    }

    /// Sets `enabled` and returns the merged record.
    ///
    /// ## Errors
    /// * `NotFound` - no payment method with that id
    pub async fn update(&self, input: &UpdatePaymentMethodInput) -> DbResult<PaymentMethod> {
        if input.id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "id".to_string(),
            }
            .into());
        }

        let pool = self.db.pool().await?;
        let _guard = self.db.locks().payment_methods.lock().await;

        let mut tx = pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let row = sqlx::query_as::<_, PaymentMethodRow>(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
            .bind(&input.id)
            .fetch_optional(&mut *tx)
            .await?;

        let mut method = match row {
            Some(row) => PaymentMethod::try_from(row)?,
            None => return Err(DbError::not_found("PaymentMethod", &input.id)),
        };

        method.enabled = input.enabled;
        method.updated_at = next_update_timestamp(method.updated_at);

        sqlx::query("UPDATE payment_methods SET enabled = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(method.enabled)
            .bind(format_timestamp(method.updated_at))
            .bind(&method.id)
            .execute(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(id = %method.id, enabled = method.enabled, "Updated payment method");
        Ok(method)
    }

    /// Number of stored payment methods.
    pub async fn count(&self) -> DbResult<i64> {
        let pool = self.db.pool().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payment_methods")
            .fetch_one(&pool)
            .await?;
        Ok(count)
    }
}

/// Inserts the built-in payment methods when the table is empty.
///
/// Caller holds the `payment_methods` write lock.
pub(crate) async fn seed_defaults(pool: &SqlitePool) -> DbResult<usize> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payment_methods")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        debug!(existing, "Payment methods present, skipping seed");
        return Ok(0);
    }

    let timestamp = format_timestamp(now());
    for seed in DEFAULT_PAYMENT_METHODS.iter() {
        sqlx::query(
            r#"
            INSERT INTO payment_methods (id, name, icon, enabled, created_at, updated_at)
            VALUES (?1, ?2, ?3, 1, ?4, ?4)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(seed.name)
        .bind(seed.icon)
        .bind(&timestamp)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    info!(count = DEFAULT_PAYMENT_METHODS.len(), "Seeded default payment methods");
    Ok(DEFAULT_PAYMENT_METHODS.len())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use dindin_core::IconName;

    async fn ready_db() -> Database {
        let db = Database::new(DbConfig::in_memory());
        db.initialize().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_initialize_seeds_defaults_enabled() {
        let db = ready_db().await;
        let methods = db.payment_methods().list().await.unwrap();

        let names: Vec<&str> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Boleto", "Cartão de Crédito", "Cartão de Débito", "Dinheiro", "Pix"]
        );
        assert!(methods.iter().all(|m| m.enabled));

        let pix = methods.iter().find(|m| m.name == "Pix").unwrap();
        assert_eq!(pix.icon, IconName::Pix);
    }

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let db = ready_db().await;

        let before = db.payment_methods().list().await.unwrap();

        assert_eq!(db.seed_payment_methods().await.unwrap(), 0);
        assert_eq!(db.seed_payment_methods().await.unwrap(), 0);

        // Same ids and timestamps, not just the same count
        assert_eq!(db.payment_methods().list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let db = ready_db().await;
        assert_eq!(db.payment_methods().get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_toggle_enabled() {
        let db = ready_db().await;
        let repo = db.payment_methods();
        let boleto = repo.list().await.unwrap().remove(0);

        let disabled = repo
            .update(&UpdatePaymentMethodInput::new(&boleto.id, false))
            .await
            .unwrap();
        assert!(!disabled.enabled);
        assert_eq!(disabled.name, boleto.name);
        assert!(disabled.updated_at > boleto.updated_at);

        let stored = repo.get(&boleto.id).await.unwrap().unwrap();
        assert_eq!(stored, disabled);

        let enabled = repo
            .update(&UpdatePaymentMethodInput::new(&boleto.id, true))
            .await
            .unwrap();
        assert!(enabled.enabled);
        assert!(enabled.updated_at > disabled.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let db = ready_db().await;

        let err = db
            .payment_methods()
            .update(&UpdatePaymentMethodInput::new("missing", false))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = db
            .payment_methods()
            .update(&UpdatePaymentMethodInput::new(" ", false))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }
}
