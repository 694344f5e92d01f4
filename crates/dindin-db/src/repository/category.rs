//! # Category Repository
//!
//! Database operations for categories.
//!
//! ## Update Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Partial Update                                       │
//! │                                                                         │
//! │  UpdateCategoryInput { id, type: Some(Income) }                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lock `categories` ── BEGIN                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT row by id ──► missing? ──► NotFound (rollback)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  merge present fields, bump updated_at                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UPDATE name, icon, color, type, updated_at ── COMMIT                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  return merged Category                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{Sqlite, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use dindin_core::seed::sample_categories;
use dindin_core::validation::{validate_create_category, validate_update_category};
use dindin_core::{Category, CreateCategoryInput, UpdateCategoryInput};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::timestamps::{format_timestamp, next_update_timestamp, now, parse_timestamp};

const TABLE: &str = "categories";

/// Raw `categories` row. Enumerations are decoded by hand so a bad stored
/// value surfaces as [`DbError::InvalidRow`] naming the row.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    icon: String,
    color: String,
    #[sqlx(rename = "type")]
    category_type: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<CategoryRow> for Category {
    type Error = DbError;

    fn try_from(row: CategoryRow) -> DbResult<Self> {
        let invalid = |e: dindin_core::CoreError| DbError::invalid_row(TABLE, &row.id, e);

        Ok(Category {
            icon: row.icon.parse().map_err(invalid)?,
            color: row.color.parse().map_err(invalid)?,
            category_type: row.category_type.parse().map_err(invalid)?,
            created_at: parse_timestamp(TABLE, &row.id, &row.created_at)?,
            updated_at: parse_timestamp(TABLE, &row.id, &row.updated_at)?,
            name: row.name,
            id: row.id,
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT id, name, icon, color, type, created_at, updated_at FROM categories";

/// Repository for category database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.categories();
///
/// let lazer = repo.create(&CreateCategoryInput::new(
///     "Lazer", IconName::Gamepad2, CategoryColor::Purple, CategoryType::Expense,
/// )).await?;
///
/// repo.update(&UpdateCategoryInput::new(&lazer.id).category_type(CategoryType::Income)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: Database,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(db: Database) -> Self {
        CategoryRepository { db }
    }

    /// Lists every category ordered by name (then id).
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let pool = self.db.pool().await?;

        let rows = sqlx::query_as::<_, CategoryRow>(&format!("{} ORDER BY name ASC, id ASC", SELECT_COLUMNS))
            .fetch_all(&pool)
            .await?;

        debug!(count = rows.len(), "Listed categories");
        rows.into_iter().map(Category::try_from).collect()
    }

    /// Gets a category by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Category))` - Category found
    /// * `Ok(None)` - Category not found
    pub async fn get(&self, id: &str) -> DbResult<Option<Category>> {
        let pool = self.db.pool().await?;

        let row = sqlx::query_as::<_, CategoryRow>(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&pool)
            .await?;

        row.map(Category::try_from).transpose()
    }

    /// Creates a category and returns the stored record.
    ///
    /// The name is trimmed; `created_at` and `updated_at` share one instant.
    pub async fn create(&self, input: &CreateCategoryInput) -> DbResult<Category> {
        let input = validate_create_category(input)?;
        let pool = self.db.pool().await?;
        let _guard = self.db.locks().categories.lock().await;

        let category = new_category(input);
        insert(&pool, &category).await?;

        debug!(id = %category.id, name = %category.name, "Created category");
        Ok(category)
    }

    /// Applies a partial update and returns the merged record.
    ///
    /// ## Errors
    /// * `Validation` - empty id or bad name
    /// * `NotFound` - no category with that id
    pub async fn update(&self, input: &UpdateCategoryInput) -> DbResult<Category> {
        validate_update_category(input)?;
        let pool = self.db.pool().await?;
        let _guard = self.db.locks().categories.lock().await;

        let mut tx = pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let row = sqlx::query_as::<_, CategoryRow>(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
            .bind(&input.id)
            .fetch_optional(&mut *tx)
            .await?;

        let mut category = match row {
            Some(row) => Category::try_from(row)?,
            None => return Err(DbError::not_found("Category", &input.id)),
        };

        category.apply(input);
        category.updated_at = next_update_timestamp(category.updated_at);

        sqlx::query(
            r#"
            UPDATE categories
            SET name = ?1, icon = ?2, color = ?3, type = ?4, updated_at = ?5
            WHERE id = ?6
            "#,
        )
        .bind(&category.name)
        .bind(category.icon)
        .bind(category.color)
        .bind(category.category_type)
        .bind(format_timestamp(category.updated_at))
        .bind(&category.id)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(id = %category.id, "Updated category");
        Ok(category)
    }

    /// Deletes a category.
    ///
    /// Deleting a missing id succeeds; the return value says whether a row
    /// was actually removed.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let pool = self.db.pool().await?;
        let _guard = self.db.locks().categories.lock().await;

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&pool)
            .await?;

        let removed = result.rows_affected() > 0;
        debug!(id = %id, removed, "Deleted category");
        Ok(removed)
    }

    /// Number of stored categories.
    pub async fn count(&self) -> DbResult<i64> {
        let pool = self.db.pool().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&pool)
            .await?;
        Ok(count)
    }
}

fn new_category(input: CreateCategoryInput) -> Category {
    let timestamp = now();
    Category {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        icon: input.icon,
        color: input.color,
        category_type: input.category_type,
        created_at: timestamp,
        updated_at: timestamp,
    }
}

async fn insert<'e, E>(executor: E, category: &Category) -> DbResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO categories (id, name, icon, color, type, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&category.id)
    .bind(&category.name)
    .bind(category.icon)
    .bind(category.color)
    .bind(category.category_type)
    .bind(format_timestamp(category.created_at))
    .bind(format_timestamp(category.updated_at))
    .execute(executor)
    .await?;
    Ok(())
}

/// Inserts the sample categories when the table is empty.
///
/// Caller holds the `categories` write lock.
pub(crate) async fn seed_samples(pool: &SqlitePool) -> DbResult<usize> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        debug!(existing, "Categories present, skipping sample seed");
        return Ok(0);
    }

    let samples = sample_categories();
    for input in &samples {
        let category = new_category(validate_create_category(input)?);
        insert(&mut *tx, &category).await?;
    }

    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    info!(count = samples.len(), "Seeded sample categories");
    Ok(samples.len())
}

// =============================================================================
// Unit Tests
// =============================================================================
