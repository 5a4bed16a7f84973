//! PostgreSQL product store
//!
//! Expects the `products` table from `sql/schema.sql`. Attributes live in a
//! JSONB column; updates merge with the `||` operator.

use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};

use crate::config::DatabaseConfig;
use crate::database::create_pool;
use crate::error::{DatabaseError, DatabaseOperation, Result};
use crate::models::{Attributes, Product, ProductId};

use super::pagination::Pagination;
use super::traits::{ProductStore, StoreResult};

const PRODUCT_COLUMNS: &str = "id, attributes, available, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    attributes: Json<Attributes>,
    available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            attributes: row.attributes.0,
            available: row.available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// [`ProductStore`] backed by a sqlx `PgPool`
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using the configured pool settings and retry policy
    pub async fn open(config: &DatabaseConfig) -> Result<Self> {
        Ok(Self::new(create_pool(config).await?))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn db_error(operation: DatabaseOperation) -> impl FnOnce(sqlx::Error) -> DatabaseError {
    move |err| DatabaseError {
        operation,
        ..DatabaseError::from(err)
    }
}

fn missing_row(id: ProductId) -> DatabaseError {
    DatabaseError::not_found(DatabaseOperation::Update, "Record to update not found")
        .add_context(format!("products#{}", id))
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl ProductStore for PgProductStore {
    async fn insert(&self, attributes: Attributes) -> StoreResult<Product> {
        let sql = format!(
            "INSERT INTO products (attributes) VALUES ($1) RETURNING {}",
            PRODUCT_COLUMNS
        );

        sqlx::query_as::<_, ProductRow>(&sql)
            .bind(Json(attributes))
            .fetch_one(&self.pool)
            .await
            .map(Product::from)
            .map_err(db_error(DatabaseOperation::Insert))
    }

    async fn count_available(&self) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE available = TRUE")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error(DatabaseOperation::Query))?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn find_available_page(&self, pagination: Pagination) -> StoreResult<Vec<Product>> {
        let sql = format!(
            "SELECT {} FROM products WHERE available = TRUE LIMIT $1 OFFSET $2",
            PRODUCT_COLUMNS
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(to_i64(pagination.limit))
            .bind(to_i64(pagination.offset))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error(DatabaseOperation::Query))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_available(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let sql = format!(
            "SELECT {} FROM products WHERE id = $1 AND available = TRUE",
            PRODUCT_COLUMNS
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error(DatabaseOperation::Query))?;

        Ok(row.map(Product::from))
    }

    async fn merge_attributes(&self, id: ProductId, patch: Attributes) -> StoreResult<Product> {
        let sql = format!(
            "UPDATE products SET attributes = attributes || $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            PRODUCT_COLUMNS
        );

        sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .bind(Json(patch))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error(DatabaseOperation::Update))?
            .map(Product::from)
            .ok_or_else(|| missing_row(id))
    }

    async fn mark_unavailable(&self, id: ProductId) -> StoreResult<Product> {
        let sql = format!(
            "UPDATE products SET available = FALSE, updated_at = NOW() \
             WHERE id = $1 AND available = TRUE RETURNING {}",
            PRODUCT_COLUMNS
        );

        sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error(DatabaseOperation::Update))?
            .map(Product::from)
            .ok_or_else(|| missing_row(id))
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_error(DatabaseOperation::Query))?;
        Ok(())
    }

    async fn close(&self) {
        tracing::info!("Closing database connection pool");
        self.pool.close().await;
    }
}
