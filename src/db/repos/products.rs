//! Product repository
//!
//! Single-table CRUD with:
//! - one pooled connection and one transaction per write operation
//! - explicit not-found errors, no null sentinels
//! - idempotent delete

use sqlx::SqlitePool;

use crate::models::{NewProduct, Product};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: i64 },
}

/// Product repository
pub struct ProductRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a product and return it with the generated id.
    ///
    /// Runs in a transaction; on any failure the transaction rolls back
    /// on drop and no id is ever observed by the caller.
    pub async fn save(&self, product: NewProduct) -> Result<Product, DbError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, brand, price, available, thumbnail, category_id)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.brand)
        .bind(product.price)
        .bind(product.available)
        .bind(&product.thumbnail)
        .bind(product.category_id)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();
        tx.commit().await?;

        Ok(product.into_product(id))
    }

    /// Single-row lookup by primary key.
    pub async fn find_by_id(&self, id: i64) -> Result<Product, DbError> {
        let product: Product = sqlx::query_as(
            r#"
            SELECT id, name, description, brand, price, available, thumbnail, category_id
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: "product",
            id,
        })?;

        Ok(product)
    }

    /// All rows in storage order; callers must not assume a sort order.
    ///
    /// An empty table is an empty vec, never an error.
    pub async fn find_all(&self) -> Result<Vec<Product>, DbError> {
        let products: Vec<Product> = sqlx::query_as(
            r#"
            SELECT id, name, description, brand, price, available, thumbnail, category_id
            FROM products
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Full-row overwrite by id.
    ///
    /// A missing row is reported as [`DbError::NotFound`] from inside the
    /// transaction; the early return drops the transaction, which rolls
    /// it back.
    pub async fn update(&self, id: i64, product: NewProduct) -> Result<Product, DbError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?, description = ?, brand = ?, price = ?, available = ?, thumbnail = ?, category_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.brand)
        .bind(product.price)
        .bind(product.available)
        .bind(&product.thumbnail)
        .bind(product.category_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "product",
                id,
            });
        }

        tx.commit().await?;
        Ok(product.into_product(id))
    }

    /// Remove by id. Idempotent - deleting an id that does not exist
    /// commits and succeeds.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
