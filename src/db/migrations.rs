//! Schema bootstrap for the products table
//!
//! Mirrors the deployment contract: tables are created if absent at
//! startup, nothing else is migrated.

use sqlx::SqlitePool;

/// Create the products table if it does not exist yet. Idempotent.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running catalog migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            brand TEXT NOT NULL,
            price REAL NOT NULL,
            available INTEGER NOT NULL,
            thumbnail TEXT NOT NULL,
            category_id INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Catalog migrations complete");
    Ok(())
}
