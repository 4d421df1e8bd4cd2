//! Product service - validation composed with persistence
//!
//! The only logic layer: drafts are validated before the repository is
//! touched, so argument and validation failures never reach the database.

use sqlx::SqlitePool;

use crate::db::repos::{DbError, ProductRepo};
use crate::models::{Product, ProductDraft, ValidationError};

/// Service error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Bad field shape or range; detected before any I/O
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Required identifier missing; detected before any I/O
    #[error("Product ID must be informed.")]
    MissingId,

    /// Persistence failure, including not-found
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Product service
pub struct ProductService<'a> {
    repo: ProductRepo<'a>,
}

impl<'a> ProductService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self {
            repo: ProductRepo::new(pool),
        }
    }

    /// Validate and insert; the returned product carries the generated id.
    pub async fn save(&self, draft: ProductDraft) -> Result<Product, ServiceError> {
        let product = draft.validated()?;
        Ok(self.repo.save(product).await?)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Product, ServiceError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.repo.find_all().await?)
    }

    /// Full-record overwrite.
    ///
    /// The draft must carry an id; a missing row behind that id is an
    /// explicit not-found error, not a silent no-op.
    pub async fn update(&self, draft: ProductDraft) -> Result<Product, ServiceError> {
        let id = draft.id.ok_or(ServiceError::MissingId)?;
        let product = draft.validated()?;
        Ok(self.repo.update(id, product).await?)
    }

    /// Idempotent delete by id.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        Ok(self.repo.delete(id).await?)
    }
}
