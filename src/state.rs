//! Application state shared across handlers

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::uploads::UploadStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: SqlitePool,
    store: UploadStore,
}

impl AppState {
    pub fn new(pool: SqlitePool, store: UploadStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { pool, store }),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    pub fn store(&self) -> &UploadStore {
        &self.inner.store
    }
}
