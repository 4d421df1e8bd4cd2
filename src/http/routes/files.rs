//! Serving of previously uploaded files
//!
//! Resolution goes through [`UploadStore::resolve`], which canonicalizes
//! against the uploads root; escapes are answered exactly like missing
//! files.
//!
//! [`UploadStore::resolve`]: crate::uploads::UploadStore::resolve

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::uploads::store::content_type_for;

/// GET /uploads/{path}
async fn serve_upload(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    let Some(resolved) = state.store().resolve(&path).await else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::read(&resolved).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, content_type_for(&resolved)),
                (header::CACHE_CONTROL, "public, max-age=86400"),
            ],
            bytes,
        )
            .into_response(),
        // Raced against deletion between resolve and read
        Err(e) => {
            tracing::error!("Failed to read upload {}: {}", resolved.display(), e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Upload-serving routes
pub fn router() -> Router<AppState> {
    Router::new().route("/uploads/{*path}", get(serve_upload))
}
