//! Image upload endpoint
//!
//! Multipart in, stored-file reference out. A part is only written after
//! its extension, declared content type, and leading bytes all agree.

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;
use crate::uploads::filetype::{file_extension, ImageFormat, ALLOWED_EXTENSIONS};

/// Request size cap for uploads (50 MiB, well above the 10 MiB files the
/// frontend produces).
const MAX_REQUEST_BYTES: usize = 50 * 1024 * 1024;

/// POST /upload - multipart image upload
///
/// File parts with an empty submitted filename are skipped; the last
/// accepted part wins, matching the single-file frontend contract.
async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut stored: Option<(String, String)> = None; // (stored name, original name)

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return reject(StatusCode::BAD_REQUEST, &e.to_string()),
        };

        let original = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => continue,
        };

        let ext = file_extension(&original);
        let Some(format) = ImageFormat::from_extension(&ext) else {
            return reject(
                StatusCode::BAD_REQUEST,
                &format!(
                    "Invalid file extension. Allowed: {}",
                    ALLOWED_EXTENSIONS.join(", ")
                ),
            );
        };

        let declared = field.content_type().unwrap_or_default().to_owned();
        if !format.matches_mime(&declared) {
            return reject(
                StatusCode::BAD_REQUEST,
                &format!("File type not permitted: {}", declared),
            );
        }

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return reject(StatusCode::BAD_REQUEST, &e.to_string()),
        };

        if !format.matches_signature(&bytes) {
            return reject(
                StatusCode::BAD_REQUEST,
                &format!("File content does not match its declared type: {}", declared),
            );
        }

        match state.store().save(&ext, &bytes).await {
            Ok(name) => stored = Some((name, original)),
            Err(e) => {
                tracing::error!("Upload write failed: {}", e);
                return reject(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred.",
                );
            }
        }
    }

    match stored {
        Some((name, original)) => Json(json!({
            "success": true,
            "filePath": format!("/uploads/{}", name),
            "fileName": name,
            "originalFileName": original,
        }))
        .into_response(),
        None => reject(StatusCode::BAD_REQUEST, "No file uploaded."),
    }
}

fn reject(status: StatusCode, error: &str) -> Response {
    (status, Json(json!({ "success": false, "error": error }))).into_response()
}

/// Upload routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::Value;
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    use crate::uploads::UploadStore;

    const BOUNDARY: &str = "test-boundary";

    async fn test_app(store: UploadStore) -> Router {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");

        router().with_state(AppState::new(pool, store))
    }

    fn multipart_request(filename: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request")
    }

    fn empty_multipart_request() -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(format!("--{BOUNDARY}--\r\n")))
            .expect("request")
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    const PNG_BYTES: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
    ];

    #[tokio::test]
    async fn accepts_valid_png_and_stores_it() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = UploadStore::new(dir.path().join("uploads"));
        let app = test_app(store.clone()).await;

        let response = app
            .oneshot(multipart_request("guitar.png", "image/png", PNG_BYTES))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], Value::Bool(true));
        assert_eq!(body["originalFileName"], "guitar.png");

        let name = body["fileName"].as_str().expect("fileName");
        assert!(name.ends_with(".png"));
        assert_eq!(
            body["filePath"].as_str().expect("filePath"),
            format!("/uploads/{}", name)
        );

        let on_disk = std::fs::read(store.root().join(name)).expect("stored file");
        assert_eq!(on_disk, PNG_BYTES);
    }

    #[tokio::test]
    async fn rejects_svg_extension_with_allow_list() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = test_app(UploadStore::new(dir.path().join("uploads"))).await;

        let response = app
            .oneshot(multipart_request("logo.svg", "image/svg+xml", b"<svg/>"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], Value::Bool(false));
        assert_eq!(
            body["error"],
            "Invalid file extension. Allowed: gif, jpeg, jpg, png, webp"
        );
    }

    #[tokio::test]
    async fn rejects_allowed_extension_with_wrong_mime() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = test_app(UploadStore::new(dir.path().join("uploads"))).await;

        let response = app
            .oneshot(multipart_request("photo.png", "text/plain", PNG_BYTES))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "File type not permitted: text/plain"
        );
    }

    #[tokio::test]
    async fn rejects_content_that_does_not_match_signature() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = test_app(UploadStore::new(dir.path().join("uploads"))).await;

        let response = app
            .oneshot(multipart_request("photo.png", "image/png", b"GIF89a not a png"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], Value::Bool(false));
    }

    #[tokio::test]
    async fn no_file_part_is_400() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = test_app(UploadStore::new(dir.path().join("uploads"))).await;

        let response = app
            .oneshot(empty_multipart_request())
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "No file uploaded.");
    }
}
