//! API error types with IntoResponse
//!
//! Every failure surfaces as a JSON body with a single `error` field and
//! an HTTP status matching the error kind. 500-class details go to the
//! log, never to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::service::ServiceError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Bad input shape or range (400)
    BadRequest { message: String },

    /// No product behind the requested id (404)
    NotFound,

    /// Transaction/database failure (500, logged)
    Database(DbError),

    /// Other internal failure (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            Self::NotFound => (StatusCode::NOT_FOUND, "Product not found.".to_owned()),
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred.".to_owned(),
                )
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred.".to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(v) => Self::BadRequest {
                message: v.to_string(),
            },
            m @ ServiceError::MissingId => Self::BadRequest {
                message: m.to_string(),
            },
            ServiceError::Db(DbError::NotFound { .. }) => Self::NotFound,
            ServiceError::Db(db) => Self::Database(db),
        }
    }
}
