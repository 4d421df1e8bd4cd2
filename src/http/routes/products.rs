//! Product endpoints
//!
//! Verb + path to service calls, JSON in and out. Id parsing happens
//! here: the service only ever sees typed ids.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::http::error::ApiError;
use crate::models::{Product, ProductDraft};
use crate::service::ProductService;
use crate::state::AppState;

/// Parse the id path segment; anything non-integer is a client error.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid product ID."))
}

/// Unwrap a JSON body, turning deserializer rejections into the standard
/// error shape instead of axum's plain-text 400/415/422.
fn parse_body(payload: Result<Json<ProductDraft>, JsonRejection>) -> Result<ProductDraft, ApiError> {
    match payload {
        Ok(Json(draft)) => Ok(draft),
        Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
    }
}

/// GET /products - list all products
async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = ProductService::new(state.pool()).find_all().await?;
    Ok(Json(products))
}

/// GET /products/{id}
async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&raw_id)?;
    let product = ProductService::new(state.pool()).find_by_id(id).await?;
    Ok(Json(product))
}

/// POST /products - validate and insert
async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let draft = parse_body(payload)?;
    let product = ProductService::new(state.pool()).save(draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /products/{id} - full-record overwrite; the path id wins over any
/// id in the body.
async fn update_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&raw_id)?;
    let mut draft = parse_body(payload)?;
    draft.id = Some(id);

    let product = ProductService::new(state.pool()).update(draft).await?;
    Ok(Json(product))
}

/// PUT /products without an id segment
async fn update_without_id() -> ApiError {
    ApiError::bad_request("Product ID is required.")
}

/// DELETE /products/{id} - 204 whether or not a row existed
async fn delete_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    ProductService::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Product routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(list_products)
                .post(create_product)
                .put(update_without_id),
        )
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}
