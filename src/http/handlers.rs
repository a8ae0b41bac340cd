//! One handler per endpoint. Gates run as extractors; handlers only talk to
//! the store and shape the response.

use super::extract::{ProductId, RequireApiKey, ValidProduct};
use super::AppState;
use crate::domain::Product;
use crate::error::{ApiError, ApiResult};
use crate::query::{self, ListQuery, Page, Stats};
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, Uri};
use axum::Json;
use serde_json::{json, Value};
use tracing::{info, instrument};

#[instrument(skip(state, params))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Json<Page>> {
    let params = ListQuery::from_pairs(params);
    let products = state.store.list().await?;
    let page = query::query(products, &params);
    info!(total = page.total, returned = page.data.len(), "Listed products");
    Ok(Json(page))
}

#[instrument(skip(state))]
pub async fn product_stats(State(state): State<AppState>) -> ApiResult<Json<Stats>> {
    let products = state.store.list().await?;
    Ok(Json(query::stats(&products)))
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> ApiResult<Json<Product>> {
    state
        .store
        .find_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::product_not_found(&id))
}

#[instrument(skip(state, draft), fields(name = %draft.name))]
pub async fn create_product(
    State(state): State<AppState>,
    _auth: RequireApiKey,
    ValidProduct(draft): ValidProduct,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let created = state.store.insert(draft).await?;
    info!(id = %created.id, "Product created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, draft))]
pub async fn replace_product(
    State(state): State<AppState>,
    _auth: RequireApiKey,
    ProductId(id): ProductId,
    ValidProduct(draft): ValidProduct,
) -> ApiResult<Json<Product>> {
    let updated = state.store.replace(&id, draft).await?;
    info!("Product replaced");
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    _auth: RequireApiKey,
    ProductId(id): ProductId,
) -> ApiResult<Json<Product>> {
    let removed = state.store.delete(&id).await?;
    info!("Product deleted");
    Ok(Json(removed))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "backend": state.store.backend_name() }))
}

pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Route not found: {method} {}", uri.path()))
}
