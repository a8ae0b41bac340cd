//! HTTP surface: router, shared state, gates, and error normalization.

use crate::config::{AppConfig, Environment};
use crate::store::ProductStore;
use crate::validation::Validator;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod extract;
pub mod handlers;
pub mod normalize;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    pub api_key: Arc<str>,
    pub validator: Validator,
    pub environment: Environment,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>, config: &AppConfig) -> Self {
        Self {
            store,
            api_key: Arc::from(config.api_key.as_str()),
            validator: Validator::new(config.strict_description),
            environment: config.environment,
        }
    }
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route("/products/stats", get(handlers::product_stats))
        .route(
            "/products/:id",
            get(handlers::get_product)
                .put(handlers::replace_product)
                .delete(handlers::delete_product),
        )
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
            )
        });

    Router::new()
        .nest("/api", product_routes())
        .route("/health", get(handlers::health))
        .fallback(handlers::route_not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            normalize::normalize_errors,
        ))
        .layer(trace_layer)
        .with_state(state)
}
