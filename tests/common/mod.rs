#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use product_api::app_system::ProductSystem;
use product_api::config::{AppConfig, Environment, StoreBackend};

pub const API_KEY: &str = "test-api-key";

pub fn test_config() -> AppConfig {
    AppConfig {
        api_key: API_KEY.to_string(),
        ..AppConfig::default()
    }
}

pub fn production_config() -> AppConfig {
    AppConfig {
        environment: Environment::Production,
        ..test_config()
    }
}

pub fn document_config(path: std::path::PathBuf) -> AppConfig {
    AppConfig {
        backend: StoreBackend::Document { path },
        ..test_config()
    }
}

pub fn app(config: &AppConfig) -> axum::Router {
    ProductSystem::start(config).router(config)
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

pub fn json_request(method: &str, uri: &str, key: Option<&str>, body: serde_json::Value) -> Request<Body> {
    raw_request(method, uri, key, body.to_string())
}

pub fn raw_request(method: &str, uri: &str, key: Option<&str>, body: String) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::from(body)).expect("request")
}

pub fn product_body(name: &str, price: f64) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "description": "A test product",
        "price": price,
        "category": "testing",
    })
}
