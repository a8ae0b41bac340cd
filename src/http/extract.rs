//! Capability-typed request gates.
//!
//! Axum runs part extractors in argument order and the body extractor last,
//! so a handler taking `(RequireApiKey, ProductId, ValidProduct)` always
//! authenticates before it parses or validates anything.

use super::AppState;
use crate::auth::{authenticate, AuthError, API_KEY_HEADER};
use crate::domain::ProductDraft;
use crate::error::ApiError;
use async_trait::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde_json::Value;
use tracing::debug;

/// Proof that the request carried the configured API key.
#[derive(Debug, Clone, Copy)]
pub struct RequireApiKey;

#[async_trait]
impl FromRequestParts<AppState> for RequireApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let verdict = match parts.headers.get(API_KEY_HEADER) {
            None => authenticate(None, &state.api_key),
            Some(value) => match value.to_str() {
                Ok(key) => authenticate(Some(key), &state.api_key),
                Err(_) => Err(AuthError::Invalid),
            },
        };
        if let Err(err) = verdict {
            debug!(reason = %err, "Rejected request without a valid API key");
        }
        verdict.map(|()| RequireApiKey).map_err(ApiError::from)
    }
}

/// The `:id` path segment. Undecodable segments are malformed requests.
#[derive(Debug, Clone)]
pub struct ProductId(pub String);

#[async_trait]
impl FromRequestParts<AppState> for ProductId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::MalformedRequest(rejection.body_text()))?;
        Ok(ProductId(id))
    }
}

/// A JSON body that passed product validation.
#[derive(Debug, Clone)]
pub struct ValidProduct(pub ProductDraft);

#[async_trait]
impl FromRequest<AppState> for ValidProduct {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::MalformedRequest(rejection.body_text()))?;
        let draft = state.validator.validate(&payload)?;
        Ok(ValidProduct(draft))
    }
}
