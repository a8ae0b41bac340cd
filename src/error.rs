//! API error taxonomy and the canonical error envelope.
//!
//! Handlers return [`ApiError`] and never build error bodies themselves.
//! [`ApiError::into_response`] only stashes the error in the response
//! extensions; [`crate::http::normalize::normalize_errors`] knows the request
//! path, method and environment and renders the final [`ErrorEnvelope`].

use crate::auth::AuthError;
use crate::store::StoreError;
use crate::validation::ValidationError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const REDACTED_MESSAGE: &str = "Internal server error";

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Authentication(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    MalformedRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "ValidationError",
            ApiError::Authentication(_) => "AuthenticationError",
            ApiError::NotFound(_) => "NotFoundError",
            ApiError::MalformedRequest(_) => "MalformedRequestError",
            ApiError::Conflict(_) => "ConflictError",
            ApiError::Internal(_) => "InternalError",
        }
    }

    /// Message shown to clients. Only internal errors are ever redacted.
    pub fn public_message(&self, production: bool) -> String {
        match self {
            ApiError::Internal(_) if production => REDACTED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    pub fn product_not_found(id: &str) -> Self {
        ApiError::NotFound(format!("Product with id {id} not found"))
    }

    /// Renders the canonical envelope for a request.
    pub fn envelope(&self, method: &str, path: &str, production: bool) -> ErrorEnvelope {
        ErrorEnvelope {
            error: ErrorBody {
                name: self.name().to_string(),
                message: self.public_message(production),
                status_code: self.status_code().as_u16(),
                timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                path: path.to_string(),
                method: method.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub name: String,
    pub message: String,
    pub status_code: u16,
    pub timestamp: String,
    pub path: String,
    pub method: String,
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.0)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Authentication(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::product_not_found(&id),
            StoreError::Conflict(id) => ApiError::Conflict(format!("Product with id {id} already exists")),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Fallback body for routers mounted without the normalizer; it is
        // replaced whenever `normalize_errors` is in the stack.
        let status = self.status_code();
        let body = Json(serde_json::json!({
            "error": { "name": self.name(), "message": self.to_string(), "statusCode": status.as_u16() }
        }));
        let mut response = (status, body).into_response();
        response.extensions_mut().insert(self);
        response
    }
}
