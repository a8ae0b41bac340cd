//! Error normalization layer. Every failure leaves the router as one
//! canonical JSON envelope, whether a handler, an extractor or axum itself
//! produced it.

use super::AppState;
use crate::error::ApiError;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

/// Upper bound when reading the plain-text body of a framework rejection.
const REJECTION_BODY_LIMIT: usize = 16 * 1024;

/// Rewrites every failed response into the canonical error envelope.
///
/// Errors travel as an [`ApiError`] response extension. Axum's bare 405 (a
/// known path with the wrong method) is treated like an unknown route. Any
/// other failed response without an extension is classified by status and
/// its plain-text body becomes the message.
pub async fn normalize_errors(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let flagged = response.extensions_mut().remove::<ApiError>();
    let status = response.status();
    let err = match flagged {
        Some(err) => err,
        None if status == StatusCode::METHOD_NOT_ALLOWED => {
            ApiError::NotFound(format!("Route not found: {method} {path}"))
        }
        None if status.is_client_error() || status.is_server_error() => {
            let detail = match axum::body::to_bytes(response.into_body(), REJECTION_BODY_LIMIT).await {
                Ok(bytes) => String::from_utf8_lossy(&bytes).trim().to_string(),
                Err(_) => String::new(),
            };
            unflagged_error(status, detail)
        }
        None => return response,
    };

    match &err {
        ApiError::Internal(detail) => error!(%method, %path, error = %detail, "Request failed"),
        other => warn!(%method, %path, kind = other.name(), reason = %other, "Request rejected"),
    }

    let envelope = err.envelope(&method, &path, state.environment.is_production());
    (err.status_code(), Json(envelope)).into_response()
}

fn unflagged_error(status: StatusCode, detail: String) -> ApiError {
    let detail = if detail.is_empty() {
        status.canonical_reason().unwrap_or("Request failed").to_string()
    } else {
        detail
    };
    match status {
        StatusCode::NOT_FOUND => ApiError::NotFound(detail),
        StatusCode::UNAUTHORIZED => ApiError::Authentication(detail),
        s if s.is_server_error() => ApiError::Internal(detail),
        _ => ApiError::MalformedRequest(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unflagged_errors_classified_by_status() {
        assert_eq!(
            unflagged_error(StatusCode::PAYLOAD_TOO_LARGE, "too big".into()),
            ApiError::MalformedRequest("too big".into())
        );
        assert_eq!(
            unflagged_error(StatusCode::BAD_GATEWAY, String::new()),
            ApiError::Internal("Bad Gateway".into())
        );
        assert_eq!(
            unflagged_error(StatusCode::NOT_FOUND, "nothing".into()),
            ApiError::NotFound("nothing".into())
        );
    }
}
