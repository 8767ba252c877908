//! Typed errors and HTTP mapping.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::OperationResponse;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("internal: {0}")]
    Internal(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    /// Storage failures on read, update and delete surface as 400; other variants pass through.
    pub fn storage_as_bad_request(self) -> Self {
        match self {
            AppError::Db(sqlx::Error::RowNotFound) => AppError::NotFound("row".into()),
            AppError::Db(e) => {
                tracing::warn!(error = %e, "storage operation failed");
                AppError::BadRequest("storage operation failed".into())
            }
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send to clients. Database and internal details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::Config(_) | AppError::Internal(_) | AppError::Db(_) => {
                match self.status() {
                    StatusCode::NOT_FOUND => "Not Found".into(),
                    _ => "Internal Server Error".into(),
                }
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        let body = OperationResponse {
            code: status.as_u16(),
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Rewrites error responses that did not come from `AppError` (body limit, timeout, method
/// mismatch) into the same `{code, message}` envelope.
pub async fn envelope_errors(response: Response) -> Response {
    let status = response.status();
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if !(status.is_client_error() || status.is_server_error()) || is_json {
        return response;
    }
    let body = OperationResponse {
        code: status.as_u16(),
        message: status.canonical_reason().unwrap_or("Error").to_string(),
    };
    let mut enveloped = (status, Json(body)).into_response();
    if let Some(allow) = response.headers().get(header::ALLOW) {
        enveloped.headers_mut().insert(header::ALLOW, allow.clone());
    }
    enveloped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failures_become_bad_request() {
        let err = AppError::Db(sqlx::Error::PoolTimedOut).storage_as_bad_request();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn create_failures_stay_internal() {
        let err = AppError::Db(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal Server Error");
    }

    #[test]
    fn not_found_passes_through_storage_mapping() {
        let err = AppError::NotFound("user 3".into()).storage_as_bad_request();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "not found: user 3");
    }

    #[test]
    fn payload_too_large_is_413() {
        let err = AppError::PayloadTooLarge("length limit exceeded".into());
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn bare_error_responses_get_the_envelope() {
        let response = (StatusCode::REQUEST_TIMEOUT, "").into_response();
        let response = envelope_errors(response).await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"code": 408, "message": "Request Timeout"}));
    }

    #[tokio::test]
    async fn json_and_success_responses_pass_through() {
        let response = AppError::NotFound("book 9".into()).into_response();
        let response = envelope_errors(response).await;
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "not found: book 9");

        let response = envelope_errors((StatusCode::OK, "plain").into_response()).await;
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"plain");
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let err = AppError::Db(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "Not Found");
    }
}
