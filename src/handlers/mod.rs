//! HTTP handlers for the users and books resources.

pub mod auth;
pub mod books;
pub mod users;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppError;

/// Path ids are unsigned decimal integers that fit an `i64`; anything else is a 400.
pub(crate) fn parse_id(id_str: &str) -> Result<i64, AppError> {
    let invalid = || AppError::BadRequest(format!("invalid id: {}", id_str));
    if id_str.is_empty() || !id_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    id_str.parse().map_err(|_| invalid())
}

/// Unwrap a JSON body. An over-limit body keeps its 413; every other rejection is a 400.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(value)| value).map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(e.body_text())
        } else {
            AppError::BadRequest(e.body_text())
        }
    })
}
