//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "Successful Operation";

/// `{code, message}` body shared by mutating operations and errors.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct OperationResponse {
    pub code: u16,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub code: u16,
    pub message: String,
    pub token: String,
}

pub fn success_operation() -> (StatusCode, Json<OperationResponse>) {
    (
        StatusCode::OK,
        Json(OperationResponse {
            code: StatusCode::OK.as_u16(),
            message: SUCCESS_MESSAGE.into(),
        }),
    )
}

pub fn success_login(token: String) -> (StatusCode, Json<LoginResponse>) {
    (
        StatusCode::OK,
        Json(LoginResponse {
            code: StatusCode::OK.as_u16(),
            message: SUCCESS_MESSAGE.into(),
            token,
        }),
    )
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}
