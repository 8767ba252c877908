//! Registration and login.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use super::json_body;
use super::users::to_new_user;
use crate::error::AppError;
use crate::models::{LoginRequest, UserRequest};
use crate::response::{success_login, success_operation};
use crate::state::AppState;

/// POST /users/register: create with field checks.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = json_body(payload)?;
    req.validate()?;
    let user = to_new_user(&state, req).await?;
    let created = state.users.create(&user).await?;
    tracing::info!(user_id = created.id, "user registered");
    Ok(success_operation())
}

/// POST /users/login: verify credentials and hand back a fresh token.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = json_body(payload)?;
    req.validate()?;
    let user = state
        .users
        .authenticate(&req.email, &req.password, &state.tokens)
        .await
        .map_err(AppError::storage_as_bad_request)?;
    let token = user
        .token
        .ok_or_else(|| AppError::Internal("token not stored".into()))?;
    tracing::info!(user_id = user.id, "user logged in");
    Ok(success_login(token))
}
