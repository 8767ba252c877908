//! User CRUD handlers. Passwords are hashed here, before they reach a gateway.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use super::{json_body, parse_id};
use crate::auth::hash_password;
use crate::error::AppError;
use crate::models::{NewUser, UserRequest, UserResponse};
use crate::response::{ok, success_operation};
use crate::state::AppState;

/// Hashing runs on the blocking pool.
pub(crate) async fn to_new_user(state: &AppState, req: UserRequest) -> Result<NewUser, AppError> {
    let params = state.password_params;
    let UserRequest {
        name,
        email,
        password,
    } = req;
    let password = tokio::task::spawn_blocking(move || hash_password(&password, params))
        .await
        .map_err(|e| AppError::Internal(format!("spawn password hashing task: {}", e)))??;
    Ok(NewUser {
        name,
        email,
        password,
    })
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state
        .users
        .list()
        .await
        .map_err(AppError::storage_as_bad_request)?;
    let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(ok(body))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let user = state
        .users
        .get(id)
        .await
        .map_err(AppError::storage_as_bad_request)?
        .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;
    Ok(ok(UserResponse::from(user)))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = to_new_user(&state, json_body(payload)?).await?;
    let created = state.users.create(&user).await?;
    tracing::info!(user_id = created.id, "user created");
    Ok(success_operation())
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let user = to_new_user(&state, json_body(payload)?).await?;
    state
        .users
        .update(&user, id)
        .await
        .map_err(AppError::storage_as_bad_request)?
        .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;
    tracing::info!(user_id = id, "user updated");
    Ok(success_operation())
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state
        .users
        .delete(id)
        .await
        .map_err(AppError::storage_as_bad_request)?
        .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;
    tracing::info!(user_id = id, "user deleted");
    Ok(success_operation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{verify_password, Argon2Params, TokenIssuer};
    use crate::store::MemoryStore;
    use std::sync::Arc;

    #[tokio::test(flavor = "current_thread")]
    async fn new_user_carries_a_verifiable_hash() {
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            TokenIssuer::new("secret", chrono::Duration::hours(1)),
            Argon2Params::fast(),
        );
        let req = UserRequest {
            name: "Ana".into(),
            email: "ana@alterra.id".into(),
            password: "password123".into(),
        };
        let user = to_new_user(&state, req).await.unwrap();
        assert_eq!(user.name, "Ana");
        assert_eq!(user.email, "ana@alterra.id");
        assert_ne!(user.password, "password123");
        assert!(verify_password("password123", &user.password));
    }
}
