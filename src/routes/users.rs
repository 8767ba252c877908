//! /users routes. Static segments take priority over `:id`.

use crate::handlers::{auth, users};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/users/register", post(auth::register))
        .route("/users/login", post(auth::login))
        .route(
            "/users/:id",
            get(users::read).put(users::update).delete(users::delete),
        )
        .with_state(state)
}
