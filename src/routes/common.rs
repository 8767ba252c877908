//! Liveness, readiness and build metadata.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

/// `storage` is only reported by `/ready`.
#[derive(Serialize)]
struct Probe {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    storage: Option<&'static str>,
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

async fn health() -> Json<Probe> {
    Json(Probe {
        status: "ok",
        storage: None,
    })
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Probe>) {
    match state.health.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(Probe {
                status: "ok",
                storage: Some("ok"),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "storage ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Probe {
                    status: "degraded",
                    storage: Some("unavailable"),
                }),
            )
        }
    }
}

async fn version() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
