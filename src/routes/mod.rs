//! Route table and the middleware stack wrapped around it.

mod books;
mod common;
mod users;

pub use books::book_routes;
pub use common::common_routes;
pub use users::user_routes;

use axum::{middleware, Router};
use std::time::Duration;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::error::envelope_errors;
use crate::state::AppState;

#[derive(Debug, Clone, Copy)]
pub struct RouterLimits {
    pub request_timeout: Duration,
    pub body_limit: usize,
}

impl Default for RouterLimits {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            body_limit: 1024 * 1024,
        }
    }
}

/// Full application router: health, users and books, each request bounded by `limits`.
/// Every error leaves as a `{code, message}` JSON body.
pub fn app(state: AppState, limits: RouterLimits) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(user_routes(state.clone()))
        .merge(book_routes(state))
        .layer(RequestBodyLimitLayer::new(limits.body_limit))
        .layer(TimeoutLayer::new(limits.request_timeout))
        .layer(middleware::map_response(envelope_errors))
        .layer(TraceLayer::new_for_http())
}
