//! Shared application state for all routes.

use std::sync::Arc;

use crate::auth::{Argon2Params, TokenIssuer};
use crate::store::{BookGateway, HealthCheck, UserGateway};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserGateway>,
    pub books: Arc<dyn BookGateway>,
    pub health: Arc<dyn HealthCheck>,
    pub tokens: Arc<TokenIssuer>,
    pub password_params: Argon2Params,
}

impl AppState {
    /// Wire one store that backs both resources.
    pub fn new<S>(store: Arc<S>, tokens: TokenIssuer, password_params: Argon2Params) -> Self
    where
        S: UserGateway + BookGateway + HealthCheck + 'static,
    {
        Self {
            users: store.clone(),
            books: store.clone(),
            health: store,
            tokens: Arc::new(tokens),
            password_params,
        }
    }
}
