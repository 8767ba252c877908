//! Helpers to drive the router in-process against the memory store.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use bookshelf_api::auth::{Argon2Params, TokenIssuer};
use bookshelf_api::{app, AppState, MemoryStore, RouterLimits};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub tokens: TokenIssuer,
}

pub fn test_app() -> TestApp {
    test_app_with(RouterLimits::default(), |state| state)
}

/// Same as `test_app`, with custom limits and a hook to swap parts of the state.
pub fn test_app_with(limits: RouterLimits, customize: impl FnOnce(AppState) -> AppState) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let tokens = TokenIssuer::new(TEST_SECRET, chrono::Duration::hours(1));
    let state = AppState::new(store.clone(), tokens.clone(), Argon2Params::fast());
    TestApp {
        router: app(customize(state), limits),
        store,
        tokens,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn value(&self) -> Value {
        self.json()
    }
}

impl TestApp {
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request builds");
        self.send_request(request).await
    }

    pub async fn send_raw(&self, method: Method, uri: &str, raw: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw.to_owned()))
            .expect("request builds");
        self.send_request(request).await
    }

    /// Raw body with an explicit `Content-Length`, as a real client would send it.
    pub async fn send_sized(&self, method: Method, uri: &str, raw: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, raw.len())
            .body(Body::from(raw.to_owned()))
            .expect("request builds");
        self.send_request(request).await
    }

    async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body collects")
            .to_vec();
        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }
}

pub fn success() -> Value {
    serde_json::json!({"code": 200, "message": "Successful Operation"})
}
