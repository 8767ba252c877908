mod common;

use axum::http::{Method, StatusCode};
use bookshelf_api::models::UserResponse;
use bookshelf_api::response::LoginResponse;
use bookshelf_api::UserGateway;
use common::{success, test_app};
use serde_json::json;

fn user_b() -> serde_json::Value {
    json!({"name": "Name Test B", "email": "test@alterra.id", "password": "password123"})
}

#[tokio::test]
async fn list_exposes_name_and_email_only() {
    let app = test_app();
    assert_eq!(app.post("/users", user_b()).await.status, StatusCode::OK);

    let res = app.get("/users").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.value(),
        json!([{"name": "Name Test B", "email": "test@alterra.id"}])
    );
}

#[tokio::test]
async fn get_after_create_returns_submitted_fields() {
    let app = test_app();
    let res = app.post("/users", user_b()).await;
    assert_eq!(res.value(), success());

    let res = app.get("/users/1").await;
    assert_eq!(res.status, StatusCode::OK);
    let user: UserResponse = res.json();
    assert_eq!(user.name, "Name Test B");
    assert_eq!(user.email, "test@alterra.id");
    assert!(res.value().get("password").is_none());
    assert!(res.value().get("token").is_none());
}

#[tokio::test]
async fn stored_password_is_hashed() {
    let app = test_app();
    app.post("/users", user_b()).await;
    let stored = UserGateway::get(app.store.as_ref(), 1).await.unwrap().unwrap();
    assert_ne!(stored.password, "password123");
    assert!(stored.password.starts_with("$argon2id$"));
}

#[tokio::test]
async fn missing_user_is_not_found() {
    let app = test_app();
    let res = app.get("/users/999").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.value()["code"], 404);
}

#[tokio::test]
async fn update_then_get_reflects_new_values() {
    let app = test_app();
    app.post("/users", user_b()).await;

    let res = app
        .put(
            "/users/1",
            json!({"name": "Name Test New", "email": "test@alterra.id", "password": "test123"}),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.value(), success());

    let user: UserResponse = app.get("/users/1").await.json();
    assert_eq!(user.name, "Name Test New");
}

#[tokio::test]
async fn update_and_delete_of_missing_user_are_not_found() {
    let app = test_app();
    assert_eq!(
        app.put("/users/7", user_b()).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(app.delete("/users/7").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_user_from_list_and_get() {
    let app = test_app();
    app.post("/users", user_b()).await;

    let res = app.delete("/users/1").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.value(), success());

    assert_eq!(app.get("/users").await.value(), json!([]));
    assert_eq!(app.get("/users/1").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_id_and_bad_body_are_bad_request() {
    let app = test_app();
    assert_eq!(app.get("/users/one").await.status, StatusCode::BAD_REQUEST);
    let res = app.send_raw(Method::POST, "/users", "not json").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.value()["code"], 400);
}

#[tokio::test]
async fn register_creates_a_user() {
    let app = test_app();
    let res = app.post("/users/register", user_b()).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.value(), success());
    assert_eq!(app.get("/users").await.json::<Vec<UserResponse>>().len(), 1);
}

#[tokio::test]
async fn register_validates_fields() {
    let app = test_app();
    let res = app
        .post(
            "/users/register",
            json!({"name": "", "email": "test@alterra.id", "password": "password123"}),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .post(
            "/users/register",
            json!({"name": "A", "email": "nope", "password": "password123"}),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .post(
            "/users/register",
            json!({"name": "A", "email": "a@alterra.id", "password": "123"}),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.get("/users").await.value(), json!([]));
}

#[tokio::test]
async fn login_issues_and_stores_a_token() {
    let app = test_app();
    app.post("/users/register", user_b()).await;

    let res = app
        .post(
            "/users/login",
            json!({"email": "test@alterra.id", "password": "password123"}),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let body: LoginResponse = res.json();
    assert_eq!(body.code, 200);
    assert_eq!(body.message, "Successful Operation");
    assert_eq!(app.tokens.verify(&body.token).unwrap().user_id, 1);

    let stored = UserGateway::get(app.store.as_ref(), 1).await.unwrap().unwrap();
    assert_eq!(stored.token.as_deref(), Some(body.token.as_str()));
}

#[tokio::test]
async fn login_with_wrong_password_never_succeeds() {
    let app = test_app();
    app.post("/users/register", user_b()).await;

    for password in ["password124", "", "PASSWORD123", "password123 "] {
        let res = app
            .post(
                "/users/login",
                json!({"email": "test@alterra.id", "password": password}),
            )
            .await;
        assert_ne!(res.status, StatusCode::OK, "password {:?} must fail", password);
        assert!(res.value().get("token").is_none());
    }

    let stored = UserGateway::get(app.store.as_ref(), 1).await.unwrap().unwrap();
    assert!(stored.token.is_none());
}

#[tokio::test]
async fn login_with_unknown_email_is_unauthorized() {
    let app = test_app();
    app.post("/users/register", user_b()).await;
    let res = app
        .post(
            "/users/login",
            json!({"email": "other@alterra.id", "password": "password123"}),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.value()["code"], 401);
}

#[tokio::test]
async fn login_does_not_delete_the_user() {
    let app = test_app();
    app.post("/users/register", user_b()).await;
    app.post(
        "/users/login",
        json!({"email": "test@alterra.id", "password": "password123"}),
    )
    .await;
    assert_eq!(app.get("/users/1").await.status, StatusCode::OK);
}

#[tokio::test]
async fn deleted_user_cannot_log_in() {
    let app = test_app();
    app.post("/users/register", user_b()).await;
    app.delete("/users/1").await;
    let res = app
        .post(
            "/users/login",
            json!({"email": "test@alterra.id", "password": "password123"}),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}
