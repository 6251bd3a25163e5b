use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware,
    Router,
};
use serde_json::Value;
use server::db::{AppState, Store};
use shared_types::Role;
use tower::ServiceExt;

/// Router over a private, freshly seeded store, with the permissive auth
/// middleware so `RoleRequired` extractors see the Bearer token.
pub fn test_app() -> Router {
    server::openapi::api_router(AppState::seeded())
        .layer(middleware::from_fn(server::auth::middleware::auth_middleware))
}

/// Session token for the seed account of `role`.
pub fn token_for(role: Role) -> String {
    let store = Store::seeded(server::db::today());
    let user = store
        .users
        .into_iter()
        .find(|u| u.role == role)
        .expect("every role has a seed account");
    server::auth::jwt::create_session_token(&user).expect("token signs")
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn json_or_null(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or(Value::Null)
}

fn request(method: &str, uri: &str, role: Option<Role>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(role) = role {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token_for(role)));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str, role: Role) -> (StatusCode, Value) {
    let (status, bytes) = send(app, request("GET", uri, Some(role), None)).await;
    (status, json_or_null(&bytes))
}

/// GET without any session.
pub async fn get_anonymous(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = send(app, request("GET", uri, None, None)).await;
    (status, json_or_null(&bytes))
}

/// GET a download and return the raw body as text.
pub async fn get_text(app: &Router, uri: &str, role: Role) -> (StatusCode, String) {
    let (status, bytes) = send(app, request("GET", uri, Some(role), None)).await;
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

pub async fn post_json(app: &Router, uri: &str, role: Role, body: &Value) -> (StatusCode, Value) {
    let (status, bytes) = send(app, request("POST", uri, Some(role), Some(body))).await;
    (status, json_or_null(&bytes))
}

pub async fn post_empty(app: &Router, uri: &str, role: Role) -> (StatusCode, Value) {
    let (status, bytes) = send(app, request("POST", uri, Some(role), None)).await;
    (status, json_or_null(&bytes))
}

pub async fn post_anonymous(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let (status, bytes) = send(app, request("POST", uri, None, Some(body))).await;
    (status, json_or_null(&bytes))
}

pub async fn put_json(app: &Router, uri: &str, role: Role, body: &Value) -> (StatusCode, Value) {
    let (status, bytes) = send(app, request("PUT", uri, Some(role), Some(body))).await;
    (status, json_or_null(&bytes))
}

pub async fn patch_json(app: &Router, uri: &str, role: Role, body: &Value) -> (StatusCode, Value) {
    let (status, bytes) = send(app, request("PATCH", uri, Some(role), Some(body))).await;
    (status, json_or_null(&bytes))
}

pub async fn delete(app: &Router, uri: &str, role: Role) -> StatusCode {
    send(app, request("DELETE", uri, Some(role), None)).await.0
}

/// Find a record by `id` in a JSON array.
pub fn find<'a>(list: &'a Value, id: &str) -> &'a Value {
    list.as_array()
        .and_then(|rows| rows.iter().find(|r| r["id"] == id))
        .unwrap_or_else(|| panic!("no record {id}"))
}

/// Data rows in a CSV download, excluding the header.
pub fn csv_rows(body: &str) -> usize {
    body.lines().filter(|l| !l.trim().is_empty()).count().saturating_sub(1)
}
