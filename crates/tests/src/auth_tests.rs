use axum::http::StatusCode;
use serde_json::json;
use shared_types::Role;

use crate::common::*;

#[tokio::test]
async fn login_with_seed_account_returns_user() {
    let app = test_app();
    let body = json!({
        "email": "Treasurer@AuraLiva.com ",
        "password": "treasurer123",
        "role": "Treasurer"
    });
    let (status, user) = post_anonymous(&app, "/api/auth/login", &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["id"], "user-3");
    assert_eq!(user["role"], "Treasurer");
}

#[tokio::test]
async fn login_wrong_password_401() {
    let app = test_app();
    let body = json!({
        "email": "admin@auraliva.com",
        "password": "resident123",
        "role": "Admin"
    });
    let (status, err) = post_anonymous(&app, "/api/auth/login", &body).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(err["message"], "Invalid credentials. Please try again.");
}

#[tokio::test]
async fn login_email_of_other_role_401() {
    let app = test_app();
    let body = json!({
        "email": "admin@auraliva.com",
        "password": "security123",
        "role": "Security"
    });
    let (status, _) = post_anonymous(&app, "/api/auth/login", &body).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_requires_session() {
    let app = test_app();
    let (status, _) = get_anonymous(&app, "/api/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, me) = get(&app, "/api/auth/me", Role::Resident).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["name"], "John Doe");
    assert_eq!(me["flat_no"], "A-101");
}

#[tokio::test]
async fn features_are_public() {
    let app = test_app();
    let (status, flags) = get_anonymous(&app, "/api/features").await;
    assert_eq!(status, StatusCode::OK);
    assert!(flags["xlsx_export"].is_boolean());
}

#[tokio::test]
async fn health_reports_store_counts() {
    let app = test_app();
    let (status, health) = get_anonymous(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");
    assert!(health["society"]["residents"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn profile_update_changes_current_user() {
    let app = test_app();
    let body = json!({ "name": "Johnny Doe", "contact": "9000000000" });
    let (status, user) = put_json(&app, "/api/account/profile", Role::Resident, &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["name"], "Johnny Doe");
    assert_eq!(user["contact"], "9000000000");
    assert_eq!(user["role"], "Resident");
}

#[tokio::test]
async fn password_mismatch_reported_on_confirm_field() {
    let app = test_app();
    let body = json!({
        "current_password": "admin123",
        "new_password": "secret99",
        "confirm_password": "secret98"
    });
    let (status, err) = post_json(&app, "/api/account/password", Role::Admin, &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["field_errors"]["confirm_password"], "New passwords do not match.");
}
