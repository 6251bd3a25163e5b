use axum::http::StatusCode;
use shared_types::Role;

use crate::common::*;

#[tokio::test]
async fn unauthenticated_requests_401() {
    let app = test_app();
    for uri in ["/api/invoices", "/api/visitors", "/api/me/invoices", "/api/notifications"] {
        let (status, _) = get_anonymous(&app, uri).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn finance_routes_admit_admin_and_treasurer_only() {
    let app = test_app();
    for role in [Role::Admin, Role::Treasurer] {
        let (status, _) = get(&app, "/api/invoices", role).await;
        assert_eq!(status, StatusCode::OK, "{role:?}");
    }
    for role in [Role::Secretary, Role::Security, Role::Resident] {
        let (status, err) = get(&app, "/api/expenses", role).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{role:?}");
        assert_eq!(err["kind"], "Forbidden");
    }
}

#[tokio::test]
async fn office_routes_reject_treasurer() {
    let app = test_app();
    let (status, _) = get(&app, "/api/residents", Role::Secretary).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&app, "/api/residents", Role::Treasurer).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = get(&app, "/api/complaints/board", Role::Treasurer).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn gate_routes_are_security_only() {
    let app = test_app();
    let (status, _) = get(&app, "/api/visitors", Role::Security).await;
    assert_eq!(status, StatusCode::OK);
    for role in [Role::Admin, Role::Secretary, Role::Treasurer, Role::Resident] {
        let (status, _) = get(&app, "/api/vehicles", role).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{role:?}");
    }
}

#[tokio::test]
async fn resident_routes_reject_staff() {
    let app = test_app();
    let (status, _) = get(&app, "/api/me/invoices", Role::Admin).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = get(&app, "/api/amenities", Role::Resident).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn notices_readable_by_office_and_residents() {
    let app = test_app();
    for role in [Role::Admin, Role::Secretary, Role::Resident] {
        let (status, _) = get(&app, "/api/notices", role).await;
        assert_eq!(status, StatusCode::OK, "{role:?}");
    }
    for role in [Role::Treasurer, Role::Security] {
        let (status, _) = get(&app, "/api/notices", role).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{role:?}");
    }
}

#[tokio::test]
async fn every_role_sees_the_committee() {
    let app = test_app();
    for role in shared_types::ALL_ROLES {
        let (status, tree) = get(&app, "/api/committee", *role).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!tree.as_array().unwrap().is_empty());
    }
}
