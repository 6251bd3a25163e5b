use axum::http::StatusCode;
use serde_json::json;
use shared_types::Role;

use crate::common::*;

#[tokio::test]
async fn create_resident_defaults_wing_and_status() {
    let app = test_app();
    let body = json!({ "name": "  Farah Khan ", "flat_no": "D-12", "contact": "9000011111" });
    let (status, created) = post_json(&app, "/api/residents", Role::Admin, &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Farah Khan");
    assert_eq!(created["wing"], "A");
    assert_eq!(created["status"], "Active");

    let (_, list) = get(&app, "/api/residents", Role::Admin).await;
    assert_eq!(list.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn blank_resident_rejected_and_list_unchanged() {
    let app = test_app();
    let body = json!({ "name": " ", "flat_no": "D-12", "contact": "9000011111" });
    let (status, err) = post_json(&app, "/api/residents", Role::Secretary, &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["kind"], "ValidationError");

    let (_, list) = get(&app, "/api/residents", Role::Secretary).await;
    assert_eq!(list.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn update_and_delete_resident() {
    let app = test_app();
    let body = json!({
        "name": "Bob Williams",
        "wing": "B",
        "flat_no": "B-204",
        "contact": "9111111111",
        "status": "Inactive"
    });
    let (status, updated) = put_json(&app, "/api/residents/res-2", Role::Admin, &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Inactive");
    assert_eq!(updated["contact"], "9111111111");

    assert_eq!(delete(&app, "/api/residents/res-2", Role::Admin).await, StatusCode::NO_CONTENT);
    assert_eq!(delete(&app, "/api/residents/res-2", Role::Admin).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tenant_listing_shows_registered_tenants() {
    let app = test_app();
    let (status, rows) = get(&app, "/api/tenants", Role::Admin).await;
    assert_eq!(status, StatusCode::OK);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["tenant"]["name"], "Priya Singh");
}

#[tokio::test]
async fn second_tenant_on_flat_conflicts() {
    let app = test_app();
    let body = json!({
        "name": "Second Tenant",
        "contact": "9222222222",
        "move_in_date": "2024-09-01",
        "documents": {
            "agreement_doc": "a.pdf",
            "aadhaar_doc": "b.pdf",
            "pan_doc": "c.pdf",
            "photo": "d.jpg",
            "police_verification_doc": "e.pdf"
        }
    });
    let (status, _) = post_json(&app, "/api/me/tenant", Role::Resident, &body).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn tenant_removed_then_new_one_needs_all_documents() {
    let app = test_app();
    assert_eq!(delete(&app, "/api/me/tenant", Role::Resident).await, StatusCode::NO_CONTENT);

    let missing_docs = json!({
        "name": "New Tenant",
        "contact": "9333333333",
        "move_in_date": "2024-09-01",
        "documents": { "agreement_doc": "a.pdf" }
    });
    let (status, err) = post_json(&app, "/api/me/tenant", Role::Resident, &missing_docs).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["field_errors"]["documents"], "Please upload all required documents.");

    let (_, residence) = get(&app, "/api/me/residence", Role::Resident).await;
    assert!(residence["tenant"].is_null());
}
