use axum::http::StatusCode;
use serde_json::json;
use shared_types::Role;

use crate::common::*;

fn action(name: &str) -> serde_json::Value {
    json!({ "action": name })
}

#[tokio::test]
async fn full_workflow_from_raise_to_commenced() {
    let app = test_app();
    let body = json!({
        "title": "Gate Motor",
        "description": "Replace the main gate motor",
        "vendor_name": "Gatekeepers Ltd.",
        "amount": 18000.0,
        "quotation_file": { "file_name": "gate.pdf", "size_bytes": 4096 }
    });
    let (status, raised) = post_json(&app, "/api/quotations", Role::Secretary, &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(raised["status"], "Pending Treasurer Approval");
    assert_eq!(raised["raised_by"], "Society Secretary");
    let uri = format!("/api/quotations/{}/transition", raised["id"].as_str().unwrap());

    let (status, q) = post_json(&app, &uri, Role::Treasurer, &action("treasurer_approve")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(q["status"], "Pending Committee Approval");

    let (_, q) = post_json(&app, &uri, Role::Secretary, &action("committee_approve")).await;
    assert_eq!(q["status"], "Committee Approved");

    let commence = json!({ "action": "commence_work", "notes": "Starts Monday." });
    let (status, q) = post_json(&app, &uri, Role::Treasurer, &commence).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(q["status"], "Work Commenced");
    assert_eq!(q["work_commence_notes"], "Starts Monday.");
    assert!(q["work_commence_date"].is_string());
}

#[tokio::test]
async fn wrong_role_forbidden_and_status_unchanged() {
    let app = test_app();
    let uri = "/api/quotations/quote-1/transition";
    let (status, _) = post_json(&app, uri, Role::Admin, &action("treasurer_approve")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = post_json(&app, uri, Role::Secretary, &action("treasurer_reject")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, list) = get(&app, "/api/quotations", Role::Admin).await;
    assert_eq!(find(&list, "quote-1")["status"], "Pending Treasurer Approval");
}

#[tokio::test]
async fn out_of_order_step_conflicts() {
    let app = test_app();
    let (status, err) = post_json(
        &app,
        "/api/quotations/quote-1/transition",
        Role::Secretary,
        &action("committee_approve"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["kind"], "Conflict");
}

#[tokio::test]
async fn treasurer_reject_is_terminal() {
    let app = test_app();
    let uri = "/api/quotations/quote-1/transition";
    let (_, q) = post_json(&app, uri, Role::Treasurer, &action("treasurer_reject")).await;
    assert_eq!(q["status"], "Rejected by Treasurer");
    let (status, _) = post_json(&app, uri, Role::Treasurer, &action("treasurer_approve")).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn commence_work_needs_notes() {
    let app = test_app();
    let commence = json!({ "action": "commence_work", "notes": "   " });
    let (status, err) = post_json(&app, "/api/quotations/quote-3/transition", Role::Treasurer, &commence).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["field_errors"]["notes"], "Please add notes for the residents.");

    let (_, list) = get(&app, "/api/quotations", Role::Treasurer).await;
    assert_eq!(find(&list, "quote-3")["status"], "Committee Approved");
}

#[tokio::test]
async fn only_secretary_raises_and_file_is_required() {
    let app = test_app();
    let body = json!({ "title": "Gate Motor", "vendor_name": "Gatekeepers Ltd.", "amount": 18000.0 });
    let (status, _) = post_json(&app, "/api/quotations", Role::Admin, &body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, err) = post_json(&app, "/api/quotations", Role::Secretary, &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(err["field_errors"]["quotation_file"].is_string());
}
