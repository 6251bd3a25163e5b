use axum::http::StatusCode;
use serde_json::json;
use shared_types::Role;

use crate::common::*;

#[tokio::test]
async fn list_is_newest_first_and_filters_by_category() {
    let app = test_app();
    let (status, all) = get(&app, "/api/expenses", Role::Treasurer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 17);
    assert_eq!(all[0]["id"], "exp-5");

    let (_, utilities) = get(&app, "/api/expenses?category=Utilities", Role::Treasurer).await;
    assert_eq!(utilities.as_array().unwrap().len(), 7);

    let (_, everything) = get(&app, "/api/expenses?category=All&status=All", Role::Treasurer).await;
    assert_eq!(everything.as_array().unwrap().len(), 17);
}

#[tokio::test]
async fn date_range_and_search_combine() {
    let app = test_app();
    let uri = "/api/expenses?start_date=2024-07-01&end_date=2024-07-31&search=power";
    let (_, rows) = get(&app, uri, Role::Admin).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "exp-2");
}

#[tokio::test]
async fn logged_expense_awaits_approval() {
    let app = test_app();
    let body = json!({
        "date": "2024-08-05",
        "category": "Maintenance",
        "payee": "Reliable Pumps",
        "amount": 4500.0,
        "description": "Pump service",
        "receipt": { "file_name": "pump.pdf", "size_bytes": 1024 }
    });
    let (status, expense) = post_json(&app, "/api/expenses", Role::Treasurer, &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(expense["status"], "Pending Approval");
    assert_eq!(expense["receipt"], "pump.pdf");
}

#[tokio::test]
async fn invalid_expense_leaves_ledger_unchanged() {
    let app = test_app();
    let body = json!({ "payee": "Reliable Pumps", "amount": -10.0, "description": "Pump service" });
    let (status, _) = post_json(&app, "/api/expenses", Role::Treasurer, &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let bad_receipt = json!({
        "payee": "Reliable Pumps",
        "amount": 10.0,
        "description": "Pump service",
        "receipt": { "file_name": "pump.exe", "size_bytes": 10 }
    });
    let (status, err) = post_json(&app, "/api/expenses", Role::Treasurer, &bad_receipt).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        err["field_errors"]["receipt"],
        "Invalid file type. Please upload a PDF, JPG, or PNG."
    );

    let (_, all) = get(&app, "/api/expenses", Role::Treasurer).await;
    assert_eq!(all.as_array().unwrap().len(), 17);
}

#[tokio::test]
async fn approve_requires_pending_approval() {
    let app = test_app();
    let (status, expense) = post_empty(&app, "/api/expenses/exp-4/approve", Role::Admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(expense["status"], "Paid");

    let (status, _) = post_empty(&app, "/api/expenses/exp-4/reject", Role::Admin).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn bulk_approve_skips_already_paid() {
    let app = test_app();
    let body = json!({ "ids": ["exp-1", "exp-4"], "action": "approve" });
    let (status, outcome) = post_json(&app, "/api/expenses/bulk", Role::Treasurer, &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["affected"], 1);
}

#[tokio::test]
async fn bulk_delete_removes_selection() {
    let app = test_app();
    let body = json!({ "ids": ["exp-1", "exp-2", "missing"], "action": "delete" });
    let (_, outcome) = post_json(&app, "/api/expenses/bulk", Role::Treasurer, &body).await;
    assert_eq!(outcome["affected"], 2);

    let empty = json!({ "ids": [], "action": "delete" });
    let (status, _) = post_json(&app, "/api/expenses/bulk", Role::Treasurer, &empty).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, all) = get(&app, "/api/expenses", Role::Treasurer).await;
    assert_eq!(all.as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn delete_single_expense() {
    let app = test_app();
    assert_eq!(delete(&app, "/api/expenses/exp-5", Role::Admin).await, StatusCode::NO_CONTENT);
    assert_eq!(delete(&app, "/api/expenses/exp-5", Role::Admin).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn summary_chart_has_twelve_months() {
    let app = test_app();
    let (status, summary) = get(&app, "/api/expenses/summary?year=2024", Role::Treasurer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["year"], 2024);
    assert_eq!(summary["monthly"].as_array().unwrap().len(), 12);
    assert_eq!(summary["pending_approval_count"], 1);
    assert_eq!(summary["pending_approval_total"], 25000.0);

    let (_, years) = get(&app, "/api/expenses/years", Role::Treasurer).await;
    assert!(years.as_array().unwrap().contains(&json!(2024)));
}

#[tokio::test]
async fn csv_export_matches_filtered_rows() {
    let app = test_app();
    let (status, body) = get_text(
        &app,
        "/api/expenses/export?format=csv&category=Staff%20Salary",
        Role::Treasurer,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(csv_rows(&body), 5);
    assert!(body.starts_with("ID,Date,Category"));
}

#[tokio::test]
async fn empty_export_is_bad_request() {
    let app = test_app();
    let (status, _) = get_text(&app, "/api/expenses/export?search=nothing-matches", Role::Treasurer).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn xlsx_export_off_without_flag() {
    let app = test_app();
    let (status, _) = get_text(&app, "/api/expenses/export?format=xlsx", Role::Treasurer).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
