use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::Role;

use crate::common::*;

#[tokio::test]
async fn summary_counts_overdue_with_fines() {
    let app = test_app();
    let (status, summary) = get(&app, "/api/invoices/summary", Role::Treasurer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["paid_count"], 1);
    assert_eq!(summary["overdue_count"], 2);
    assert_eq!(summary["overdue_total"], 10500.0);
}

#[tokio::test]
async fn generated_invoice_is_pending_and_listed_first() {
    let app = test_app();
    let body = json!({ "resident_name": "Bob Williams", "amount": 5500.0, "due_date": "2024-09-10" });
    let (status, invoice) = post_json(&app, "/api/invoices", Role::Treasurer, &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(invoice["status"], "Pending");
    assert!(invoice["invoice_number"].as_str().unwrap().starts_with("INV"));

    let (_, list) = get(&app, "/api/invoices", Role::Treasurer).await;
    assert_eq!(list[0]["id"], invoice["id"]);
    assert_eq!(list.as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn zero_amount_invoice_rejected_and_store_unchanged() {
    let app = test_app();
    let body = json!({ "resident_name": "Bob Williams", "amount": 0.0, "due_date": "2024-09-10" });
    let (status, err) = post_json(&app, "/api/invoices", Role::Admin, &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["field_errors"]["amount"], "Please enter a valid amount.");

    let (_, list) = get(&app, "/api/invoices", Role::Admin).await;
    assert_eq!(list.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn verify_payment_only_from_pending_verification() {
    let app = test_app();
    let approve = json!({ "action": "approve" });
    let (status, invoice) = post_json(&app, "/api/invoices/inv-4/verify", Role::Treasurer, &approve).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(invoice["status"], "Paid");

    let (status, _) = post_json(&app, "/api/invoices/inv-4/verify", Role::Treasurer, &approve).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn rejected_payment_returns_to_pending() {
    let app = test_app();
    let reject = json!({ "action": "reject" });
    let (status, invoice) = post_json(&app, "/api/invoices/inv-4/verify", Role::Admin, &reject).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(invoice["status"], "Pending");
}

#[tokio::test]
async fn status_can_be_set_directly() {
    let app = test_app();
    let body = json!({ "status": "Overdue" });
    let (status, invoice) = patch_json(&app, "/api/invoices/inv-2/status", Role::Admin, &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(invoice["status"], "Overdue");

    let (status, _) = patch_json(&app, "/api/invoices/inv-404/status", Role::Admin, &body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reminder_names_resident_and_invoice() {
    let app = test_app();
    let (status, resp) = post_empty(&app, "/api/invoices/inv-2/reminder", Role::Treasurer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["message"], "Reminder sent to Bob Williams for invoice INV002.");
}

#[tokio::test]
async fn resident_sees_only_own_invoices() {
    let app = test_app();
    let (status, list) = get(&app, "/api/me/invoices", Role::Resident).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["inv-5", "inv-6"]);
}

#[tokio::test]
async fn submit_payment_moves_selection_to_verification() {
    let app = test_app();
    let body = json!({
        "invoice_ids": ["inv-5", "inv-6"],
        "screenshot": { "file_name": "upi.png", "size_bytes": 2048 }
    });
    let (status, updated) = post_json(&app, "/api/me/payments", Role::Resident, &body).await;
    assert_eq!(status, StatusCode::OK);
    for invoice in updated.as_array().unwrap() {
        assert_eq!(invoice["status"], "Pending Verification");
        assert_eq!(invoice["payment_screenshot"], "upi.png");
    }
}

#[tokio::test]
async fn submit_payment_for_someone_elses_invoice_changes_nothing() {
    let app = test_app();
    let body = json!({
        "invoice_ids": ["inv-5", "inv-2"],
        "screenshot": { "file_name": "upi.png", "size_bytes": 2048 }
    });
    let (status, _) = post_json(&app, "/api/me/payments", Role::Resident, &body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, list) = get(&app, "/api/me/invoices", Role::Resident).await;
    assert_eq!(find(&list, "inv-5")["status"], "Pending");
}

#[tokio::test]
async fn submit_payment_needs_selection() {
    let app = test_app();
    let body = json!({ "invoice_ids": [] });
    let (status, err) = post_json(&app, "/api/me/payments", Role::Resident, &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["field_errors"]["invoice_ids"], "Please select at least one invoice to pay.");
}

#[tokio::test]
async fn receipt_only_for_own_paid_invoice() {
    let app = test_app();
    let (status, _) = get_text(&app, "/api/me/invoices/inv-5/receipt", Role::Resident).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = get_text(&app, "/api/me/invoices/inv-1/receipt", Role::Resident).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let body = json!({ "status": "Paid" });
    patch_json(&app, "/api/invoices/inv-5/status", Role::Treasurer, &body).await;
    let (status, html) = get_text(&app, "/api/me/invoices/inv-5/receipt", Role::Resident).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("INV005"));
}

#[tokio::test]
async fn maintenance_settings_round_trip() {
    let app = test_app();
    let (status, mut config) = get(&app, "/api/maintenance", Role::Admin).await;
    assert_eq!(status, StatusCode::OK);
    config["monthly_amount"] = json!(6500.0);
    let (status, saved) = put_json(&app, "/api/maintenance", Role::Admin, &config).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["monthly_amount"], 6500.0);
}
