use axum::http::StatusCode;
use serde_json::json;
use shared_types::Role;

use crate::common::*;

#[tokio::test]
async fn board_has_three_columns_in_order() {
    let app = test_app();
    let (status, board) = get(&app, "/api/complaints/board", Role::Secretary).await;
    assert_eq!(status, StatusCode::OK);
    let statuses: Vec<&str> = board
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["Open", "In Progress", "Resolved"]);
    assert_eq!(board[0]["complaints"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn priority_filter_narrows_board() {
    let app = test_app();
    let (_, list) = get(&app, "/api/complaints?priority=High", Role::Admin).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn status_move_and_comment() {
    let app = test_app();
    let body = json!({ "status": "Resolved" });
    let (status, complaint) = patch_json(&app, "/api/complaints/com-1/status", Role::Admin, &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(complaint["status"], "Resolved");

    let comment = json!({ "comment": "Plumber assigned." });
    let (status, resp) = post_json(&app, "/api/complaints/com-1/comments", Role::Secretary, &comment).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["message"], "Comment added to \"Water leakage in basement\".");

    let blank = json!({ "comment": " " });
    let (status, _) = post_json(&app, "/api/complaints/com-1/comments", Role::Secretary, &blank).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn resident_raises_and_deletes_own_complaint() {
    let app = test_app();
    let body = json!({ "title": "Noisy generator", "description": "Runs all night.", "priority": "Low" });
    let (status, raised) = post_json(&app, "/api/me/complaints", Role::Resident, &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(raised["status"], "Open");
    assert_eq!(raised["raised_by"], "John Doe (A-101)");

    let (_, own) = get(&app, "/api/me/complaints", Role::Resident).await;
    assert_eq!(own.as_array().unwrap().len(), 2);

    let uri = format!("/api/me/complaints/{}", raised["id"].as_str().unwrap());
    assert_eq!(delete(&app, &uri, Role::Resident).await, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn resident_cannot_delete_others_complaint() {
    let app = test_app();
    assert_eq!(delete(&app, "/api/me/complaints/com-1", Role::Resident).await, StatusCode::FORBIDDEN);
    let (_, list) = get(&app, "/api/complaints", Role::Admin).await;
    assert_eq!(list.as_array().unwrap().len(), 4);
}
