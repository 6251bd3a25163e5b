use axum::http::StatusCode;
use serde_json::json;
use shared_types::Role;

use crate::common::*;

#[tokio::test]
async fn notices_filter_by_category_and_search() {
    let app = test_app();
    let (_, urgent) = get(&app, "/api/notices?category=Urgent", Role::Resident).await;
    assert_eq!(urgent.as_array().unwrap().len(), 1);
    assert_eq!(urgent[0]["id"], "not-3");

    let (_, found) = get(&app, "/api/notices?search=independence", Role::Admin).await;
    assert_eq!(found[0]["id"], "not-2");

    let (_, dated) = get(&app, "/api/notices?date=2024-07-29", Role::Secretary).await;
    assert_eq!(dated.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn posted_notice_carries_publisher_role() {
    let app = test_app();
    let body = json!({ "title": "Diwali Mela", "category": "Event", "content": "Stalls open at 6 PM." });
    let (status, notice) = post_json(&app, "/api/notices", Role::Secretary, &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(notice["published_by"], "Secretary");

    let (_, list) = get(&app, "/api/notices", Role::Resident).await;
    assert_eq!(list[0]["title"], "Diwali Mela");
}

#[tokio::test]
async fn residents_cannot_post_notices() {
    let app = test_app();
    let body = json!({ "title": "Hello", "content": "World" });
    let (status, _) = post_json(&app, "/api/notices", Role::Resident, &body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let blank = json!({ "title": " ", "content": "World" });
    let (status, _) = post_json(&app, "/api/notices", Role::Admin, &blank).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn notifications_scoped_to_role() {
    let app = test_app();
    let (_, unread) = get(&app, "/api/notifications/unread", Role::Resident).await;
    assert_eq!(unread["unread"], 2);

    let (_, mine) = get(&app, "/api/notifications", Role::Security).await;
    let ids: Vec<&str> = mine
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["notif-5", "notif-6"]);
}

#[tokio::test]
async fn mark_read_and_mark_all() {
    let app = test_app();
    let (status, n) = post_empty(&app, "/api/notifications/notif-4/read", Role::Resident).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(n["read"], true);

    let (_, resp) = post_empty(&app, "/api/notifications/read-all", Role::Resident).await;
    assert_eq!(resp["updated"], 1);
    let (_, unread) = get(&app, "/api/notifications/unread", Role::Resident).await;
    assert_eq!(unread["unread"], 0);

    let (status, _) = post_empty(&app, "/api/notifications/notif-1/read", Role::Resident).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
