use axum::http::StatusCode;
use serde_json::json;
use shared_types::Role;

use crate::common::*;

#[tokio::test]
async fn staff_dashboard_has_kpis_for_each_staff_role() {
    let app = test_app();
    for role in [Role::Admin, Role::Secretary, Role::Treasurer] {
        let (status, dash) = get(&app, "/api/dashboard/staff", role).await;
        assert_eq!(status, StatusCode::OK, "{role:?}");
        assert!(!dash["kpis"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn complaint_breakdown_only_for_office_roles() {
    let app = test_app();
    let (_, admin) = get(&app, "/api/dashboard/staff", Role::Admin).await;
    assert!(admin["complaint_breakdown"].is_array());
    let (_, treasurer) = get(&app, "/api/dashboard/staff", Role::Treasurer).await;
    assert!(treasurer["complaint_breakdown"].is_null());
}

#[tokio::test]
async fn resident_dashboard_greets_by_first_name() {
    let app = test_app();
    let (status, dash) = get(&app, "/api/dashboard/resident", Role::Resident).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dash["first_name"], "John");
    assert_eq!(dash["open_complaints"], 1);
    assert_eq!(dash["has_voted"], false);
    assert!(dash["latest_unpaid"].is_object());
}

#[tokio::test]
async fn one_vote_per_resident() {
    let app = test_app();
    let body = json!({ "option": "Warm Beige" });
    let (status, poll) = post_json(&app, "/api/poll/vote", Role::Resident, &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(poll["options"][1]["votes"], 31);

    let (status, _) = post_json(&app, "/api/poll/vote", Role::Resident, &body).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, dash) = get(&app, "/api/dashboard/resident", Role::Resident).await;
    assert_eq!(dash["has_voted"], true);
}

#[tokio::test]
async fn unknown_poll_option_rejected() {
    let app = test_app();
    let body = json!({ "option": "Neon Pink" });
    let (status, _) = post_json(&app, "/api/poll/vote", Role::Resident, &body).await;
    assert_ne!(status, StatusCode::OK);
}
