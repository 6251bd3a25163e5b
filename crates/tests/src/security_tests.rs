use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::Role;

use crate::common::*;

#[tokio::test]
async fn dashboard_counts_seeded_activity() {
    let app = test_app();
    let (status, dash) = get(&app, "/api/security/dashboard", Role::Security).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dash["visitors_inside"], 2);
    assert_eq!(dash["patrols_in_progress"], 1);
    assert_eq!(dash["open_incidents"], 1);
    assert_eq!(dash["vehicles_inside"], 4);
}

#[tokio::test]
async fn visitor_check_in_defaults_missing_vehicle() {
    let app = test_app();
    let body = json!({ "name": "Meera Nair", "contact": "9000000001", "visiting_flat": "C-101" });
    let (status, visitor) = post_json(&app, "/api/visitors", Role::Security, &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(visitor["status"], "Inside");
    assert_eq!(visitor["vehicle_no"], "N/A");

    let (_, inside) = get(&app, "/api/visitors", Role::Security).await;
    assert_eq!(inside[0]["id"], visitor["id"]);
    assert_eq!(inside.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn visitor_needs_name_contact_and_flat() {
    let app = test_app();
    let body = json!({ "name": "Meera Nair", "contact": "", "visiting_flat": "C-101" });
    let (status, err) = post_json(&app, "/api/visitors", Role::Security, &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["kind"], "ValidationError");
}

#[tokio::test]
async fn history_includes_exited_visitors() {
    let app = test_app();
    let (_, all) = get(&app, "/api/visitors?history=true", Role::Security).await;
    assert_eq!(all.as_array().unwrap().len(), 4);
    let (_, found) = get(&app, "/api/visitors?history=true&search=delivery", Role::Security).await;
    assert_eq!(found[0]["id"], "vis-3");
}

#[tokio::test]
async fn qr_exit_drains_inside_then_fails() {
    let app = test_app();
    let (status, first) = post_empty(&app, "/api/visitors/qr-exit", Role::Security).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["id"], "vis-2");
    assert_eq!(first["status"], "Exited");
    assert!(first["out_time"].is_string());

    let (_, second) = post_empty(&app, "/api/visitors/qr-exit", Role::Security).await;
    assert_eq!(second["id"], "vis-4");

    let (status, err) = post_empty(&app, "/api/visitors/qr-exit", Role::Security).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["kind"], "BadRequest");
}

#[tokio::test]
async fn manual_exit_and_edit() {
    let app = test_app();
    let body = json!({
        "name": "Priya Mehta",
        "contact": "9123456781",
        "vehicle_no": "MH14CD5678",
        "visiting_flat": "B-205",
        "purpose": "Family Function"
    });
    let (status, edited) = put_json(&app, "/api/visitors/vis-2", Role::Security, &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["visiting_flat"], "B-205");
    assert_eq!(edited["in_time"], "12:15 PM");

    let (status, exited) = post_empty(&app, "/api/visitors/vis-2/exit", Role::Security).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exited["status"], "Exited");
}

#[tokio::test]
async fn visitor_csv_export_lists_inside_only_by_default() {
    let app = test_app();
    let (status, body) = get_text(&app, "/api/visitors/export?format=csv", Role::Security).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(csv_rows(&body), 2);

    let (_, body) = get_text(&app, "/api/visitors/export?format=csv&history=true", Role::Security).await;
    assert_eq!(csv_rows(&body), 4);
}

#[tokio::test]
async fn patrol_schedule_start_end() {
    let app = test_app();
    let body = json!({ "route_name": "Basement", "guard_name": "Ram Singh" });
    let (status, patrol) = post_json(&app, "/api/patrols", Role::Security, &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(patrol["status"], "Scheduled");
    let id = patrol["id"].as_str().unwrap();

    let (_, started) = post_empty(&app, &format!("/api/patrols/{id}/start"), Role::Security).await;
    assert_eq!(started["status"], "In Progress");
    assert!(started["start_time"].is_string());

    let (_, done) = post_empty(&app, &format!("/api/patrols/{id}/end"), Role::Security).await;
    assert_eq!(done["status"], "Completed");
    assert!(done["end_time"].is_string());
}

#[tokio::test]
async fn incident_reported_by_guard_and_resolved() {
    let app = test_app();
    let body = json!({ "title": "Broken lock", "description": "Gate 3 lock is broken.", "severity": "High" });
    let (status, incident) = post_json(&app, "/api/incidents", Role::Security, &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(incident["reported_by"], "Security Head");
    assert_eq!(incident["status"], "Reported");

    let uri = format!("/api/incidents/{}/status", incident["id"].as_str().unwrap());
    let (status, resolved) = patch_json(&app, &uri, Role::Security, &json!({ "status": "Resolved" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resolved["status"], "Resolved");
}

#[tokio::test]
async fn vehicle_search_and_exit() {
    let app = test_app();
    let (_, found) = get(&app, "/api/vehicles?search=b-204", Role::Security).await;
    let rows = found.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "veh-4");

    let (status, vehicle) = post_empty(&app, "/api/vehicles/veh-4/exit", Role::Security).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(vehicle["status"], "Exited");
}

#[tokio::test]
async fn exits_and_patrol_end_need_the_right_status() {
    let app = test_app();
    let (status, _) = post_empty(&app, "/api/visitors/vis-2/exit", Role::Security).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = post_empty(&app, "/api/visitors/vis-2/exit", Role::Security).await;
    assert_eq!(status, StatusCode::CONFLICT);

    post_empty(&app, "/api/vehicles/veh-1/exit", Role::Security).await;
    let (status, _) = post_empty(&app, "/api/vehicles/veh-1/exit", Role::Security).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, err) = post_empty(&app, "/api/patrols/pat-3/end", Role::Security).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(err["message"].as_str().unwrap().contains("Scheduled"));
    let (status, _) = post_empty(&app, "/api/patrols/pat-1/start", Role::Security).await;
    assert_eq!(status, StatusCode::CONFLICT);
}
