use axum::http::StatusCode;
use chrono::{Duration, Local};
use serde_json::json;
use shared_types::Role;

use crate::common::*;

fn next_month() -> String {
    (Local::now().date_naive() + Duration::days(30)).to_string()
}

#[tokio::test]
async fn booking_then_same_slot_conflicts() {
    let app = test_app();
    let body = json!({ "date": next_month(), "time_slot": "05:00 PM - 07:00 PM" });
    let (status, booking) = post_json(&app, "/api/amenities/am-1/bookings", Role::Resident, &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(booking["amenity_name"], "Clubhouse");

    let (status, err) = post_json(&app, "/api/amenities/am-1/bookings", Role::Resident, &body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(err["message"].as_str().unwrap().contains("already booked"));

    let other_slot = json!({ "date": next_month(), "time_slot": "07:00 PM - 09:00 PM" });
    let (status, _) = post_json(&app, "/api/amenities/am-1/bookings", Role::Resident, &other_slot).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn booking_needs_date_and_known_slot() {
    let app = test_app();
    let body = json!({ "time_slot": "05:00 PM - 07:00 PM" });
    let (status, err) = post_json(&app, "/api/amenities/am-1/bookings", Role::Resident, &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["message"], "Please select a date and time slot.");

    let body = json!({ "date": next_month(), "time_slot": "midnight" });
    let (status, _) = post_json(&app, "/api/amenities/am-1/bookings", Role::Resident, &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn bookings_split_into_upcoming_and_past() {
    let app = test_app();
    let body = json!({ "date": next_month(), "time_slot": "09:00 AM - 11:00 AM" });
    post_json(&app, "/api/amenities/am-2/bookings", Role::Resident, &body).await;

    let (status, split) = get(&app, "/api/me/bookings", Role::Resident).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(split["upcoming"].as_array().unwrap().len(), 1);
    assert_eq!(split["past"][0]["id"], "booking-1");
}

#[tokio::test]
async fn cancel_frees_the_slot() {
    let app = test_app();
    let body = json!({ "date": next_month(), "time_slot": "03:00 PM - 05:00 PM" });
    let (_, booking) = post_json(&app, "/api/amenities/am-4/bookings", Role::Resident, &body).await;
    let uri = format!("/api/me/bookings/{}", booking["id"].as_str().unwrap());
    assert_eq!(delete(&app, &uri, Role::Resident).await, StatusCode::NO_CONTENT);

    let (status, _) = post_json(&app, "/api/amenities/am-4/bookings", Role::Resident, &body).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn past_dates_cannot_be_booked() {
    let app = test_app();
    let yesterday = (Local::now().date_naive() - Duration::days(1)).to_string();
    let body = json!({ "date": yesterday, "time_slot": "09:00 AM - 11:00 AM" });
    let (status, err) = post_json(&app, "/api/amenities/am-1/bookings", Role::Resident, &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["field_errors"]["date"], "Bookings cannot be made for a past date.");
}
