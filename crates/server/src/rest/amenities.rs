use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use shared_types::{access, Amenity, AppError, BookAmenityRequest, Booking, BookingSplit};

use crate::auth::extractors::RoleRequired;
use crate::db::{today, SharedStore};

// ---------------------------------------------------------------------------
// GET /api/amenities
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/amenities",
    responses(
        (status = 200, description = "Amenity catalogue", body = Vec<Amenity>)
    ),
    tag = "amenities"
)]
pub async fn list_amenities(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::RESIDENT }>,
) -> Json<Vec<Amenity>> {
    Json(crate::repo::amenity::amenities(&store).await)
}

// ---------------------------------------------------------------------------
// POST /api/amenities/{id}/bookings
// ---------------------------------------------------------------------------

/// Book a slot. A slot already taken for the amenity and date is a conflict.
#[utoipa::path(
    post,
    path = "/api/amenities/{id}/bookings",
    params(("id" = String, Path, description = "Amenity ID")),
    request_body = BookAmenityRequest,
    responses(
        (status = 201, description = "Booking confirmed", body = Booking),
        (status = 422, description = "Date missing or in the past, or unknown slot", body = AppError),
        (status = 404, description = "Amenity not found", body = AppError),
        (status = 409, description = "Slot already booked", body = AppError)
    ),
    tag = "amenities"
)]
pub async fn book_amenity(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::RESIDENT }>,
    Path(id): Path<String>,
    Json(body): Json<BookAmenityRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = crate::repo::amenity::book(&store, &claims.sub, &id, body, today()).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

// ---------------------------------------------------------------------------
// GET /api/me/bookings
// ---------------------------------------------------------------------------

/// Own bookings split into upcoming and past.
#[utoipa::path(
    get,
    path = "/api/me/bookings",
    responses(
        (status = 200, description = "Own bookings", body = BookingSplit)
    ),
    tag = "amenities"
)]
pub async fn own_bookings(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::RESIDENT }>,
) -> Json<BookingSplit> {
    Json(crate::repo::amenity::bookings(&store, &claims.sub, today()).await)
}

// ---------------------------------------------------------------------------
// DELETE /api/me/bookings/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/me/bookings/{id}",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 204, description = "Booking cancelled"),
        (status = 403, description = "Booked by someone else", body = AppError),
        (status = 404, description = "Booking not found", body = AppError)
    ),
    tag = "amenities"
)]
pub async fn cancel_booking(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::RESIDENT }>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    crate::repo::amenity::cancel(&store, &claims.sub, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
