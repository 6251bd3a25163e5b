use dioxus::prelude::*;
use shared_types::{Amenity, BookAmenityRequest, Booking, BookingSplit};

#[cfg(feature = "server")]
use crate::db::{get_db, today};

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::*;

#[cfg(feature = "server")]
use shared_types::{access, RoleSet};

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_amenities() -> Result<Vec<Amenity>, ServerFnError> {
    require_roles(RoleSet(access::RESIDENT))?;
    Ok(crate::repo::amenity::amenities(get_db()).await)
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn my_bookings() -> Result<BookingSplit, ServerFnError> {
    let claims = require_roles(RoleSet(access::RESIDENT))?;
    Ok(crate::repo::amenity::bookings(get_db(), &claims.sub, today()).await)
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn book_amenity(amenity_id: String, req: BookAmenityRequest) -> Result<Booking, ServerFnError> {
    let claims = require_roles(RoleSet(access::RESIDENT))?;
    crate::repo::amenity::book(get_db(), &claims.sub, &amenity_id, req, today())
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn cancel_booking(id: String) -> Result<(), ServerFnError> {
    let claims = require_roles(RoleSet(access::RESIDENT))?;
    crate::repo::amenity::cancel(get_db(), &claims.sub, &id)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    Ok(())
}
