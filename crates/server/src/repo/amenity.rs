use chrono::NaiveDate;
use shared_types::{
    new_id, split_bookings, Amenity, AppError, BookAmenityRequest, Booking, BookingSplit,
};

use super::remove;
use crate::db::SharedStore;

pub async fn amenities(store: &SharedStore) -> Vec<Amenity> {
    store.read().await.amenities.clone()
}

/// The user's bookings, split around `today`.
pub async fn bookings(store: &SharedStore, user_id: &str, today: NaiveDate) -> BookingSplit {
    let store = store.read().await;
    let own: Vec<Booking> = store
        .bookings
        .iter()
        .filter(|b| b.booked_by == user_id)
        .cloned()
        .collect();
    split_bookings(&own, today)
}

/// Book a slot. The same amenity, date and slot can only be held once.
pub async fn book(
    store: &SharedStore,
    user_id: &str,
    amenity_id: &str,
    req: BookAmenityRequest,
    today: NaiveDate,
) -> Result<Booking, AppError> {
    let (date, slot) = req.check(today)?;
    let mut store = store.write().await;
    let amenity = store
        .amenities
        .iter()
        .find(|a| a.id == amenity_id)
        .ok_or_else(|| AppError::not_found(format!("Amenity {amenity_id} not found")))?;
    if store.bookings.iter().any(|b| b.clashes_with(amenity_id, date, slot)) {
        return Err(AppError::conflict(format!(
            "{} is already booked for {} on {}.",
            amenity.name, slot, date
        )));
    }
    let booking = Booking {
        id: new_id("booking"),
        amenity_id: amenity.id.clone(),
        amenity_name: amenity.name.clone(),
        date,
        time_slot: slot.to_string(),
        booked_by: user_id.to_string(),
    };
    store.bookings.push(booking.clone());
    tracing::info!(id = %booking.id, amenity = %booking.amenity_name, %date, slot, "Amenity booked");
    Ok(booking)
}

pub async fn cancel(store: &SharedStore, user_id: &str, id: &str) -> Result<Booking, AppError> {
    let mut store = store.write().await;
    if store.bookings.iter().any(|b| b.id == id && b.booked_by != user_id) {
        return Err(AppError::forbidden("You can only cancel your own bookings."));
    }
    let removed = remove(&mut store.bookings, id)?;
    tracing::info!(id, "Booking cancelled");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::test_support::{day, store};
    use shared_types::AppErrorKind;

    fn req(date: Option<NaiveDate>, slot: &str) -> BookAmenityRequest {
        BookAmenityRequest {
            date,
            time_slot: slot.into(),
        }
    }

    #[tokio::test]
    async fn double_booking_conflicts() {
        let store = store();
        let when = Some(day(2024, 8, 15));
        book(&store, "user-5", "am-1", req(when, "05:00 PM - 07:00 PM"), day(2024, 8, 10)).await.unwrap();
        let err = book(&store, "user-5", "am-1", req(when, "05:00 PM - 07:00 PM"), day(2024, 8, 10))
            .await
            .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Conflict);
        book(&store, "user-5", "am-2", req(when, "05:00 PM - 07:00 PM"), day(2024, 8, 10)).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_slot_is_validation_error() {
        let err = book(&store(), "user-5", "am-1", req(Some(day(2024, 8, 15)), "midnight"), day(2024, 8, 10))
            .await
            .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
    }

    #[tokio::test]
    async fn split_and_cancel() {
        let store = store();
        let today = day(2024, 8, 10);
        let b = book(&store, "user-5", "am-4", req(Some(day(2024, 8, 12)), "09:00 AM - 11:00 AM"), today)
            .await
            .unwrap();
        let split = bookings(&store, "user-5", today).await;
        assert_eq!(split.upcoming.len(), 1);
        assert_eq!(split.past.len(), 1);
        assert_eq!(cancel(&store, "user-1", &b.id).await.unwrap_err().kind, AppErrorKind::Forbidden);
        cancel(&store, "user-5", &b.id).await.unwrap();
        assert!(bookings(&store, "user-5", today).await.upcoming.is_empty());
    }

    #[tokio::test]
    async fn booking_in_the_past_is_refused() {
        let store = store();
        let err = book(&store, "user-5", "am-1", req(Some(day(2020, 1, 1)), "09:00 AM - 11:00 AM"), day(2024, 8, 10))
            .await
            .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert!(err.field_errors.contains_key("date"));
        assert!(bookings(&store, "user-5", day(2024, 8, 10)).await.upcoming.is_empty());
    }
}
