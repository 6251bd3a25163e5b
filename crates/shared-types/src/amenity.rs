use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Amenity {
    pub id: String,
    pub name: String,
    pub image: String,
    pub description: String,
}

pub const TIME_SLOTS: &[&str] = &[
    "09:00 AM - 11:00 AM",
    "11:00 AM - 01:00 PM",
    "03:00 PM - 05:00 PM",
    "05:00 PM - 07:00 PM",
    "07:00 PM - 09:00 PM",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Booking {
    pub id: String,
    pub amenity_id: String,
    pub amenity_name: String,
    pub date: NaiveDate,
    pub time_slot: String,
    /// User id of the resident who booked.
    pub booked_by: String,
}

impl Booking {
    pub fn clashes_with(&self, amenity_id: &str, date: NaiveDate, slot: &str) -> bool {
        self.amenity_id == amenity_id && self.date == date && self.time_slot == slot
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookAmenityRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time_slot: String,
}

impl BookAmenityRequest {
    /// Date and a known slot are required, and the date cannot be in the past.
    pub fn check(&self, today: NaiveDate) -> Result<(NaiveDate, &'static str), AppError> {
        const MSG: &str = "Please select a date and time slot.";
        let date = self.date.ok_or_else(|| AppError::field("date", MSG))?;
        if date < today {
            return Err(AppError::field("date", "Bookings cannot be made for a past date."));
        }
        let slot = TIME_SLOTS
            .iter()
            .copied()
            .find(|s| *s == self.time_slot.trim())
            .ok_or_else(|| AppError::field("time_slot", MSG))?;
        Ok((date, slot))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingSplit {
    /// Today onwards, soonest first.
    pub upcoming: Vec<Booking>,
    /// Before today, most recent first.
    pub past: Vec<Booking>,
}

pub fn split_bookings(bookings: &[Booking], today: NaiveDate) -> BookingSplit {
    let (mut upcoming, mut past): (Vec<Booking>, Vec<Booking>) =
        bookings.iter().cloned().partition(|b| b.date >= today);
    upcoming.sort_by(|a, b| a.date.cmp(&b.date));
    past.sort_by(|a, b| b.date.cmp(&a.date));
    BookingSplit { upcoming, past }
}

pub fn bookings_on(bookings: &[Booking], day: NaiveDate) -> usize {
    bookings.iter().filter(|b| b.date == day).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, d).unwrap()
    }

    fn booking(id: &str, date: NaiveDate) -> Booking {
        Booking {
            id: id.into(),
            amenity_id: "am-1".into(),
            amenity_name: "Clubhouse".into(),
            date,
            time_slot: TIME_SLOTS[0].into(),
            booked_by: "user-5".into(),
        }
    }

    #[test]
    fn split_orders_upcoming_ascending_and_past_descending() {
        let all = vec![
            booking("b1", day(2)),
            booking("b2", day(20)),
            booking("b3", day(10)),
            booking("b4", day(5)),
            booking("b5", day(12)),
        ];
        let split = split_bookings(&all, day(10));
        let up: Vec<&str> = split.upcoming.iter().map(|b| b.id.as_str()).collect();
        let past: Vec<&str> = split.past.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(up, vec!["b3", "b5", "b2"]);
        assert_eq!(past, vec!["b4", "b1"]);
    }

    #[test]
    fn request_needs_known_slot() {
        let req = BookAmenityRequest {
            date: Some(day(10)),
            time_slot: "01:00 PM - 03:00 PM".into(),
        };
        assert_eq!(
            req.check(day(1)).unwrap_err().message,
            "Please select a date and time slot."
        );

        let req = BookAmenityRequest {
            date: None,
            time_slot: TIME_SLOTS[1].into(),
        };
        assert!(req.check(day(1)).is_err());

        let req = BookAmenityRequest {
            date: Some(day(10)),
            time_slot: TIME_SLOTS[1].into(),
        };
        assert_eq!(req.check(day(1)).unwrap(), (day(10), TIME_SLOTS[1]));
        assert_eq!(req.check(day(10)).unwrap().0, day(10));
    }

    #[test]
    fn clash_is_same_amenity_date_and_slot() {
        let b = booking("b1", day(10));
        assert!(b.clashes_with("am-1", day(10), TIME_SLOTS[0]));
        assert!(!b.clashes_with("am-2", day(10), TIME_SLOTS[0]));
        assert!(!b.clashes_with("am-1", day(11), TIME_SLOTS[0]));
        assert!(!b.clashes_with("am-1", day(10), TIME_SLOTS[1]));
    }

    #[test]
    fn past_dates_are_refused() {
        let req = BookAmenityRequest {
            date: Some(day(9)),
            time_slot: TIME_SLOTS[0].into(),
        };
        let err = req.check(day(10)).unwrap_err();
        assert_eq!(err.kind, crate::AppErrorKind::ValidationError);
        assert_eq!(
            err.field_errors.get("date").unwrap(),
            "Bookings cannot be made for a past date."
        );
    }
}
