//! Store access. Each function takes the shared store, holds the lock for
//! the whole operation and validates before it mutates anything.

pub mod account;
pub mod amenity;
pub mod complaint;
pub mod dashboard;
pub mod expense;
pub mod finance;
pub mod notice;
pub mod notification;
pub mod quotation;
pub mod resident;
pub mod security;

use shared_types::{
    AppError, Booking, Complaint, Expense, Incident, Invoice, Notification, Patrol,
    QuotationRequest, Resident, User, Vehicle, Visitor,
};

/// A stored record addressable by id.
pub trait Record {
    /// Noun used in "not found" messages.
    const KIND: &'static str;
    fn id(&self) -> &str;
}

macro_rules! record {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(impl Record for $ty {
            const KIND: &'static str = $kind;
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

record! {
    User => "User",
    Resident => "Resident",
    Invoice => "Invoice",
    Expense => "Expense",
    QuotationRequest => "Quotation request",
    Complaint => "Complaint",
    Booking => "Booking",
    Notification => "Notification",
    Visitor => "Visitor",
    Patrol => "Patrol",
    Incident => "Incident",
    Vehicle => "Vehicle",
}

pub(crate) fn not_found<T: Record>(id: &str) -> AppError {
    AppError::not_found(format!("{} {} not found", T::KIND, id))
}

pub(crate) fn find<'a, T: Record>(items: &'a [T], id: &str) -> Result<&'a T, AppError> {
    items.iter().find(|r| r.id() == id).ok_or_else(|| not_found::<T>(id))
}

pub(crate) fn find_mut<'a, T: Record>(items: &'a mut [T], id: &str) -> Result<&'a mut T, AppError> {
    items
        .iter_mut()
        .find(|r| r.id() == id)
        .ok_or_else(|| not_found::<T>(id))
}

/// Remove one record by id and return it.
pub(crate) fn remove<T: Record>(items: &mut Vec<T>, id: &str) -> Result<T, AppError> {
    let pos = items
        .iter()
        .position(|r| r.id() == id)
        .ok_or_else(|| not_found::<T>(id))?;
    Ok(items.remove(pos))
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use crate::db::{SharedStore, Store};

    pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn store() -> SharedStore {
        Arc::new(RwLock::new(Store::seeded(day(2024, 8, 10))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AppErrorKind;

    #[test]
    fn missing_record_names_kind_and_id() {
        let visitors: Vec<Visitor> = Vec::new();
        let err = find(&visitors, "vis-9").unwrap_err();
        assert_eq!(err.kind, AppErrorKind::NotFound);
        assert_eq!(err.message, "Visitor vis-9 not found");
    }
}
