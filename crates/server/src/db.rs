use axum::extract::FromRef;
use chrono::{Local, NaiveDate, Timelike};
use shared_types::{
    Amenity, Booking, CommitteeMember, Complaint, Expense, Incident, Invoice, MaintenanceConfig,
    Notice, Notification, Patrol, Payment, Poll, QuotationRequest, Resident, User, Vehicle,
    Visitor,
};
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};
use tokio::sync::RwLock;

/// Every collection the dashboard reads and mutates. Lives only in memory.
#[derive(Debug, Clone)]
pub struct Store {
    pub users: Vec<User>,
    pub residents: Vec<Resident>,
    pub invoices: Vec<Invoice>,
    pub payments: Vec<Payment>,
    pub maintenance: MaintenanceConfig,
    pub expenses: Vec<Expense>,
    pub quotations: Vec<QuotationRequest>,
    pub complaints: Vec<Complaint>,
    pub amenities: Vec<Amenity>,
    pub bookings: Vec<Booking>,
    pub notices: Vec<Notice>,
    pub notifications: Vec<Notification>,
    pub visitors: Vec<Visitor>,
    pub patrols: Vec<Patrol>,
    pub incidents: Vec<Incident>,
    pub vehicles: Vec<Vehicle>,
    pub committee: Vec<CommitteeMember>,
    pub poll: Poll,
    /// User ids that already voted in the community poll.
    pub poll_voters: HashSet<String>,
}

/// The store behind its single lock.
pub type SharedStore = Arc<RwLock<Store>>;

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers can extract `State<SharedStore>` directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    /// State backed by the process-wide store that server functions also use.
    pub fn shared() -> Self {
        Self {
            store: get_db().clone(),
        }
    }

    /// State backed by a private, freshly seeded store.
    pub fn seeded() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::seeded(today()))),
        }
    }
}

static STORE: OnceLock<SharedStore> = OnceLock::new();

/// Get or initialize the process-wide store.
///
/// Used by Dioxus server functions (`api/*`). REST handlers use
/// `State<SharedStore>` from `AppState` instead.
pub fn get_db() -> &'static SharedStore {
    STORE.get_or_init(|| {
        tracing::info!("Seeding in-memory store");
        Arc::new(RwLock::new(Store::seeded(today())))
    })
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current wall-clock time as shown in the gate logs, e.g. "02:30 PM".
pub fn clock_now() -> String {
    shared_types::clock_time(Local::now().time())
}

/// Local hour of day, 0..=23, for the dashboard greeting.
pub fn current_hour() -> u32 {
    Local::now().hour()
}
