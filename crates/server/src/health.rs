//! Unauthenticated service endpoints: liveness with a snapshot of the
//! society store, and the optional-feature switches.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use shared_types::{FeatureFlags, InvoiceStatus, PresenceStatus};
use std::sync::OnceLock;
use std::time::Instant;

use crate::db::{SharedStore, Store};

static STARTED: OnceLock<Instant> = OnceLock::new();

/// Call once while the router is assembled.
pub fn record_start_time() {
    STARTED.get_or_init(Instant::now);
}

/// Record counts an operator checks first when the dashboard looks wrong.
#[derive(Debug, Serialize, PartialEq, utoipa::ToSchema)]
pub struct SocietySnapshot {
    pub residents: usize,
    pub open_complaints: usize,
    pub visitors_inside: usize,
    pub payments_awaiting_verification: usize,
}

impl SocietySnapshot {
    pub fn of(store: &Store) -> Self {
        Self {
            residents: store.residents.len(),
            open_complaints: shared_types::open_count(&store.complaints),
            visitors_inside: store
                .visitors
                .iter()
                .filter(|v| v.status == PresenceStatus::Inside)
                .count(),
            payments_awaiting_verification: store
                .invoices
                .iter()
                .filter(|i| i.status == InvoiceStatus::PendingVerification)
                .count(),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub society: SocietySnapshot,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is up; includes store counts", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(store): State<SharedStore>) -> Json<HealthResponse> {
    let society = SocietySnapshot::of(&*store.read().await);
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: STARTED.get().map_or(0, |t| t.elapsed().as_secs()),
        society,
    })
}

/// Public so the login page can decide which extras to show.
#[utoipa::path(
    get,
    path = "/api/features",
    responses(
        (status = 200, description = "Optional features from config.toml", body = FeatureFlags)
    ),
    tag = "health"
)]
pub async fn get_features() -> Json<FeatureFlags> {
    Json(crate::config::feature_flags().clone())
}
