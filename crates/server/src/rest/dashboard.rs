use axum::{extract::State, Json};

use shared_types::{
    access, AppError, CommitteeMember, Poll, ResidentDashboard, StaffDashboard, VoteRequest,
};

use crate::auth::extractors::RoleRequired;
use crate::db::{current_hour, today, SharedStore};

// ---------------------------------------------------------------------------
// GET /api/dashboard/staff
// ---------------------------------------------------------------------------

/// KPIs, recent complaints and quick actions for the caller's staff role.
#[utoipa::path(
    get,
    path = "/api/dashboard/staff",
    responses(
        (status = 200, description = "Staff dashboard", body = StaffDashboard),
        (status = 403, description = "Staff only", body = AppError)
    ),
    tag = "dashboard"
)]
pub async fn staff_dashboard(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::STAFF }>,
) -> Json<StaffDashboard> {
    Json(crate::repo::dashboard::staff(&store, claims.role, today()).await)
}

// ---------------------------------------------------------------------------
// GET /api/dashboard/resident
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/dashboard/resident",
    responses(
        (status = 200, description = "Resident dashboard", body = ResidentDashboard)
    ),
    tag = "dashboard"
)]
pub async fn resident_dashboard(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::RESIDENT }>,
) -> Result<Json<ResidentDashboard>, AppError> {
    let user = crate::repo::account::find_user(&store, &claims.sub).await?;
    let dashboard =
        crate::repo::dashboard::resident(&store, &user, today(), current_hour()).await;
    Ok(Json(dashboard))
}

// ---------------------------------------------------------------------------
// POST /api/poll/vote
// ---------------------------------------------------------------------------

/// Vote once in the community poll.
#[utoipa::path(
    post,
    path = "/api/poll/vote",
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Updated tallies", body = Poll),
        (status = 400, description = "Unknown option", body = AppError),
        (status = 409, description = "Already voted", body = AppError)
    ),
    tag = "dashboard"
)]
pub async fn vote(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::RESIDENT }>,
    Json(body): Json<VoteRequest>,
) -> Result<Json<Poll>, AppError> {
    Ok(Json(crate::repo::dashboard::vote(&store, &claims.sub, &body.option).await?))
}

// ---------------------------------------------------------------------------
// GET /api/committee
// ---------------------------------------------------------------------------

/// The committee org chart.
#[utoipa::path(
    get,
    path = "/api/committee",
    responses(
        (status = 200, description = "Committee tree", body = Vec<CommitteeMember>)
    ),
    tag = "dashboard"
)]
pub async fn committee(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::ANY }>,
) -> Json<Vec<CommitteeMember>> {
    Json(crate::repo::dashboard::committee(&store).await)
}
