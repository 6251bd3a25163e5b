use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use shared_types::{
    access, AppError, ExportParams, Incident, Patrol, ReportIncidentRequest,
    SchedulePatrolRequest, SecurityDashboard, SetIncidentStatusRequest, Vehicle, VehicleFilter,
    Visitor, VisitorFilter, VisitorInput,
};

use crate::auth::extractors::RoleRequired;
use crate::db::{clock_now, today, SharedStore};
use crate::export::Download;

// ---------------------------------------------------------------------------
// GET /api/security/dashboard
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/security/dashboard",
    responses(
        (status = 200, description = "Gate and patrol overview", body = SecurityDashboard),
        (status = 403, description = "Security only", body = AppError)
    ),
    tag = "security"
)]
pub async fn security_dashboard(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::SECURITY }>,
) -> Json<SecurityDashboard> {
    Json(crate::repo::security::dashboard(&store).await)
}

// ---------------------------------------------------------------------------
// GET /api/visitors
// ---------------------------------------------------------------------------

/// Visitors currently inside, or the full history.
#[utoipa::path(
    get,
    path = "/api/visitors",
    params(VisitorFilter),
    responses(
        (status = 200, description = "Visitors", body = Vec<Visitor>)
    ),
    tag = "security"
)]
pub async fn list_visitors(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::SECURITY }>,
    Query(filter): Query<VisitorFilter>,
) -> Json<Vec<Visitor>> {
    Json(crate::repo::security::visitors(&store, &filter).await)
}

// ---------------------------------------------------------------------------
// POST /api/visitors
// ---------------------------------------------------------------------------

/// Check a visitor in now.
#[utoipa::path(
    post,
    path = "/api/visitors",
    request_body = VisitorInput,
    responses(
        (status = 201, description = "Visitor checked in", body = Visitor),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "security"
)]
pub async fn add_visitor(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::SECURITY }>,
    Json(body): Json<VisitorInput>,
) -> Result<(StatusCode, Json<Visitor>), AppError> {
    let visitor = crate::repo::security::add_visitor(&store, body, clock_now()).await?;
    Ok((StatusCode::CREATED, Json(visitor)))
}

// ---------------------------------------------------------------------------
// PUT /api/visitors/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    put,
    path = "/api/visitors/{id}",
    params(("id" = String, Path, description = "Visitor ID")),
    request_body = VisitorInput,
    responses(
        (status = 200, description = "Visitor updated", body = Visitor),
        (status = 422, description = "Validation failed", body = AppError),
        (status = 404, description = "Visitor not found", body = AppError)
    ),
    tag = "security"
)]
pub async fn update_visitor(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::SECURITY }>,
    Path(id): Path<String>,
    Json(body): Json<VisitorInput>,
) -> Result<Json<Visitor>, AppError> {
    Ok(Json(crate::repo::security::update_visitor(&store, &id, body).await?))
}

// ---------------------------------------------------------------------------
// POST /api/visitors/{id}/exit
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/visitors/{id}/exit",
    params(("id" = String, Path, description = "Visitor ID")),
    responses(
        (status = 200, description = "Visitor checked out", body = Visitor),
        (status = 409, description = "Visitor already exited", body = AppError),
        (status = 404, description = "Visitor not found", body = AppError)
    ),
    tag = "security"
)]
pub async fn exit_visitor(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::SECURITY }>,
    Path(id): Path<String>,
) -> Result<Json<Visitor>, AppError> {
    Ok(Json(crate::repo::security::exit_visitor(&store, &id, clock_now()).await?))
}

// ---------------------------------------------------------------------------
// POST /api/visitors/qr-exit
// ---------------------------------------------------------------------------

/// Simulated QR scan: checks out the first visitor still inside.
#[utoipa::path(
    post,
    path = "/api/visitors/qr-exit",
    responses(
        (status = 200, description = "Visitor checked out", body = Visitor),
        (status = 400, description = "Nobody is inside", body = AppError)
    ),
    tag = "security"
)]
pub async fn qr_exit(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::SECURITY }>,
) -> Result<Json<Visitor>, AppError> {
    Ok(Json(crate::repo::security::qr_exit(&store, clock_now()).await?))
}

// ---------------------------------------------------------------------------
// GET /api/visitors/export
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/visitors/export",
    params(VisitorFilter, ExportParams),
    responses(
        (status = 200, description = "Visitor log file", content_type = "text/csv"),
        (status = 400, description = "Nothing to export", body = AppError)
    ),
    tag = "security"
)]
pub async fn export_visitors(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::SECURITY }>,
    Query(filter): Query<VisitorFilter>,
    Query(params): Query<ExportParams>,
) -> Result<Download, AppError> {
    crate::export::check_format(params.format, crate::config::feature_flags())?;
    let rows = crate::repo::security::visitors(&store, &filter).await;
    crate::export::render(&rows, params.format, today())
}

// ---------------------------------------------------------------------------
// GET /api/patrols
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/patrols",
    responses(
        (status = 200, description = "Patrols", body = Vec<Patrol>)
    ),
    tag = "security"
)]
pub async fn list_patrols(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::SECURITY }>,
) -> Json<Vec<Patrol>> {
    Json(crate::repo::security::patrols(&store).await)
}

// ---------------------------------------------------------------------------
// POST /api/patrols
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/patrols",
    request_body = SchedulePatrolRequest,
    responses(
        (status = 201, description = "Patrol scheduled", body = Patrol),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "security"
)]
pub async fn schedule_patrol(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::SECURITY }>,
    Json(body): Json<SchedulePatrolRequest>,
) -> Result<(StatusCode, Json<Patrol>), AppError> {
    let patrol = crate::repo::security::schedule_patrol(&store, body).await?;
    Ok((StatusCode::CREATED, Json(patrol)))
}

// ---------------------------------------------------------------------------
// POST /api/patrols/{id}/start
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/patrols/{id}/start",
    params(("id" = String, Path, description = "Patrol ID")),
    responses(
        (status = 200, description = "Patrol in progress", body = Patrol),
        (status = 409, description = "Patrol is not scheduled", body = AppError),
        (status = 404, description = "Patrol not found", body = AppError)
    ),
    tag = "security"
)]
pub async fn start_patrol(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::SECURITY }>,
    Path(id): Path<String>,
) -> Result<Json<Patrol>, AppError> {
    Ok(Json(crate::repo::security::start_patrol(&store, &id, clock_now()).await?))
}

// ---------------------------------------------------------------------------
// POST /api/patrols/{id}/end
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/patrols/{id}/end",
    params(("id" = String, Path, description = "Patrol ID")),
    responses(
        (status = 200, description = "Patrol completed", body = Patrol),
        (status = 409, description = "Patrol is not in progress", body = AppError),
        (status = 404, description = "Patrol not found", body = AppError)
    ),
    tag = "security"
)]
pub async fn end_patrol(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::SECURITY }>,
    Path(id): Path<String>,
) -> Result<Json<Patrol>, AppError> {
    Ok(Json(crate::repo::security::end_patrol(&store, &id, clock_now()).await?))
}

// ---------------------------------------------------------------------------
// GET /api/incidents
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/incidents",
    responses(
        (status = 200, description = "Incidents", body = Vec<Incident>)
    ),
    tag = "security"
)]
pub async fn list_incidents(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::SECURITY }>,
) -> Json<Vec<Incident>> {
    Json(crate::repo::security::incidents(&store).await)
}

// ---------------------------------------------------------------------------
// POST /api/incidents
// ---------------------------------------------------------------------------

/// Report an incident, stamped with the reporter and the current time.
#[utoipa::path(
    post,
    path = "/api/incidents",
    request_body = ReportIncidentRequest,
    responses(
        (status = 201, description = "Incident reported", body = Incident),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "security"
)]
pub async fn report_incident(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::SECURITY }>,
    Json(body): Json<ReportIncidentRequest>,
) -> Result<(StatusCode, Json<Incident>), AppError> {
    let user = crate::repo::account::find_user(&store, &claims.sub).await?;
    let incident =
        crate::repo::security::report_incident(&store, &user.name, body, today(), clock_now())
            .await?;
    Ok((StatusCode::CREATED, Json(incident)))
}

// ---------------------------------------------------------------------------
// PATCH /api/incidents/{id}/status
// ---------------------------------------------------------------------------

#[utoipa::path(
    patch,
    path = "/api/incidents/{id}/status",
    params(("id" = String, Path, description = "Incident ID")),
    request_body = SetIncidentStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Incident),
        (status = 404, description = "Incident not found", body = AppError)
    ),
    tag = "security"
)]
pub async fn set_incident_status(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::SECURITY }>,
    Path(id): Path<String>,
    Json(body): Json<SetIncidentStatusRequest>,
) -> Result<Json<Incident>, AppError> {
    Ok(Json(crate::repo::security::set_incident_status(&store, &id, body.status).await?))
}

// ---------------------------------------------------------------------------
// GET /api/vehicles
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/vehicles",
    params(VehicleFilter),
    responses(
        (status = 200, description = "Vehicles", body = Vec<Vehicle>)
    ),
    tag = "security"
)]
pub async fn list_vehicles(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::SECURITY }>,
    Query(filter): Query<VehicleFilter>,
) -> Json<Vec<Vehicle>> {
    Json(crate::repo::security::vehicles(&store, &filter).await)
}

// ---------------------------------------------------------------------------
// POST /api/vehicles/{id}/exit
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/vehicles/{id}/exit",
    params(("id" = String, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle exited", body = Vehicle),
        (status = 409, description = "Vehicle already exited", body = AppError),
        (status = 404, description = "Vehicle not found", body = AppError)
    ),
    tag = "security"
)]
pub async fn exit_vehicle(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::SECURITY }>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>, AppError> {
    Ok(Json(crate::repo::security::exit_vehicle(&store, &id, clock_now()).await?))
}
