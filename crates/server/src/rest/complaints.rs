use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use shared_types::{
    access, AppError, Complaint, ComplaintColumn, ComplaintCommentRequest, ComplaintFilter,
    MessageResponse, RaiseComplaintRequest, SetComplaintStatusRequest,
};

use crate::auth::extractors::RoleRequired;
use crate::db::{today, SharedStore};

// ---------------------------------------------------------------------------
// GET /api/complaints
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/complaints",
    params(ComplaintFilter),
    responses(
        (status = 200, description = "Complaints", body = Vec<Complaint>),
        (status = 403, description = "Admin or Secretary only", body = AppError)
    ),
    tag = "complaints"
)]
pub async fn list_complaints(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::OFFICE }>,
    Query(filter): Query<ComplaintFilter>,
) -> Json<Vec<Complaint>> {
    Json(crate::repo::complaint::list(&store, &filter).await)
}

// ---------------------------------------------------------------------------
// GET /api/complaints/board
// ---------------------------------------------------------------------------

/// Complaints grouped into Open, In Progress and Resolved columns.
#[utoipa::path(
    get,
    path = "/api/complaints/board",
    params(ComplaintFilter),
    responses(
        (status = 200, description = "Kanban columns", body = Vec<ComplaintColumn>)
    ),
    tag = "complaints"
)]
pub async fn complaint_board(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::OFFICE }>,
    Query(filter): Query<ComplaintFilter>,
) -> Json<Vec<ComplaintColumn>> {
    Json(crate::repo::complaint::board(&store, &filter).await)
}

// ---------------------------------------------------------------------------
// PATCH /api/complaints/{id}/status
// ---------------------------------------------------------------------------

#[utoipa::path(
    patch,
    path = "/api/complaints/{id}/status",
    params(("id" = String, Path, description = "Complaint ID")),
    request_body = SetComplaintStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Complaint),
        (status = 404, description = "Complaint not found", body = AppError)
    ),
    tag = "complaints"
)]
pub async fn set_complaint_status(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::OFFICE }>,
    Path(id): Path<String>,
    Json(body): Json<SetComplaintStatusRequest>,
) -> Result<Json<Complaint>, AppError> {
    Ok(Json(crate::repo::complaint::set_status(&store, &id, body.status).await?))
}

// ---------------------------------------------------------------------------
// POST /api/complaints/{id}/comments
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/complaints/{id}/comments",
    params(("id" = String, Path, description = "Complaint ID")),
    request_body = ComplaintCommentRequest,
    responses(
        (status = 200, description = "Comment acknowledged", body = MessageResponse),
        (status = 400, description = "Empty comment", body = AppError),
        (status = 404, description = "Complaint not found", body = AppError)
    ),
    tag = "complaints"
)]
pub async fn add_comment(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::OFFICE }>,
    Path(id): Path<String>,
    Json(body): Json<ComplaintCommentRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(crate::repo::complaint::comment(&store, &id, body).await?))
}

// ---------------------------------------------------------------------------
// GET /api/me/complaints
// ---------------------------------------------------------------------------

/// Complaints raised by the signed-in resident.
#[utoipa::path(
    get,
    path = "/api/me/complaints",
    responses(
        (status = 200, description = "Own complaints", body = Vec<Complaint>)
    ),
    tag = "complaints"
)]
pub async fn own_complaints(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::RESIDENT }>,
) -> Result<Json<Vec<Complaint>>, AppError> {
    let user = crate::repo::account::find_user(&store, &claims.sub).await?;
    Ok(Json(crate::repo::complaint::own(&store, &user.name).await))
}

// ---------------------------------------------------------------------------
// POST /api/me/complaints
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/me/complaints",
    request_body = RaiseComplaintRequest,
    responses(
        (status = 201, description = "Complaint raised", body = Complaint),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "complaints"
)]
pub async fn raise_complaint(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::RESIDENT }>,
    Json(body): Json<RaiseComplaintRequest>,
) -> Result<(StatusCode, Json<Complaint>), AppError> {
    let user = crate::repo::account::find_user(&store, &claims.sub).await?;
    let complaint = crate::repo::complaint::raise(&store, &user, body, today()).await?;
    Ok((StatusCode::CREATED, Json(complaint)))
}

// ---------------------------------------------------------------------------
// DELETE /api/me/complaints/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/me/complaints/{id}",
    params(("id" = String, Path, description = "Complaint ID")),
    responses(
        (status = 204, description = "Complaint deleted"),
        (status = 403, description = "Raised by someone else", body = AppError),
        (status = 404, description = "Complaint not found", body = AppError)
    ),
    tag = "complaints"
)]
pub async fn delete_own_complaint(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::RESIDENT }>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let user = crate::repo::account::find_user(&store, &claims.sub).await?;
    crate::repo::complaint::delete_own(&store, &user.name, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
