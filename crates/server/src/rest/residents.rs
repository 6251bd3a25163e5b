use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use shared_types::{access, AppError, Resident, ResidentInput, TenantFilter, TenantRow};

use crate::auth::extractors::RoleRequired;
use crate::db::SharedStore;

// ---------------------------------------------------------------------------
// GET /api/residents
// ---------------------------------------------------------------------------

/// List every resident record.
#[utoipa::path(
    get,
    path = "/api/residents",
    responses(
        (status = 200, description = "Residents", body = Vec<Resident>),
        (status = 403, description = "Admin or Secretary only", body = AppError)
    ),
    tag = "residents"
)]
pub async fn list_residents(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::OFFICE }>,
) -> Json<Vec<Resident>> {
    Json(crate::repo::resident::list(&store).await)
}

// ---------------------------------------------------------------------------
// POST /api/residents
// ---------------------------------------------------------------------------

/// Add a resident. Wing defaults to "A" and status to Active.
#[utoipa::path(
    post,
    path = "/api/residents",
    request_body = ResidentInput,
    responses(
        (status = 201, description = "Resident added", body = Resident),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "residents"
)]
pub async fn create_resident(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::OFFICE }>,
    Json(body): Json<ResidentInput>,
) -> Result<(StatusCode, Json<Resident>), AppError> {
    let resident = crate::repo::resident::create(&store, body).await?;
    Ok((StatusCode::CREATED, Json(resident)))
}

// ---------------------------------------------------------------------------
// PUT /api/residents/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    put,
    path = "/api/residents/{id}",
    params(("id" = String, Path, description = "Resident ID")),
    request_body = ResidentInput,
    responses(
        (status = 200, description = "Resident updated", body = Resident),
        (status = 422, description = "Validation failed", body = AppError),
        (status = 404, description = "Resident not found", body = AppError)
    ),
    tag = "residents"
)]
pub async fn update_resident(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::OFFICE }>,
    Path(id): Path<String>,
    Json(body): Json<ResidentInput>,
) -> Result<Json<Resident>, AppError> {
    let resident = crate::repo::resident::update(&store, &id, body).await?;
    Ok(Json(resident))
}

// ---------------------------------------------------------------------------
// DELETE /api/residents/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/residents/{id}",
    params(("id" = String, Path, description = "Resident ID")),
    responses(
        (status = 204, description = "Resident deleted"),
        (status = 404, description = "Resident not found", body = AppError)
    ),
    tag = "residents"
)]
pub async fn delete_resident(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::OFFICE }>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    crate::repo::resident::delete(&store, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /api/tenants
// ---------------------------------------------------------------------------

/// Every tenant with the owning resident's name, flat and wing.
#[utoipa::path(
    get,
    path = "/api/tenants",
    params(TenantFilter),
    responses(
        (status = 200, description = "Tenants", body = Vec<TenantRow>)
    ),
    tag = "residents"
)]
pub async fn list_tenants(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::OFFICE }>,
    Query(filter): Query<TenantFilter>,
) -> Json<Vec<TenantRow>> {
    Json(crate::repo::resident::tenants(&store, &filter).await)
}
