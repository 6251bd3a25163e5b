use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use shared_types::{access, AppError, Resident, Tenant, TenantInput};

use crate::auth::extractors::RoleRequired;
use crate::auth::jwt::Claims;
use crate::db::SharedStore;

/// Flat number of the signed-in resident.
async fn own_flat(store: &SharedStore, claims: &Claims) -> Result<String, AppError> {
    crate::repo::account::find_user(store, &claims.sub)
        .await?
        .flat_no
        .ok_or_else(|| AppError::bad_request("No flat is linked to this account"))
}

// ---------------------------------------------------------------------------
// GET /api/me/residence
// ---------------------------------------------------------------------------

/// The resident record for the signed-in user's flat, tenant included.
#[utoipa::path(
    get,
    path = "/api/me/residence",
    responses(
        (status = 200, description = "Own resident record", body = Resident),
        (status = 404, description = "No resident record for the flat", body = AppError)
    ),
    tag = "tenants"
)]
pub async fn get_residence(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::RESIDENT }>,
) -> Result<Json<Resident>, AppError> {
    let flat = own_flat(&store, &claims).await?;
    Ok(Json(crate::repo::resident::for_flat(&store, &flat).await?))
}

// ---------------------------------------------------------------------------
// POST /api/me/tenant
// ---------------------------------------------------------------------------

/// Register a tenant. All five documents are required.
#[utoipa::path(
    post,
    path = "/api/me/tenant",
    request_body = TenantInput,
    responses(
        (status = 201, description = "Tenant added", body = Tenant),
        (status = 422, description = "Validation failed", body = AppError),
        (status = 409, description = "Flat already has a tenant", body = AppError)
    ),
    tag = "tenants"
)]
pub async fn add_tenant(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::RESIDENT }>,
    Json(body): Json<TenantInput>,
) -> Result<(StatusCode, Json<Tenant>), AppError> {
    let flat = own_flat(&store, &claims).await?;
    let tenant = crate::repo::resident::add_tenant(&store, &flat, body).await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

// ---------------------------------------------------------------------------
// PUT /api/me/tenant
// ---------------------------------------------------------------------------

/// Edit the tenant. Documents left out keep their stored file names.
#[utoipa::path(
    put,
    path = "/api/me/tenant",
    request_body = TenantInput,
    responses(
        (status = 200, description = "Tenant updated", body = Tenant),
        (status = 422, description = "Validation failed", body = AppError),
        (status = 404, description = "No tenant registered", body = AppError)
    ),
    tag = "tenants"
)]
pub async fn update_tenant(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::RESIDENT }>,
    Json(body): Json<TenantInput>,
) -> Result<Json<Tenant>, AppError> {
    let flat = own_flat(&store, &claims).await?;
    Ok(Json(crate::repo::resident::update_tenant(&store, &flat, body).await?))
}

// ---------------------------------------------------------------------------
// DELETE /api/me/tenant
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/me/tenant",
    responses(
        (status = 204, description = "Tenant removed"),
        (status = 404, description = "No tenant registered", body = AppError)
    ),
    tag = "tenants"
)]
pub async fn remove_tenant(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::RESIDENT }>,
) -> Result<StatusCode, AppError> {
    let flat = own_flat(&store, &claims).await?;
    crate::repo::resident::remove_tenant(&store, &flat).await?;
    Ok(StatusCode::NO_CONTENT)
}
