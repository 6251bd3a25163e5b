use dioxus::prelude::*;
use shared_types::{Resident, ResidentInput, Tenant, TenantFilter, TenantInput, TenantRow};

#[cfg(feature = "server")]
use crate::db::get_db;

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::*;

#[cfg(feature = "server")]
use shared_types::{access, AppError, RoleSet};

// ── Resident directory (Admin, Secretary) ──────────────

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_residents() -> Result<Vec<Resident>, ServerFnError> {
    require_roles(RoleSet(access::OFFICE))?;
    Ok(crate::repo::resident::list(get_db()).await)
}

#[cfg_attr(feature = "server", tracing::instrument(skip(input)))]
#[server]
pub async fn create_resident(input: ResidentInput) -> Result<Resident, ServerFnError> {
    require_roles(RoleSet(access::OFFICE))?;
    crate::repo::resident::create(get_db(), input)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument(skip(input)))]
#[server]
pub async fn update_resident(id: String, input: ResidentInput) -> Result<Resident, ServerFnError> {
    require_roles(RoleSet(access::OFFICE))?;
    crate::repo::resident::update(get_db(), &id, input)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_resident(id: String) -> Result<(), ServerFnError> {
    require_roles(RoleSet(access::OFFICE))?;
    crate::repo::resident::delete(get_db(), &id)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    Ok(())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_tenants(filter: TenantFilter) -> Result<Vec<TenantRow>, ServerFnError> {
    require_roles(RoleSet(access::OFFICE))?;
    Ok(crate::repo::resident::tenants(get_db(), &filter).await)
}

// ── Own tenant (Resident) ──────────────────────────────

#[cfg(feature = "server")]
async fn own_flat() -> Result<String, ServerFnError> {
    require_user(RoleSet(access::RESIDENT))
        .await?
        .flat_no
        .ok_or_else(|| {
            AppError::bad_request("No flat is linked to this account").into_server_fn_error()
        })
}

/// The signed-in resident's flat record, tenant included.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn my_residence() -> Result<Resident, ServerFnError> {
    let flat = own_flat().await?;
    crate::repo::resident::for_flat(get_db(), &flat)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument(skip(input)))]
#[server]
pub async fn add_tenant(input: TenantInput) -> Result<Tenant, ServerFnError> {
    let flat = own_flat().await?;
    crate::repo::resident::add_tenant(get_db(), &flat, input)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument(skip(input)))]
#[server]
pub async fn update_tenant(input: TenantInput) -> Result<Tenant, ServerFnError> {
    let flat = own_flat().await?;
    crate::repo::resident::update_tenant(get_db(), &flat, input)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn remove_tenant() -> Result<(), ServerFnError> {
    let flat = own_flat().await?;
    crate::repo::resident::remove_tenant(get_db(), &flat)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    Ok(())
}
