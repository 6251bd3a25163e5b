use dioxus::prelude::*;
use shared_types::{
    Incident, IncidentStatus, Patrol, ReportIncidentRequest, SchedulePatrolRequest,
    SecurityDashboard, Vehicle, VehicleFilter, Visitor, VisitorFilter, VisitorInput,
};

#[cfg(feature = "server")]
use crate::db::{clock_now, get_db, today};

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::*;

#[cfg(feature = "server")]
use shared_types::{access, RoleSet};

#[cfg(feature = "server")]
fn guard_on_duty() -> Result<crate::auth::jwt::Claims, ServerFnError> {
    require_roles(RoleSet(access::SECURITY))
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn security_dashboard() -> Result<SecurityDashboard, ServerFnError> {
    guard_on_duty()?;
    Ok(crate::repo::security::dashboard(get_db()).await)
}

// ── Visitors ───────────────────────────────────────────

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_visitors(filter: VisitorFilter) -> Result<Vec<Visitor>, ServerFnError> {
    guard_on_duty()?;
    Ok(crate::repo::security::visitors(get_db(), &filter).await)
}

#[cfg_attr(feature = "server", tracing::instrument(skip(input)))]
#[server]
pub async fn add_visitor(input: VisitorInput) -> Result<Visitor, ServerFnError> {
    guard_on_duty()?;
    crate::repo::security::add_visitor(get_db(), input, clock_now())
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument(skip(input)))]
#[server]
pub async fn update_visitor(id: String, input: VisitorInput) -> Result<Visitor, ServerFnError> {
    guard_on_duty()?;
    crate::repo::security::update_visitor(get_db(), &id, input)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn exit_visitor(id: String) -> Result<Visitor, ServerFnError> {
    guard_on_duty()?;
    crate::repo::security::exit_visitor(get_db(), &id, clock_now())
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Simulated gate scan.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn qr_exit_visitor() -> Result<Visitor, ServerFnError> {
    guard_on_duty()?;
    crate::repo::security::qr_exit(get_db(), clock_now())
        .await
        .map_err(|e| e.into_server_fn_error())
}

// ── Patrols ────────────────────────────────────────────

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_patrols() -> Result<Vec<Patrol>, ServerFnError> {
    guard_on_duty()?;
    Ok(crate::repo::security::patrols(get_db()).await)
}

#[cfg_attr(feature = "server", tracing::instrument(skip(req)))]
#[server]
pub async fn schedule_patrol(req: SchedulePatrolRequest) -> Result<Patrol, ServerFnError> {
    guard_on_duty()?;
    crate::repo::security::schedule_patrol(get_db(), req)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn start_patrol(id: String) -> Result<Patrol, ServerFnError> {
    guard_on_duty()?;
    crate::repo::security::start_patrol(get_db(), &id, clock_now())
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn end_patrol(id: String) -> Result<Patrol, ServerFnError> {
    guard_on_duty()?;
    crate::repo::security::end_patrol(get_db(), &id, clock_now())
        .await
        .map_err(|e| e.into_server_fn_error())
}

// ── Incidents ──────────────────────────────────────────

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_incidents() -> Result<Vec<Incident>, ServerFnError> {
    guard_on_duty()?;
    Ok(crate::repo::security::incidents(get_db()).await)
}

#[cfg_attr(feature = "server", tracing::instrument(skip(req)))]
#[server]
pub async fn report_incident(req: ReportIncidentRequest) -> Result<Incident, ServerFnError> {
    let user = require_user(RoleSet(access::SECURITY)).await?;
    crate::repo::security::report_incident(get_db(), &user.name, req, today(), clock_now())
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn set_incident_status(id: String, status: IncidentStatus) -> Result<Incident, ServerFnError> {
    guard_on_duty()?;
    crate::repo::security::set_incident_status(get_db(), &id, status)
        .await
        .map_err(|e| e.into_server_fn_error())
}

// ── Vehicles ───────────────────────────────────────────

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_vehicles(filter: VehicleFilter) -> Result<Vec<Vehicle>, ServerFnError> {
    guard_on_duty()?;
    Ok(crate::repo::security::vehicles(get_db(), &filter).await)
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn exit_vehicle(id: String) -> Result<Vehicle, ServerFnError> {
    guard_on_duty()?;
    crate::repo::security::exit_vehicle(get_db(), &id, clock_now())
        .await
        .map_err(|e| e.into_server_fn_error())
}
