use dioxus::prelude::*;
use shared_types::{CommitteeMember, Poll, ResidentDashboard, StaffDashboard};

#[cfg(feature = "server")]
use crate::db::{current_hour, get_db, today};

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::*;

#[cfg(feature = "server")]
use shared_types::{access, RoleSet};

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn staff_dashboard() -> Result<StaffDashboard, ServerFnError> {
    let claims = require_roles(RoleSet(access::STAFF))?;
    Ok(crate::repo::dashboard::staff(get_db(), claims.role, today()).await)
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn resident_dashboard() -> Result<ResidentDashboard, ServerFnError> {
    let user = require_user(RoleSet(access::RESIDENT)).await?;
    Ok(crate::repo::dashboard::resident(get_db(), &user, today(), current_hour()).await)
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn vote_in_poll(option: String) -> Result<Poll, ServerFnError> {
    let claims = require_roles(RoleSet(access::RESIDENT))?;
    crate::repo::dashboard::vote(get_db(), &claims.sub, &option)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn committee_tree() -> Result<Vec<CommitteeMember>, ServerFnError> {
    require_session()?;
    Ok(crate::repo::dashboard::committee(get_db()).await)
}
