use dioxus::prelude::*;
use shared_types::{
    Complaint, ComplaintColumn, ComplaintCommentRequest, ComplaintFilter, ComplaintStatus,
    MessageResponse, RaiseComplaintRequest,
};

#[cfg(feature = "server")]
use crate::db::{get_db, today};

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::*;

#[cfg(feature = "server")]
use shared_types::{access, RoleSet};

// ── Complaint board (Admin, Secretary) ─────────────────

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn complaint_board(filter: ComplaintFilter) -> Result<Vec<ComplaintColumn>, ServerFnError> {
    require_roles(RoleSet(access::OFFICE))?;
    Ok(crate::repo::complaint::board(get_db(), &filter).await)
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn set_complaint_status(id: String, status: ComplaintStatus) -> Result<Complaint, ServerFnError> {
    require_roles(RoleSet(access::OFFICE))?;
    crate::repo::complaint::set_status(get_db(), &id, status)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument(skip(req)))]
#[server]
pub async fn comment_on_complaint(
    id: String,
    req: ComplaintCommentRequest,
) -> Result<MessageResponse, ServerFnError> {
    require_roles(RoleSet(access::OFFICE))?;
    crate::repo::complaint::comment(get_db(), &id, req)
        .await
        .map_err(|e| e.into_server_fn_error())
}

// ── Own complaints (Resident) ──────────────────────────

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn my_complaints() -> Result<Vec<Complaint>, ServerFnError> {
    let user = require_user(RoleSet(access::RESIDENT)).await?;
    Ok(crate::repo::complaint::own(get_db(), &user.name).await)
}

#[cfg_attr(feature = "server", tracing::instrument(skip(req)))]
#[server]
pub async fn raise_complaint(req: RaiseComplaintRequest) -> Result<Complaint, ServerFnError> {
    let user = require_user(RoleSet(access::RESIDENT)).await?;
    crate::repo::complaint::raise(get_db(), &user, req, today())
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_my_complaint(id: String) -> Result<(), ServerFnError> {
    let user = require_user(RoleSet(access::RESIDENT)).await?;
    crate::repo::complaint::delete_own(get_db(), &user.name, &id)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    Ok(())
}
