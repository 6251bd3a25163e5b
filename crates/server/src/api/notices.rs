use dioxus::prelude::*;
use shared_types::{Notice, NoticeFilter, Notification, PostNoticeRequest, ReadFilter};

#[cfg(feature = "server")]
use crate::db::{get_db, today};

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::*;

#[cfg(feature = "server")]
use shared_types::{access, RoleSet};

// ── Notice board ───────────────────────────────────────

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_notices(filter: NoticeFilter) -> Result<Vec<Notice>, ServerFnError> {
    require_roles(RoleSet(access::OFFICE | access::RESIDENT))?;
    Ok(crate::repo::notice::list(get_db(), &filter).await)
}

/// Publish a notice under the poster's role (Admin or Secretary).
#[cfg_attr(feature = "server", tracing::instrument(skip(req)))]
#[server]
pub async fn post_notice(req: PostNoticeRequest) -> Result<Notice, ServerFnError> {
    let claims = require_roles(RoleSet(access::OFFICE))?;
    crate::repo::notice::post(get_db(), claims.role, req, today())
        .await
        .map_err(|e| e.into_server_fn_error())
}

// ── Notifications ──────────────────────────────────────

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_notifications(filter: ReadFilter) -> Result<Vec<Notification>, ServerFnError> {
    let claims = require_session()?;
    Ok(crate::repo::notification::list(get_db(), claims.role, filter).await)
}

/// Unread count for the header bell.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn unread_notifications() -> Result<usize, ServerFnError> {
    let claims = require_session()?;
    Ok(crate::repo::notification::unread(get_db(), claims.role).await)
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn mark_notification_read(id: String) -> Result<Notification, ServerFnError> {
    let claims = require_session()?;
    crate::repo::notification::mark_read(get_db(), claims.role, &id)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn mark_all_notifications_read() -> Result<usize, ServerFnError> {
    let claims = require_session()?;
    Ok(crate::repo::notification::mark_all_read(get_db(), claims.role).await)
}
