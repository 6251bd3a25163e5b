use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use shared_types::{access, AppError, Notification, NotificationParams};

use crate::auth::extractors::RoleRequired;
use crate::db::SharedStore;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct UnreadCountResponse {
    pub unread: usize,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct MarkAllReadResponse {
    /// Notifications that were unread before the call.
    pub updated: usize,
}

// ---------------------------------------------------------------------------
// GET /api/notifications
// ---------------------------------------------------------------------------

/// Notifications addressed to the caller's role or to everyone, newest first.
#[utoipa::path(
    get,
    path = "/api/notifications",
    params(NotificationParams),
    responses(
        (status = 200, description = "Notifications", body = Vec<Notification>)
    ),
    tag = "notifications"
)]
pub async fn list_notifications(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::ANY }>,
    Query(params): Query<NotificationParams>,
) -> Json<Vec<Notification>> {
    Json(crate::repo::notification::list(&store, claims.role, params.filter).await)
}

// ---------------------------------------------------------------------------
// GET /api/notifications/unread
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/notifications/unread",
    responses(
        (status = 200, description = "Unread count for the bell badge", body = UnreadCountResponse)
    ),
    tag = "notifications"
)]
pub async fn unread_count(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::ANY }>,
) -> Json<UnreadCountResponse> {
    let unread = crate::repo::notification::unread(&store, claims.role).await;
    Json(UnreadCountResponse { unread })
}

// ---------------------------------------------------------------------------
// POST /api/notifications/{id}/read
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    params(("id" = String, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked read", body = Notification),
        (status = 404, description = "Not found for this role", body = AppError)
    ),
    tag = "notifications"
)]
pub async fn mark_read(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::ANY }>,
    Path(id): Path<String>,
) -> Result<Json<Notification>, AppError> {
    Ok(Json(crate::repo::notification::mark_read(&store, claims.role, &id).await?))
}

// ---------------------------------------------------------------------------
// POST /api/notifications/read-all
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/notifications/read-all",
    responses(
        (status = 200, description = "All visible notifications marked read", body = MarkAllReadResponse)
    ),
    tag = "notifications"
)]
pub async fn mark_all_read(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::ANY }>,
) -> Json<MarkAllReadResponse> {
    let updated = crate::repo::notification::mark_all_read(&store, claims.role).await;
    Json(MarkAllReadResponse { updated })
}
