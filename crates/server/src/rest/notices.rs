use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use shared_types::{access, AppError, Notice, NoticeFilter, PostNoticeRequest};

use crate::auth::extractors::RoleRequired;
use crate::db::{today, SharedStore};

// ---------------------------------------------------------------------------
// GET /api/notices
// ---------------------------------------------------------------------------

/// Notice board, newest first.
#[utoipa::path(
    get,
    path = "/api/notices",
    params(NoticeFilter),
    responses(
        (status = 200, description = "Notices", body = Vec<Notice>)
    ),
    tag = "notices"
)]
pub async fn list_notices(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::OFFICE | access::RESIDENT }>,
    Query(filter): Query<NoticeFilter>,
) -> Json<Vec<Notice>> {
    Json(crate::repo::notice::list(&store, &filter).await)
}

// ---------------------------------------------------------------------------
// POST /api/notices
// ---------------------------------------------------------------------------

/// Publish a notice under the poster's role.
#[utoipa::path(
    post,
    path = "/api/notices",
    request_body = PostNoticeRequest,
    responses(
        (status = 201, description = "Notice posted", body = Notice),
        (status = 422, description = "Validation failed", body = AppError),
        (status = 403, description = "Admin or Secretary only", body = AppError)
    ),
    tag = "notices"
)]
pub async fn post_notice(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::OFFICE }>,
    Json(body): Json<PostNoticeRequest>,
) -> Result<(StatusCode, Json<Notice>), AppError> {
    let notice = crate::repo::notice::post(&store, claims.role, body, today()).await?;
    Ok((StatusCode::CREATED, Json(notice)))
}
