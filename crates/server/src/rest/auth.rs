use axum::{extract::State, http::HeaderMap, Json};

use shared_types::{AppError, LoginRequest, MessageResponse, User};

use crate::auth::cookies::{clear_session_cookie, set_session_cookie};
use crate::auth::extractors::AuthRequired;
use crate::db::SharedStore;
use crate::error_convert::ValidateRequest;

// ---------------------------------------------------------------------------
// POST /api/auth/login
// ---------------------------------------------------------------------------

/// Sign in with email, password and role. Sets the session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = User),
        (status = 422, description = "Invalid request", body = AppError),
        (status = 401, description = "Invalid credentials", body = AppError)
    ),
    tag = "auth"
)]
pub async fn login(
    State(store): State<SharedStore>,
    Json(body): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<User>), AppError> {
    let body = body.normalized();
    body.validate_request()?;
    let user = crate::auth::authenticate(&*store.read().await, &body)?;
    let token = crate::auth::issue_session(&user)?;

    let mut headers = HeaderMap::new();
    set_session_cookie(&mut headers, &token);
    tracing::info!(user = %user.id, role = user.role.as_str(), "Signed in");
    Ok((headers, Json(user)))
}

// ---------------------------------------------------------------------------
// POST /api/auth/logout
// ---------------------------------------------------------------------------

/// Clear the session cookie. Succeeds with or without a session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Signed out", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn logout() -> (HeaderMap, Json<MessageResponse>) {
    let mut headers = HeaderMap::new();
    clear_session_cookie(&mut headers);
    (headers, Json(MessageResponse::new("Signed out")))
}

// ---------------------------------------------------------------------------
// GET /api/auth/me
// ---------------------------------------------------------------------------

/// The signed-in user.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "auth"
)]
pub async fn me(
    State(store): State<SharedStore>,
    AuthRequired(claims): AuthRequired,
) -> Result<Json<User>, AppError> {
    let user = crate::repo::account::find_user(&store, &claims.sub).await?;
    Ok(Json(user))
}
