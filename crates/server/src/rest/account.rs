use axum::{extract::State, Json};

use shared_types::{access, AppError, ChangePasswordRequest, MessageResponse, UpdateProfileRequest, User};

use crate::auth::extractors::RoleRequired;
use crate::db::SharedStore;

// ---------------------------------------------------------------------------
// PUT /api/account/profile
// ---------------------------------------------------------------------------

/// Update the signed-in user's name, email and contact.
#[utoipa::path(
    put,
    path = "/api/account/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = User),
        (status = 422, description = "Validation failed", body = AppError),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "account"
)]
pub async fn update_profile(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::ANY }>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<User>, AppError> {
    let user = crate::repo::account::update_profile(&store, &claims.sub, body).await?;
    Ok(Json(user))
}

// ---------------------------------------------------------------------------
// POST /api/account/password
// ---------------------------------------------------------------------------

/// Check a password change. Demo accounts keep their fixed passwords.
#[utoipa::path(
    post,
    path = "/api/account/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password accepted", body = MessageResponse),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "account"
)]
pub async fn change_password(
    _auth: RoleRequired<{ access::ANY }>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(crate::repo::account::change_password(&body)?))
}
