// Server-only session helpers shared by the api/* server functions.

use dioxus::prelude::*;
use shared_types::{AppError, RoleSet, User};

use crate::auth::jwt::Claims;
use crate::db::get_db;
use crate::error_convert::AppErrorExt;

/// Claims for the current request, if signed in.
/// Uses the middleware-injected claims first and falls back to the cookie.
pub(crate) fn current_claims() -> Option<Claims> {
    use crate::auth::{cookies, jwt};

    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();
    if let Some(claims) = parts.extensions.get::<Claims>() {
        return Some(claims.clone());
    }
    let token = cookies::extract_session_token(&parts.headers)?;
    jwt::validate_session_token(&token).ok()
}

/// The caller's claims, or "Authentication required".
pub(crate) fn require_session() -> Result<Claims, ServerFnError> {
    current_claims()
        .ok_or_else(|| AppError::unauthorized("Authentication required").into_server_fn_error())
}

/// The caller's claims when their role is in `allowed`.
pub(crate) fn require_roles(allowed: RoleSet) -> Result<Claims, ServerFnError> {
    let claims = require_session()?;
    crate::auth::extractors::check_role(&claims, allowed).map_err(|e| e.into_server_fn_error())?;
    Ok(claims)
}

/// The stored user record for a caller whose role is in `allowed`.
pub(crate) async fn require_user(allowed: RoleSet) -> Result<User, ServerFnError> {
    let claims = require_roles(allowed)?;
    crate::repo::account::find_user(get_db(), &claims.sub)
        .await
        .map_err(|e| e.into_server_fn_error())
}
