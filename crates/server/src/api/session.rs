use dioxus::prelude::*;
use shared_types::{
    ChangePasswordRequest, FeatureFlags, MessageResponse, Role, UpdateProfileRequest, User,
};

#[cfg(feature = "server")]
use crate::db::get_db;

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use super::auth::*;

#[cfg(feature = "server")]
use shared_types::{access, RoleSet};

/// Sign in with the role picked on the login form. Sets the session cookie.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn login(email: String, password: String, role: Role) -> Result<User, ServerFnError> {
    use crate::auth::cookies;
    use shared_types::LoginRequest;

    let req = LoginRequest {
        email,
        password,
        role,
    }
    .normalized();
    req.validate_request().map_err(|e| e.into_server_fn_error())?;

    let user = {
        let store = get_db().read().await;
        crate::auth::authenticate(&store, &req).map_err(|e| e.into_server_fn_error())?
    };
    let token = crate::auth::issue_session(&user).map_err(|e| e.into_server_fn_error())?;
    cookies::schedule_session_cookie(&token);

    tracing::info!(user = %user.id, role = user.role.as_str(), "Signed in");
    Ok(user)
}

/// Clear the session cookie.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    crate::auth::cookies::schedule_clear_cookie();
    if let Some(claims) = current_claims() {
        tracing::info!(user = %claims.sub, "Signed out");
    }
    Ok(())
}

/// The signed-in user, or `None` for a visitor on the login page.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn current_user() -> Result<Option<User>, ServerFnError> {
    let Some(claims) = current_claims() else {
        return Ok(None);
    };
    match crate::repo::account::find_user(get_db(), &claims.sub).await {
        Ok(user) => Ok(Some(user)),
        Err(_) => {
            crate::auth::cookies::schedule_clear_cookie();
            Ok(None)
        }
    }
}

#[cfg_attr(feature = "server", tracing::instrument(skip(req)))]
#[server]
pub async fn update_profile(req: UpdateProfileRequest) -> Result<User, ServerFnError> {
    let claims = require_roles(RoleSet(access::ANY))?;
    crate::repo::account::update_profile(get_db(), &claims.sub, req)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument(skip(req)))]
#[server]
pub async fn change_password(req: ChangePasswordRequest) -> Result<MessageResponse, ServerFnError> {
    require_roles(RoleSet(access::ANY))?;
    crate::repo::account::change_password(&req).map_err(|e| e.into_server_fn_error())
}

/// Feature flags from `config.toml`.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}
