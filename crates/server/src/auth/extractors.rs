use axum::{extract::FromRequestParts, http::request::Parts};
use shared_types::{AppError, RoleSet};

use super::jwt::Claims;

fn claims(parts: &Parts) -> Result<Claims, AppError> {
    parts
        .extensions
        .get::<Claims>()
        .cloned()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))
}

/// Extractor that requires authentication. Returns 401 if no valid token.
pub struct AuthRequired(pub Claims);

impl<S: Send + Sync> FromRequestParts<S> for AuthRequired {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        claims(parts).map(AuthRequired)
    }
}

/// Extractor that optionally extracts auth claims. Never fails.
pub struct MaybeAuth(pub Option<Claims>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuth(parts.extensions.get::<Claims>().cloned()))
    }
}

/// Extractor that requires authentication AND one of a set of roles.
/// Returns 401 if unauthenticated, 403 if the session role is not in `ROLES`.
///
/// `ROLES` is a bitmask built from `shared_types::access`, e.g.
/// `RoleRequired<{ access::FINANCE }>` admits Admin and Treasurer.
pub struct RoleRequired<const ROLES: u8>(pub Claims);

impl<const ROLES: u8, S: Send + Sync> FromRequestParts<S> for RoleRequired<ROLES> {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = claims(parts)?;
        check_role(&claims, RoleSet(ROLES))?;
        Ok(RoleRequired(claims))
    }
}

/// 403 unless the claims' role is in `allowed`.
pub fn check_role(claims: &Claims, allowed: RoleSet) -> Result<(), AppError> {
    if allowed.contains(claims.role) {
        Ok(())
    } else {
        tracing::warn!(user = %claims.sub, role = claims.role.as_str(), "Role check failed");
        Err(AppError::forbidden(format!(
            "{} role required",
            allowed.describe()
        )))
    }
}
