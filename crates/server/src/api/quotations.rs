use dioxus::prelude::*;
use shared_types::{QuotationRequest, QuotationTransitionRequest, RaiseQuotationRequest};

#[cfg(feature = "server")]
use crate::db::{get_db, today};

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::*;

#[cfg(feature = "server")]
use shared_types::{access, RoleSet};

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_quotations() -> Result<Vec<QuotationRequest>, ServerFnError> {
    require_roles(RoleSet(access::STAFF))?;
    Ok(crate::repo::quotation::list(get_db()).await)
}

/// Raise a new request. Only the secretary raises quotations.
#[cfg_attr(feature = "server", tracing::instrument(skip(req)))]
#[server]
pub async fn raise_quotation(req: RaiseQuotationRequest) -> Result<QuotationRequest, ServerFnError> {
    let user = require_user(RoleSet(access::SECRETARY)).await?;
    crate::repo::quotation::raise(get_db(), &user.name, req, today())
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn transition_quotation(
    id: String,
    req: QuotationTransitionRequest,
) -> Result<QuotationRequest, ServerFnError> {
    let claims = require_roles(RoleSet(access::STAFF))?;
    crate::repo::quotation::transition(get_db(), &id, claims.role, req, today())
        .await
        .map_err(|e| e.into_server_fn_error())
}
