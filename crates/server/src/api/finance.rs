use dioxus::prelude::*;
use shared_types::{
    FinanceSummary, GenerateInvoiceRequest, Invoice, InvoiceStatus, MaintenanceConfig,
    MessageResponse, Payment, SubmitPaymentRequest, VerifyAction,
};

#[cfg(feature = "server")]
use crate::db::get_db;

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::*;

#[cfg(feature = "server")]
use shared_types::{access, RoleSet};

// ── Invoices & payments (Admin, Treasurer) ─────────────

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_invoices() -> Result<Vec<Invoice>, ServerFnError> {
    require_roles(RoleSet(access::FINANCE))?;
    Ok(crate::repo::finance::list_invoices(get_db()).await)
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn invoice_summary() -> Result<FinanceSummary, ServerFnError> {
    require_roles(RoleSet(access::FINANCE))?;
    Ok(crate::repo::finance::summary(get_db()).await)
}

#[cfg_attr(feature = "server", tracing::instrument(skip(req)))]
#[server]
pub async fn generate_invoice(req: GenerateInvoiceRequest) -> Result<Invoice, ServerFnError> {
    require_roles(RoleSet(access::FINANCE))?;
    crate::repo::finance::generate_invoice(get_db(), req)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn verify_payment(id: String, action: VerifyAction) -> Result<Invoice, ServerFnError> {
    require_roles(RoleSet(access::FINANCE))?;
    crate::repo::finance::verify_payment(get_db(), &id, action)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn set_invoice_status(id: String, status: InvoiceStatus) -> Result<Invoice, ServerFnError> {
    require_roles(RoleSet(access::FINANCE))?;
    crate::repo::finance::set_status(get_db(), &id, status)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn send_reminder(id: String) -> Result<MessageResponse, ServerFnError> {
    require_roles(RoleSet(access::FINANCE))?;
    crate::repo::finance::send_reminder(get_db(), &id)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_payments() -> Result<Vec<Payment>, ServerFnError> {
    require_roles(RoleSet(access::FINANCE))?;
    Ok(crate::repo::finance::payments(get_db()).await)
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_maintenance() -> Result<MaintenanceConfig, ServerFnError> {
    require_roles(RoleSet(access::FINANCE))?;
    Ok(crate::repo::finance::maintenance(get_db()).await)
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn update_maintenance(config: MaintenanceConfig) -> Result<MaintenanceConfig, ServerFnError> {
    require_roles(RoleSet(access::FINANCE))?;
    crate::repo::finance::update_maintenance(get_db(), config)
        .await
        .map_err(|e| e.into_server_fn_error())
}

// ── Own bills (Resident) ───────────────────────────────

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn my_invoices() -> Result<Vec<Invoice>, ServerFnError> {
    let user = require_user(RoleSet(access::RESIDENT)).await?;
    Ok(crate::repo::finance::own_invoices(get_db(), &user.name).await)
}

/// Send the selected invoices for verification with a payment screenshot.
#[cfg_attr(feature = "server", tracing::instrument(skip(req)))]
#[server]
pub async fn submit_payment(req: SubmitPaymentRequest) -> Result<Vec<Invoice>, ServerFnError> {
    let user = require_user(RoleSet(access::RESIDENT)).await?;
    crate::repo::finance::submit_payment(get_db(), &user.name, req)
        .await
        .map_err(|e| e.into_server_fn_error())
}
