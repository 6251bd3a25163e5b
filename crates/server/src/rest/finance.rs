use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use shared_types::{
    access, AppError, FinanceSummary, GenerateInvoiceRequest, Invoice, MaintenanceConfig,
    MessageResponse, Payment, SetInvoiceStatusRequest, SubmitPaymentRequest,
    VerifyPaymentRequest,
};

use crate::auth::extractors::RoleRequired;
use crate::db::SharedStore;
use crate::export::Download;

// ---------------------------------------------------------------------------
// GET /api/invoices
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/invoices",
    responses(
        (status = 200, description = "All invoices", body = Vec<Invoice>),
        (status = 403, description = "Admin or Treasurer only", body = AppError)
    ),
    tag = "finance"
)]
pub async fn list_invoices(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
) -> Json<Vec<Invoice>> {
    Json(crate::repo::finance::list_invoices(&store).await)
}

// ---------------------------------------------------------------------------
// GET /api/invoices/summary
// ---------------------------------------------------------------------------

/// Counts and totals for Paid, Pending and Overdue invoices.
#[utoipa::path(
    get,
    path = "/api/invoices/summary",
    responses(
        (status = 200, description = "Invoice summary", body = FinanceSummary)
    ),
    tag = "finance"
)]
pub async fn invoice_summary(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
) -> Json<FinanceSummary> {
    Json(crate::repo::finance::summary(&store).await)
}

// ---------------------------------------------------------------------------
// POST /api/invoices
// ---------------------------------------------------------------------------

/// Raise a Pending invoice with a random `INVnnnn` number.
#[utoipa::path(
    post,
    path = "/api/invoices",
    request_body = GenerateInvoiceRequest,
    responses(
        (status = 201, description = "Invoice generated", body = Invoice),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "finance"
)]
pub async fn generate_invoice(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
    Json(body): Json<GenerateInvoiceRequest>,
) -> Result<(StatusCode, Json<Invoice>), AppError> {
    let invoice = crate::repo::finance::generate_invoice(&store, body).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

// ---------------------------------------------------------------------------
// POST /api/invoices/{id}/verify
// ---------------------------------------------------------------------------

/// Approve or reject a payment awaiting verification.
#[utoipa::path(
    post,
    path = "/api/invoices/{id}/verify",
    params(("id" = String, Path, description = "Invoice ID")),
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified", body = Invoice),
        (status = 404, description = "Invoice not found", body = AppError),
        (status = 409, description = "Invoice is not awaiting verification", body = AppError)
    ),
    tag = "finance"
)]
pub async fn verify_payment(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
    Path(id): Path<String>,
    Json(body): Json<VerifyPaymentRequest>,
) -> Result<Json<Invoice>, AppError> {
    let invoice = crate::repo::finance::verify_payment(&store, &id, body.action).await?;
    Ok(Json(invoice))
}

// ---------------------------------------------------------------------------
// PATCH /api/invoices/{id}/status
// ---------------------------------------------------------------------------

#[utoipa::path(
    patch,
    path = "/api/invoices/{id}/status",
    params(("id" = String, Path, description = "Invoice ID")),
    request_body = SetInvoiceStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Invoice),
        (status = 404, description = "Invoice not found", body = AppError)
    ),
    tag = "finance"
)]
pub async fn set_invoice_status(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
    Path(id): Path<String>,
    Json(body): Json<SetInvoiceStatusRequest>,
) -> Result<Json<Invoice>, AppError> {
    let invoice = crate::repo::finance::set_status(&store, &id, body.status).await?;
    Ok(Json(invoice))
}

// ---------------------------------------------------------------------------
// POST /api/invoices/{id}/reminder
// ---------------------------------------------------------------------------

/// Acknowledge a payment reminder. Nothing is delivered.
#[utoipa::path(
    post,
    path = "/api/invoices/{id}/reminder",
    params(("id" = String, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Reminder sent", body = MessageResponse),
        (status = 404, description = "Invoice not found", body = AppError)
    ),
    tag = "finance"
)]
pub async fn send_reminder(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(crate::repo::finance::send_reminder(&store, &id).await?))
}

// ---------------------------------------------------------------------------
// GET /api/payments
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/payments",
    responses(
        (status = 200, description = "Payment history", body = Vec<Payment>)
    ),
    tag = "finance"
)]
pub async fn list_payments(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
) -> Json<Vec<Payment>> {
    Json(crate::repo::finance::payments(&store).await)
}

// ---------------------------------------------------------------------------
// GET /api/maintenance
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/maintenance",
    responses(
        (status = 200, description = "Maintenance settings", body = MaintenanceConfig)
    ),
    tag = "finance"
)]
pub async fn get_maintenance(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
) -> Json<MaintenanceConfig> {
    Json(crate::repo::finance::maintenance(&store).await)
}

// ---------------------------------------------------------------------------
// PUT /api/maintenance
// ---------------------------------------------------------------------------

#[utoipa::path(
    put,
    path = "/api/maintenance",
    request_body = MaintenanceConfig,
    responses(
        (status = 200, description = "Maintenance settings saved", body = MaintenanceConfig),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "finance"
)]
pub async fn update_maintenance(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
    Json(body): Json<MaintenanceConfig>,
) -> Result<Json<MaintenanceConfig>, AppError> {
    Ok(Json(crate::repo::finance::update_maintenance(&store, body).await?))
}

// ---------------------------------------------------------------------------
// GET /api/me/invoices
// ---------------------------------------------------------------------------

/// Invoices billed to the signed-in resident.
#[utoipa::path(
    get,
    path = "/api/me/invoices",
    responses(
        (status = 200, description = "Own invoices", body = Vec<Invoice>)
    ),
    tag = "finance"
)]
pub async fn own_invoices(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::RESIDENT }>,
) -> Result<Json<Vec<Invoice>>, AppError> {
    let user = crate::repo::account::find_user(&store, &claims.sub).await?;
    Ok(Json(crate::repo::finance::own_invoices(&store, &user.name).await))
}

// ---------------------------------------------------------------------------
// POST /api/me/payments
// ---------------------------------------------------------------------------

/// Submit selected invoices with a payment screenshot for verification.
#[utoipa::path(
    post,
    path = "/api/me/payments",
    request_body = SubmitPaymentRequest,
    responses(
        (status = 200, description = "Invoices awaiting verification", body = Vec<Invoice>),
        (status = 422, description = "Validation failed", body = AppError),
        (status = 403, description = "Invoice belongs to someone else", body = AppError),
        (status = 409, description = "Invoice is not payable", body = AppError)
    ),
    tag = "finance"
)]
pub async fn submit_payment(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::RESIDENT }>,
    Json(body): Json<SubmitPaymentRequest>,
) -> Result<Json<Vec<Invoice>>, AppError> {
    let user = crate::repo::account::find_user(&store, &claims.sub).await?;
    let invoices = crate::repo::finance::submit_payment(&store, &user.name, body).await?;
    Ok(Json(invoices))
}

// ---------------------------------------------------------------------------
// GET /api/me/invoices/{id}/receipt
// ---------------------------------------------------------------------------

/// Printable HTML receipt for a paid invoice.
#[utoipa::path(
    get,
    path = "/api/me/invoices/{id}/receipt",
    params(("id" = String, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Receipt", content_type = "text/html"),
        (status = 400, description = "Invoice is not paid", body = AppError),
        (status = 403, description = "Invoice belongs to someone else", body = AppError)
    ),
    tag = "finance"
)]
pub async fn download_receipt(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::RESIDENT }>,
    Path(id): Path<String>,
) -> Result<Download, AppError> {
    let user = crate::repo::account::find_user(&store, &claims.sub).await?;
    let invoice = crate::repo::finance::receipt(&store, &user.name, &id).await?;
    Ok(crate::export::receipt_download(&invoice))
}
