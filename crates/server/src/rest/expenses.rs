use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Datelike;
use serde::Deserialize;

use shared_types::{
    access, AppError, BulkExpenseRequest, BulkOutcome, Expense, ExpenseFilter, ExpenseSummary,
    ExportParams, LogExpenseRequest,
};

use crate::auth::extractors::RoleRequired;
use crate::db::{today, SharedStore};
use crate::export::Download;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct SummaryParams {
    /// Year for the monthly chart. Defaults to the current year.
    pub year: Option<i32>,
}

// ---------------------------------------------------------------------------
// GET /api/expenses
// ---------------------------------------------------------------------------

/// Filtered expenses, newest first.
#[utoipa::path(
    get,
    path = "/api/expenses",
    params(ExpenseFilter),
    responses(
        (status = 200, description = "Matching expenses", body = Vec<Expense>),
        (status = 403, description = "Admin or Treasurer only", body = AppError)
    ),
    tag = "expenses"
)]
pub async fn list_expenses(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
    Query(filter): Query<ExpenseFilter>,
) -> Json<Vec<Expense>> {
    Json(crate::repo::expense::list(&store, &filter).await)
}

// ---------------------------------------------------------------------------
// GET /api/expenses/summary
// ---------------------------------------------------------------------------

/// This month's spend, pending approvals and the monthly chart for a year.
#[utoipa::path(
    get,
    path = "/api/expenses/summary",
    params(SummaryParams),
    responses(
        (status = 200, description = "Expense summary", body = ExpenseSummary)
    ),
    tag = "expenses"
)]
pub async fn expense_summary(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
    Query(params): Query<SummaryParams>,
) -> Json<ExpenseSummary> {
    let today = today();
    let year = params.year.unwrap_or(today.year());
    Json(crate::repo::expense::summary(&store, today, year).await)
}

// ---------------------------------------------------------------------------
// GET /api/expenses/years
// ---------------------------------------------------------------------------

/// Years that have at least one expense, for the chart's year picker.
#[utoipa::path(
    get,
    path = "/api/expenses/years",
    responses(
        (status = 200, description = "Years with expenses", body = Vec<i32>)
    ),
    tag = "expenses"
)]
pub async fn expense_years(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
) -> Json<Vec<i32>> {
    Json(crate::repo::expense::years(&store).await)
}

// ---------------------------------------------------------------------------
// POST /api/expenses
// ---------------------------------------------------------------------------

/// Log an expense as Pending Approval.
#[utoipa::path(
    post,
    path = "/api/expenses",
    request_body = LogExpenseRequest,
    responses(
        (status = 201, description = "Expense logged", body = Expense),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "expenses"
)]
pub async fn log_expense(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
    Json(body): Json<LogExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), AppError> {
    let expense = crate::repo::expense::log(&store, body, today()).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

// ---------------------------------------------------------------------------
// POST /api/expenses/{id}/approve
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/expenses/{id}/approve",
    params(("id" = String, Path, description = "Expense ID")),
    responses(
        (status = 200, description = "Expense marked Paid", body = Expense),
        (status = 404, description = "Expense not found", body = AppError),
        (status = 409, description = "Expense is not pending approval", body = AppError)
    ),
    tag = "expenses"
)]
pub async fn approve_expense(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
    Path(id): Path<String>,
) -> Result<Json<Expense>, AppError> {
    Ok(Json(crate::repo::expense::decide(&store, &id, true).await?))
}

// ---------------------------------------------------------------------------
// POST /api/expenses/{id}/reject
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/expenses/{id}/reject",
    params(("id" = String, Path, description = "Expense ID")),
    responses(
        (status = 200, description = "Expense rejected", body = Expense),
        (status = 404, description = "Expense not found", body = AppError),
        (status = 409, description = "Expense is not pending approval", body = AppError)
    ),
    tag = "expenses"
)]
pub async fn reject_expense(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
    Path(id): Path<String>,
) -> Result<Json<Expense>, AppError> {
    Ok(Json(crate::repo::expense::decide(&store, &id, false).await?))
}

// ---------------------------------------------------------------------------
// DELETE /api/expenses/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    params(("id" = String, Path, description = "Expense ID")),
    responses(
        (status = 204, description = "Expense deleted"),
        (status = 404, description = "Expense not found", body = AppError)
    ),
    tag = "expenses"
)]
pub async fn delete_expense(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    crate::repo::expense::delete(&store, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// POST /api/expenses/bulk
// ---------------------------------------------------------------------------

/// Approve, reject or delete a selection. Approve and reject skip items
/// that are not pending approval.
#[utoipa::path(
    post,
    path = "/api/expenses/bulk",
    request_body = BulkExpenseRequest,
    responses(
        (status = 200, description = "Bulk action applied", body = BulkOutcome),
        (status = 400, description = "Nothing selected", body = AppError)
    ),
    tag = "expenses"
)]
pub async fn bulk_expenses(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
    Json(body): Json<BulkExpenseRequest>,
) -> Result<Json<BulkOutcome>, AppError> {
    Ok(Json(crate::repo::expense::bulk(&store, &body.ids, body.action).await?))
}

// ---------------------------------------------------------------------------
// GET /api/expenses/export
// ---------------------------------------------------------------------------

/// Download the filtered expenses as CSV or XLSX.
#[utoipa::path(
    get,
    path = "/api/expenses/export",
    params(ExpenseFilter, ExportParams),
    responses(
        (status = 200, description = "Expense log file", content_type = "text/csv"),
        (status = 400, description = "Nothing to export", body = AppError)
    ),
    tag = "expenses"
)]
pub async fn export_expenses(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::FINANCE }>,
    Query(filter): Query<ExpenseFilter>,
    Query(params): Query<ExportParams>,
) -> Result<Download, AppError> {
    crate::export::check_format(params.format, crate::config::feature_flags())?;
    let rows = crate::repo::expense::list(&store, &filter).await;
    crate::export::render(&rows, params.format, today())
}
