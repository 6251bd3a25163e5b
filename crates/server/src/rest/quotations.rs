use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use shared_types::{
    access, AppError, QuotationRequest, QuotationTransitionRequest, RaiseQuotationRequest,
};

use crate::auth::extractors::RoleRequired;
use crate::db::{today, SharedStore};

// ---------------------------------------------------------------------------
// GET /api/quotations
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/quotations",
    responses(
        (status = 200, description = "Quotation requests", body = Vec<QuotationRequest>),
        (status = 403, description = "Staff only", body = AppError)
    ),
    tag = "quotations"
)]
pub async fn list_quotations(
    State(store): State<SharedStore>,
    _auth: RoleRequired<{ access::STAFF }>,
) -> Json<Vec<QuotationRequest>> {
    Json(crate::repo::quotation::list(&store).await)
}

// ---------------------------------------------------------------------------
// POST /api/quotations
// ---------------------------------------------------------------------------

/// Raise a quotation request for treasurer approval. Secretary only.
#[utoipa::path(
    post,
    path = "/api/quotations",
    request_body = RaiseQuotationRequest,
    responses(
        (status = 201, description = "Request raised", body = QuotationRequest),
        (status = 422, description = "Validation failed", body = AppError),
        (status = 403, description = "Secretary only", body = AppError)
    ),
    tag = "quotations"
)]
pub async fn raise_quotation(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::SECRETARY }>,
    Json(body): Json<RaiseQuotationRequest>,
) -> Result<(StatusCode, Json<QuotationRequest>), AppError> {
    let user = crate::repo::account::find_user(&store, &claims.sub).await?;
    let request = crate::repo::quotation::raise(&store, &user.name, body, today()).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

// ---------------------------------------------------------------------------
// POST /api/quotations/{id}/transition
// ---------------------------------------------------------------------------

/// Move a request one step through the approval workflow.
///
/// Each step belongs to one role: the treasurer approves, rejects and
/// commences work, the secretary records committee approval.
#[utoipa::path(
    post,
    path = "/api/quotations/{id}/transition",
    params(("id" = String, Path, description = "Quotation request ID")),
    request_body = QuotationTransitionRequest,
    responses(
        (status = 200, description = "Request moved on", body = QuotationRequest),
        (status = 400, description = "Notes missing", body = AppError),
        (status = 403, description = "Step belongs to another role", body = AppError),
        (status = 404, description = "Request not found", body = AppError),
        (status = 409, description = "Request is in the wrong status", body = AppError)
    ),
    tag = "quotations"
)]
pub async fn transition_quotation(
    State(store): State<SharedStore>,
    RoleRequired(claims): RoleRequired<{ access::STAFF }>,
    Path(id): Path<String>,
    Json(body): Json<QuotationTransitionRequest>,
) -> Result<Json<QuotationRequest>, AppError> {
    let request =
        crate::repo::quotation::transition(&store, &id, claims.role, body, today()).await?;
    Ok(Json(request))
}
