use chrono::NaiveDate;
use shared_types::{
    new_id, AppError, QuotationRequest, QuotationTransitionRequest, RaiseQuotationRequest, Role,
};

use super::find_mut;
use crate::db::SharedStore;
use crate::error_convert::ValidateRequest;

pub async fn list(store: &SharedStore) -> Vec<QuotationRequest> {
    store.read().await.quotations.clone()
}

/// Raise a new request awaiting the treasurer.
pub async fn raise(
    store: &SharedStore,
    raised_by: &str,
    req: RaiseQuotationRequest,
    today: NaiveDate,
) -> Result<QuotationRequest, AppError> {
    req.validate_request()?;
    let quotation = req.into_request(new_id("quote"), raised_by, today)?;
    store.write().await.quotations.insert(0, quotation.clone());
    tracing::info!(id = %quotation.id, vendor = %quotation.vendor_name, "Quotation raised");
    Ok(quotation)
}

/// Advance one request through the approval workflow.
pub async fn transition(
    store: &SharedStore,
    id: &str,
    role: Role,
    req: QuotationTransitionRequest,
    today: NaiveDate,
) -> Result<QuotationRequest, AppError> {
    let mut store = store.write().await;
    let quotation = find_mut(&mut store.quotations, id)?;
    quotation.transition(role, req.action, req.notes.as_deref(), today)?;
    tracing::info!(id, action = ?req.action, status = ?quotation.status, "Quotation advanced");
    Ok(quotation.clone())
}
