use chrono::NaiveDate;
use shared_types::{
    filter_complaints, kanban, new_id, AppError, Complaint, ComplaintColumn,
    ComplaintCommentRequest, ComplaintFilter, ComplaintStatus, MessageResponse,
    RaiseComplaintRequest, User,
};

use super::{find, find_mut, remove};
use crate::db::SharedStore;
use crate::error_convert::ValidateRequest;

// ---------------------------------------------------------------------------
// Office view
// ---------------------------------------------------------------------------

pub async fn list(store: &SharedStore, filter: &ComplaintFilter) -> Vec<Complaint> {
    filter_complaints(&store.read().await.complaints, filter)
}

pub async fn board(store: &SharedStore, filter: &ComplaintFilter) -> Vec<ComplaintColumn> {
    kanban(&list(store, filter).await)
}

pub async fn set_status(
    store: &SharedStore,
    id: &str,
    status: ComplaintStatus,
) -> Result<Complaint, AppError> {
    let mut store = store.write().await;
    let complaint = find_mut(&mut store.complaints, id)?;
    complaint.status = status;
    tracing::info!(id, status = ?status, "Complaint status set");
    Ok(complaint.clone())
}

/// Acknowledge a staff comment. Comments are not stored.
pub async fn comment(
    store: &SharedStore,
    id: &str,
    req: ComplaintCommentRequest,
) -> Result<MessageResponse, AppError> {
    req.validate_request()?;
    let store = store.read().await;
    let complaint = find(&store.complaints, id)?;
    tracing::info!(id, "Comment added to complaint");
    Ok(MessageResponse::new(format!(
        "Comment added to \"{}\".",
        complaint.title
    )))
}

// ---------------------------------------------------------------------------
// Resident view
// ---------------------------------------------------------------------------

pub async fn own(store: &SharedStore, user_name: &str) -> Vec<Complaint> {
    store
        .read()
        .await
        .complaints
        .iter()
        .filter(|c| c.raised_by_user(user_name))
        .cloned()
        .collect()
}

pub async fn raise(
    store: &SharedStore,
    user: &User,
    req: RaiseComplaintRequest,
    today: NaiveDate,
) -> Result<Complaint, AppError> {
    req.validate_request()?;
    let complaint = req.into_complaint(new_id("com"), user, today);
    store.write().await.complaints.insert(0, complaint.clone());
    tracing::info!(id = %complaint.id, user = %user.id, "Complaint raised");
    Ok(complaint)
}

/// Residents may only delete complaints they raised.
pub async fn delete_own(store: &SharedStore, user_name: &str, id: &str) -> Result<Complaint, AppError> {
    let mut store = store.write().await;
    if !find(&store.complaints, id)?.raised_by_user(user_name) {
        return Err(AppError::forbidden("You can only delete your own complaints."));
    }
    let removed = remove(&mut store.complaints, id)?;
    tracing::info!(id, "Complaint deleted");
    Ok(removed)
}
