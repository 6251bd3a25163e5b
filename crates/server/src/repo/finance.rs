use rand::Rng;
use shared_types::{
    finance_summary, new_id, AppError, FinanceSummary, GenerateInvoiceRequest, Invoice,
    InvoiceStatus, MaintenanceConfig, MessageResponse, Payment, SubmitPaymentRequest, VerifyAction,
};

use super::{find, find_mut};
use crate::db::SharedStore;
use crate::error_convert::ValidateRequest;

// ---------------------------------------------------------------------------
// Invoices (finance staff)
// ---------------------------------------------------------------------------

pub async fn list_invoices(store: &SharedStore) -> Vec<Invoice> {
    store.read().await.invoices.clone()
}

pub async fn summary(store: &SharedStore) -> FinanceSummary {
    finance_summary(&store.read().await.invoices)
}

/// `INV` followed by four random digits.
fn invoice_number() -> String {
    format!("INV{}", rand::thread_rng().gen_range(1000..=9999))
}

pub async fn generate_invoice(
    store: &SharedStore,
    req: GenerateInvoiceRequest,
) -> Result<Invoice, AppError> {
    req.validate_request()?;
    let invoice = Invoice {
        id: new_id("inv"),
        invoice_number: invoice_number(),
        resident_name: req.resident_name.trim().to_string(),
        amount: req.amount,
        due_date: req.due_date,
        status: InvoiceStatus::Pending,
        payment_screenshot: None,
        fine: None,
    };
    store.write().await.invoices.insert(0, invoice.clone());
    tracing::info!(number = %invoice.invoice_number, resident = %invoice.resident_name, "Invoice generated");
    Ok(invoice)
}

/// Approve or reject a submitted payment screenshot.
pub async fn verify_payment(
    store: &SharedStore,
    id: &str,
    action: VerifyAction,
) -> Result<Invoice, AppError> {
    let mut store = store.write().await;
    let invoice = find_mut(&mut store.invoices, id)?;
    if invoice.status != InvoiceStatus::PendingVerification {
        return Err(AppError::conflict(format!(
            "Invoice {} is not awaiting verification",
            invoice.invoice_number
        )));
    }
    invoice.status = action.resulting_status();
    tracing::info!(number = %invoice.invoice_number, outcome = action.past_tense(), "Payment verified");
    Ok(invoice.clone())
}

pub async fn set_status(
    store: &SharedStore,
    id: &str,
    status: InvoiceStatus,
) -> Result<Invoice, AppError> {
    let mut store = store.write().await;
    let invoice = find_mut(&mut store.invoices, id)?;
    invoice.status = status;
    tracing::info!(number = %invoice.invoice_number, status = ?status, "Invoice status set");
    Ok(invoice.clone())
}

/// Acknowledge a payment reminder. Nothing is delivered.
pub async fn send_reminder(store: &SharedStore, id: &str) -> Result<MessageResponse, AppError> {
    let store = store.read().await;
    let invoice = find(&store.invoices, id)?;
    tracing::info!(number = %invoice.invoice_number, resident = %invoice.resident_name, "Reminder requested");
    Ok(MessageResponse::new(format!(
        "Reminder sent to {} for invoice {}.",
        invoice.resident_name, invoice.invoice_number
    )))
}

pub async fn payments(store: &SharedStore) -> Vec<Payment> {
    store.read().await.payments.clone()
}

pub async fn maintenance(store: &SharedStore) -> MaintenanceConfig {
    store.read().await.maintenance.clone()
}

pub async fn update_maintenance(
    store: &SharedStore,
    config: MaintenanceConfig,
) -> Result<MaintenanceConfig, AppError> {
    config.validate_request()?;
    store.write().await.maintenance = config.clone();
    tracing::info!(?config, "Maintenance settings saved");
    Ok(config)
}

// ---------------------------------------------------------------------------
// Own invoices (resident)
// ---------------------------------------------------------------------------

pub async fn own_invoices(store: &SharedStore, user_name: &str) -> Vec<Invoice> {
    store
        .read()
        .await
        .invoices
        .iter()
        .filter(|i| i.belongs_to(user_name))
        .cloned()
        .collect()
}

/// Send the selected invoices for verification with one screenshot.
///
/// Every selected invoice must exist, belong to the user and be payable;
/// otherwise nothing changes.
pub async fn submit_payment(
    store: &SharedStore,
    user_name: &str,
    req: SubmitPaymentRequest,
) -> Result<Vec<Invoice>, AppError> {
    let screenshot = req.check()?.file_name.clone();
    let mut store = store.write().await;
    for id in &req.invoice_ids {
        let invoice = find(&store.invoices, id)?;
        if !invoice.belongs_to(user_name) {
            return Err(AppError::forbidden(format!(
                "Invoice {} is not yours",
                invoice.invoice_number
            )));
        }
        if !invoice.status.is_payable() {
            return Err(AppError::conflict(format!(
                "Invoice {} is not payable",
                invoice.invoice_number
            )));
        }
    }
    let mut updated = Vec::with_capacity(req.invoice_ids.len());
    for invoice in store
        .invoices
        .iter_mut()
        .filter(|i| req.invoice_ids.contains(&i.id))
    {
        invoice.status = InvoiceStatus::PendingVerification;
        invoice.payment_screenshot = Some(screenshot.clone());
        updated.push(invoice.clone());
    }
    tracing::info!(user = user_name, count = updated.len(), "Payment submitted for verification");
    Ok(updated)
}

/// A paid invoice owned by the user, for the printable receipt.
pub async fn receipt(store: &SharedStore, user_name: &str, id: &str) -> Result<Invoice, AppError> {
    let store = store.read().await;
    let invoice = find(&store.invoices, id)?;
    if !invoice.belongs_to(user_name) {
        return Err(AppError::forbidden("You can only download your own receipts."));
    }
    if invoice.status != InvoiceStatus::Paid {
        return Err(AppError::bad_request("Receipts are only available for paid invoices."));
    }
    Ok(invoice.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::test_support::{day, store};
    use shared_types::{AppErrorKind, Attachment};

    #[tokio::test]
    async fn generated_invoice_is_pending_with_number() {
        let store = store();
        let invoice = generate_invoice(
            &store,
            GenerateInvoiceRequest {
                resident_name: "Bob Williams".into(),
                amount: 5500.0,
                due_date: day(2024, 9, 10),
            },
        )
        .await
        .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(invoice.invoice_number.len(), 7);
        let digits: u32 = invoice.invoice_number[3..].parse().unwrap();
        assert!((1000..=9999).contains(&digits));
        assert_eq!(list_invoices(&store).await[0].id, invoice.id);
    }

    #[tokio::test]
    async fn zero_amount_rejected() {
        let store = store();
        let err = generate_invoice(
            &store,
            GenerateInvoiceRequest {
                resident_name: "Bob Williams".into(),
                amount: 0.0,
                due_date: day(2024, 9, 10),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert_eq!(list_invoices(&store).await.len(), 6);
    }

    #[tokio::test]
    async fn verify_only_pending_verification() {
        let store = store();
        let inv = verify_payment(&store, "inv-4", VerifyAction::Reject).await.unwrap();
        assert_eq!(inv.status, InvoiceStatus::Pending);
        let err = verify_payment(&store, "inv-4", VerifyAction::Approve).await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Conflict);
    }

    #[tokio::test]
    async fn set_status_touches_one_invoice() {
        let store = store();
        let before = list_invoices(&store).await;
        set_status(&store, "inv-2", InvoiceStatus::Paid).await.unwrap();
        let after = list_invoices(&store).await;
        for (b, a) in before.iter().zip(&after) {
            if a.id == "inv-2" {
                assert_eq!(a.status, InvoiceStatus::Paid);
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[tokio::test]
    async fn submit_marks_selected_for_verification() {
        let store = store();
        let updated = submit_payment(
            &store,
            "John Doe",
            SubmitPaymentRequest {
                invoice_ids: vec!["inv-5".into(), "inv-6".into()],
                screenshot: Some(Attachment::new("upi.png", 1024)),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.len(), 2);
        assert!(updated
            .iter()
            .all(|i| i.status == InvoiceStatus::PendingVerification
                && i.payment_screenshot.as_deref() == Some("upi.png")));
    }

    #[tokio::test]
    async fn submit_someone_elses_invoice_changes_nothing() {
        let store = store();
        let err = submit_payment(
            &store,
            "John Doe",
            SubmitPaymentRequest {
                invoice_ids: vec!["inv-5".into(), "inv-2".into()],
                screenshot: Some(Attachment::new("upi.png", 1024)),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Forbidden);
        let own = own_invoices(&store, "John Doe").await;
        assert!(own.iter().all(|i| i.status != InvoiceStatus::PendingVerification));
    }

    #[tokio::test]
    async fn receipt_needs_paid_invoice() {
        let store = store();
        let err = receipt(&store, "John Doe", "inv-5").await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::BadRequest);
        set_status(&store, "inv-5", InvoiceStatus::Paid).await.unwrap();
        assert_eq!(receipt(&store, "John Doe", "inv-5").await.unwrap().invoice_number, "INV005");
    }

    #[tokio::test]
    async fn maintenance_day_out_of_range() {
        let store = store();
        let mut config = maintenance(&store).await;
        config.due_date_day = 32;
        assert!(update_maintenance(&store, config).await.is_err());
        assert_eq!(maintenance(&store).await.due_date_day, 10);
    }
}
