use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::common::{Attachment, Labeled, Tone};
use crate::AppError;

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Overdue,
    #[serde(rename = "Pending Verification")]
    PendingVerification,
}

impl Labeled for InvoiceStatus {
    const ALL: &'static [Self] = &[
        InvoiceStatus::Paid,
        InvoiceStatus::Pending,
        InvoiceStatus::Overdue,
        InvoiceStatus::PendingVerification,
    ];

    fn label(self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Overdue => "Overdue",
            InvoiceStatus::PendingVerification => "Pending Verification",
        }
    }
}

impl InvoiceStatus {
    pub fn tone(self) -> Tone {
        match self {
            InvoiceStatus::Paid => Tone::Success,
            InvoiceStatus::Pending => Tone::Warning,
            InvoiceStatus::Overdue => Tone::Error,
            InvoiceStatus::PendingVerification => Tone::Info,
        }
    }

    /// Residents may pay Pending and Overdue invoices.
    pub fn is_payable(self) -> bool {
        matches!(self, InvoiceStatus::Pending | InvoiceStatus::Overdue)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    pub resident_name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_screenshot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fine: Option<f64>,
}

impl Invoice {
    pub fn fine_amount(&self) -> f64 {
        self.fine.unwrap_or(0.0)
    }

    /// Amount plus any late fee.
    pub fn total(&self) -> f64 {
        self.amount + self.fine_amount()
    }

    /// Ownership is a name match, as invoices carry no user id.
    pub fn belongs_to(&self, user_name: &str) -> bool {
        !user_name.is_empty() && self.resident_name.contains(user_name)
    }
}

/// Counts and totals per status for the finance overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FinanceSummary {
    pub paid_count: usize,
    pub paid_total: f64,
    pub pending_count: usize,
    pub pending_total: f64,
    pub overdue_count: usize,
    /// Includes fines.
    pub overdue_total: f64,
}

pub fn finance_summary(invoices: &[Invoice]) -> FinanceSummary {
    invoices
        .iter()
        .fold(FinanceSummary::default(), |mut s, inv| {
            match inv.status {
                InvoiceStatus::Paid => {
                    s.paid_count += 1;
                    s.paid_total += inv.amount;
                }
                InvoiceStatus::Pending => {
                    s.pending_count += 1;
                    s.pending_total += inv.amount;
                }
                InvoiceStatus::Overdue => {
                    s.overdue_count += 1;
                    s.overdue_total += inv.total();
                }
                InvoiceStatus::PendingVerification => {}
            }
            s
        })
}

pub fn own_invoices<'a>(invoices: &'a [Invoice], user_name: &str) -> Vec<&'a Invoice> {
    invoices.iter().filter(|i| i.belongs_to(user_name)).collect()
}

/// Σ(amount + fine) over the selected ids.
pub fn selection_total(invoices: &[Invoice], selected: &[String]) -> f64 {
    invoices
        .iter()
        .filter(|i| selected.contains(&i.id))
        .map(Invoice::total)
        .sum()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct GenerateInvoiceRequest {
    #[cfg_attr(
        feature = "validation",
        validate(custom(function = "crate::common::not_blank", message = "Please fill all fields."))
    )]
    pub resident_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(range(exclusive_min = 0.0, message = "Please enter a valid amount."))
    )]
    pub amount: f64,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum VerifyAction {
    Approve,
    Reject,
}

impl VerifyAction {
    pub fn resulting_status(self) -> InvoiceStatus {
        match self {
            VerifyAction::Approve => InvoiceStatus::Paid,
            VerifyAction::Reject => InvoiceStatus::Pending,
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            VerifyAction::Approve => "approved",
            VerifyAction::Reject => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VerifyPaymentRequest {
    pub action: VerifyAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SetInvoiceStatusRequest {
    pub status: InvoiceStatus,
}

/// Resident payment: the selected invoices plus the screenshot upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SubmitPaymentRequest {
    pub invoice_ids: Vec<String>,
    #[serde(default)]
    pub screenshot: Option<Attachment>,
}

impl SubmitPaymentRequest {
    pub fn check(&self) -> Result<&Attachment, AppError> {
        if self.invoice_ids.is_empty() {
            return Err(AppError::field(
                "invoice_ids",
                "Please select at least one invoice to pay.",
            ));
        }
        let screenshot = self
            .screenshot
            .as_ref()
            .filter(|s| !s.file_name.trim().is_empty())
            .ok_or_else(|| {
                AppError::field("screenshot", "Please upload a payment screenshot.")
            })?;
        screenshot.check("screenshot")?;
        Ok(screenshot)
    }
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

impl Labeled for PaymentMethod {
    const ALL: &'static [Self] = &[
        PaymentMethod::CreditCard,
        PaymentMethod::Upi,
        PaymentMethod::BankTransfer,
    ];

    fn label(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Payment {
    pub id: String,
    pub resident_name: String,
    pub amount: f64,
    pub payment_date: NaiveDate,
    pub invoice_number: String,
    pub payment_method: PaymentMethod,
}

// ---------------------------------------------------------------------------
// Maintenance settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct MaintenanceConfig {
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0.0, message = "Monthly amount must be non-negative"))
    )]
    pub monthly_amount: f64,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, max = 31, message = "Due date must be a day between 1 and 31"))
    )]
    pub due_date_day: u32,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0.0, message = "Late fee must be non-negative"))
    )]
    pub late_fee: f64,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, max = 31, message = "Late fee day must be a day between 1 and 31"))
    )]
    pub late_fee_after_day: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn inv(id: &str, name: &str, amount: f64, status: InvoiceStatus, fine: Option<f64>) -> Invoice {
        Invoice {
            id: id.into(),
            invoice_number: format!("INV-{id}"),
            resident_name: name.into(),
            amount,
            due_date: NaiveDate::from_ymd_opt(2024, 8, 10).unwrap(),
            status,
            payment_screenshot: None,
            fine,
        }
    }

    fn sample() -> Vec<Invoice> {
        vec![
            inv("1", "Alice Johnson", 5000.0, InvoiceStatus::Paid, None),
            inv("2", "Bob Williams", 5500.0, InvoiceStatus::Pending, None),
            inv("3", "Diana Miller", 5000.0, InvoiceStatus::Overdue, Some(250.0)),
            inv("4", "Ethan Davis", 6000.0, InvoiceStatus::PendingVerification, None),
            inv("5", "John Doe", 5200.0, InvoiceStatus::Pending, None),
            inv("6", "John Doe", 5000.0, InvoiceStatus::Overdue, Some(250.0)),
        ]
    }

    #[test]
    fn summary_counts_and_totals() {
        let s = finance_summary(&sample());
        assert_eq!(
            s,
            FinanceSummary {
                paid_count: 1,
                paid_total: 5000.0,
                pending_count: 2,
                pending_total: 10700.0,
                overdue_count: 2,
                overdue_total: 10500.0,
            }
        );
    }

    #[test]
    fn own_invoices_match_by_name() {
        let all = sample();
        let mine = own_invoices(&all, "John Doe");
        assert_eq!(mine.len(), 2);
        assert!(own_invoices(&all, "").is_empty());
    }

    #[test]
    fn selection_total_includes_fines() {
        let all = sample();
        let total = selection_total(&all, &["5".to_string(), "6".to_string()]);
        assert_eq!(total, 10450.0);
    }

    #[test]
    fn verify_action_outcomes() {
        assert_eq!(VerifyAction::Approve.resulting_status(), InvoiceStatus::Paid);
        assert_eq!(VerifyAction::Reject.resulting_status(), InvoiceStatus::Pending);
    }

    #[test]
    fn submit_payment_requires_selection_then_screenshot() {
        let empty = SubmitPaymentRequest {
            invoice_ids: vec![],
            screenshot: None,
        };
        assert_eq!(
            empty.check().unwrap_err().message,
            "Please select at least one invoice to pay."
        );

        let no_shot = SubmitPaymentRequest {
            invoice_ids: vec!["5".into()],
            screenshot: None,
        };
        assert_eq!(
            no_shot.check().unwrap_err().message,
            "Please upload a payment screenshot."
        );

        let ok = SubmitPaymentRequest {
            invoice_ids: vec!["5".into()],
            screenshot: Some(Attachment::new("upi.png", 2048)),
        };
        assert_eq!(ok.check().unwrap().file_name, "upi.png");
    }

    #[test]
    fn status_serde_uses_display_names() {
        let json = serde_json::to_string(&InvoiceStatus::PendingVerification).unwrap();
        assert_eq!(json, "\"Pending Verification\"");
        assert_eq!(
            InvoiceStatus::from_label("Pending Verification"),
            Some(InvoiceStatus::PendingVerification)
        );
    }
}
