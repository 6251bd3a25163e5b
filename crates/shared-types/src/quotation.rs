use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::common::{Attachment, Labeled, Tone};
use crate::{AppError, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum QuotationStatus {
    #[serde(rename = "Pending Treasurer Approval")]
    PendingTreasurerApproval,
    #[serde(rename = "Pending Committee Approval")]
    PendingCommitteeApproval,
    #[serde(rename = "Committee Approved")]
    CommitteeApproved,
    #[serde(rename = "Rejected by Treasurer")]
    RejectedByTreasurer,
    #[serde(rename = "Work Commenced")]
    WorkCommenced,
}

impl Labeled for QuotationStatus {
    const ALL: &'static [Self] = &[
        QuotationStatus::PendingTreasurerApproval,
        QuotationStatus::PendingCommitteeApproval,
        QuotationStatus::CommitteeApproved,
        QuotationStatus::RejectedByTreasurer,
        QuotationStatus::WorkCommenced,
    ];

    fn label(self) -> &'static str {
        match self {
            QuotationStatus::PendingTreasurerApproval => "Pending Treasurer Approval",
            QuotationStatus::PendingCommitteeApproval => "Pending Committee Approval",
            QuotationStatus::CommitteeApproved => "Committee Approved",
            QuotationStatus::RejectedByTreasurer => "Rejected by Treasurer",
            QuotationStatus::WorkCommenced => "Work Commenced",
        }
    }
}

impl QuotationStatus {
    pub fn tone(self) -> Tone {
        match self {
            QuotationStatus::PendingTreasurerApproval => Tone::Warning,
            QuotationStatus::PendingCommitteeApproval | QuotationStatus::CommitteeApproved => {
                Tone::Info
            }
            QuotationStatus::WorkCommenced => Tone::Success,
            QuotationStatus::RejectedByTreasurer => Tone::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct QuotationRequest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub vendor_name: String,
    pub amount: f64,
    pub quotation_file: String,
    pub raised_by: String,
    pub date_raised: NaiveDate,
    pub status: QuotationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_commence_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_commence_notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// One step of the approval workflow.
///
/// ```text
/// Pending Treasurer Approval --approve(T)--> Pending Committee Approval
///                            --reject(T)---> Rejected by Treasurer
/// Pending Committee Approval --approve(S)--> Committee Approved
/// Committee Approved         --commence(T)-> Work Commenced
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum QuotationAction {
    TreasurerApprove,
    TreasurerReject,
    CommitteeApprove,
    CommenceWork,
}

impl QuotationAction {
    pub const ALL: &'static [QuotationAction] = &[
        QuotationAction::TreasurerApprove,
        QuotationAction::TreasurerReject,
        QuotationAction::CommitteeApprove,
        QuotationAction::CommenceWork,
    ];

    pub fn required_role(self) -> Role {
        match self {
            QuotationAction::CommitteeApprove => Role::Secretary,
            _ => Role::Treasurer,
        }
    }

    pub fn from_status(self) -> QuotationStatus {
        match self {
            QuotationAction::TreasurerApprove | QuotationAction::TreasurerReject => {
                QuotationStatus::PendingTreasurerApproval
            }
            QuotationAction::CommitteeApprove => QuotationStatus::PendingCommitteeApproval,
            QuotationAction::CommenceWork => QuotationStatus::CommitteeApproved,
        }
    }

    pub fn to_status(self) -> QuotationStatus {
        match self {
            QuotationAction::TreasurerApprove => QuotationStatus::PendingCommitteeApproval,
            QuotationAction::TreasurerReject => QuotationStatus::RejectedByTreasurer,
            QuotationAction::CommitteeApprove => QuotationStatus::CommitteeApproved,
            QuotationAction::CommenceWork => QuotationStatus::WorkCommenced,
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            QuotationAction::TreasurerApprove => "Approve",
            QuotationAction::TreasurerReject => "Reject",
            QuotationAction::CommitteeApprove => "Committee Approve",
            QuotationAction::CommenceWork => "Commence Work",
        }
    }
}

/// Actions offered to `role` for a request currently in `status`.
pub fn available_actions(role: Role, status: QuotationStatus) -> Vec<QuotationAction> {
    QuotationAction::ALL
        .iter()
        .copied()
        .filter(|a| a.required_role() == role && a.from_status() == status)
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct QuotationTransitionRequest {
    pub action: QuotationAction,
    /// Required for `commence_work`.
    #[serde(default)]
    pub notes: Option<String>,
}

impl QuotationRequest {
    /// Apply a workflow step. Role is checked before status; nothing is
    /// modified on error.
    pub fn transition(
        &mut self,
        role: Role,
        action: QuotationAction,
        notes: Option<&str>,
        today: NaiveDate,
    ) -> Result<(), AppError> {
        if action.required_role() != role {
            return Err(AppError::forbidden(format!(
                "{} role required",
                action.required_role()
            )));
        }
        if self.status != action.from_status() {
            return Err(AppError::conflict(format!(
                "Request is \"{}\", expected \"{}\"",
                self.status.label(),
                action.from_status().label()
            )));
        }
        if action == QuotationAction::CommenceWork {
            let notes = notes.map(str::trim).filter(|n| !n.is_empty()).ok_or_else(|| {
                AppError::field("notes", "Please add notes for the residents.")
            })?;
            self.work_commence_notes = Some(notes.to_string());
            self.work_commence_date = Some(today);
        }
        self.status = action.to_status();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Raise
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct RaiseQuotationRequest {
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "crate::common::not_blank",
            message = "Please fill all fields and upload the quotation file."
        ))
    )]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "crate::common::not_blank",
            message = "Please fill all fields and upload the quotation file."
        ))
    )]
    pub vendor_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(range(
            exclusive_min = 0.0,
            message = "Please fill all fields and upload the quotation file."
        ))
    )]
    pub amount: f64,
    #[serde(default)]
    pub quotation_file: Option<Attachment>,
}

impl RaiseQuotationRequest {
    pub fn into_request(
        self,
        id: String,
        raised_by: &str,
        today: NaiveDate,
    ) -> Result<QuotationRequest, AppError> {
        let file = self
            .quotation_file
            .filter(|f| !f.file_name.trim().is_empty())
            .ok_or_else(|| {
                AppError::field(
                    "quotation_file",
                    "Please fill all fields and upload the quotation file.",
                )
            })?;
        file.check("quotation_file")?;
        Ok(QuotationRequest {
            id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            vendor_name: self.vendor_name.trim().to_string(),
            amount: self.amount,
            quotation_file: file.file_name,
            raised_by: raised_by.to_string(),
            date_raised: today,
            status: QuotationStatus::PendingTreasurerApproval,
            work_commence_date: None,
            work_commence_notes: None,
        })
    }
}
