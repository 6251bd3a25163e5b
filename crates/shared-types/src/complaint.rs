use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::common::{Labeled, Tone};
use crate::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ComplaintPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl Labeled for ComplaintPriority {
    const ALL: &'static [Self] = &[
        ComplaintPriority::High,
        ComplaintPriority::Medium,
        ComplaintPriority::Low,
    ];

    fn label(self) -> &'static str {
        match self {
            ComplaintPriority::High => "High",
            ComplaintPriority::Medium => "Medium",
            ComplaintPriority::Low => "Low",
        }
    }
}

impl ComplaintPriority {
    pub fn tone(self) -> Tone {
        match self {
            ComplaintPriority::High => Tone::Error,
            ComplaintPriority::Medium => Tone::Warning,
            ComplaintPriority::Low => Tone::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ComplaintStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl Labeled for ComplaintStatus {
    const ALL: &'static [Self] = &[
        ComplaintStatus::Open,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
    ];

    fn label(self) -> &'static str {
        match self {
            ComplaintStatus::Open => "Open",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::Resolved => "Resolved",
        }
    }
}

impl ComplaintStatus {
    pub fn tone(self) -> Tone {
        match self {
            ComplaintStatus::Open => Tone::Error,
            ComplaintStatus::InProgress => Tone::Warning,
            ComplaintStatus::Resolved => Tone::Success,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Complaint {
    pub id: String,
    pub title: String,
    /// "Name (Flat)" free text.
    pub raised_by: String,
    pub date: NaiveDate,
    pub priority: ComplaintPriority,
    pub status: ComplaintStatus,
    pub description: String,
}

impl Complaint {
    pub fn raised_by_user(&self, user_name: &str) -> bool {
        !user_name.is_empty() && self.raised_by.contains(user_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct ComplaintFilter {
    /// Priority label or "All".
    #[serde(default)]
    pub priority: Option<String>,
}

pub fn filter_complaints(complaints: &[Complaint], filter: &ComplaintFilter) -> Vec<Complaint> {
    let priority = filter
        .priority
        .as_deref()
        .and_then(ComplaintPriority::filter_value);
    complaints
        .iter()
        .filter(|c| priority.is_none_or(|p| c.priority == p))
        .cloned()
        .collect()
}

/// A kanban column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ComplaintColumn {
    pub status: ComplaintStatus,
    pub complaints: Vec<Complaint>,
}

/// Open, In Progress and Resolved columns, in that order, each keeping
/// input order.
pub fn kanban(complaints: &[Complaint]) -> Vec<ComplaintColumn> {
    ComplaintStatus::ALL
        .iter()
        .map(|&status| ComplaintColumn {
            status,
            complaints: complaints
                .iter()
                .filter(|c| c.status == status)
                .cloned()
                .collect(),
        })
        .collect()
}

pub fn own_complaints<'a>(complaints: &'a [Complaint], user_name: &str) -> Vec<&'a Complaint> {
    complaints
        .iter()
        .filter(|c| c.raised_by_user(user_name))
        .collect()
}

pub fn open_count(complaints: &[Complaint]) -> usize {
    complaints
        .iter()
        .filter(|c| c.status == ComplaintStatus::Open)
        .count()
}

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct RaiseComplaintRequest {
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "crate::common::not_blank",
            message = "Please provide a title and description for your complaint."
        ))
    )]
    pub title: String,
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "crate::common::not_blank",
            message = "Please provide a title and description for your complaint."
        ))
    )]
    pub description: String,
    #[serde(default)]
    pub priority: ComplaintPriority,
}

impl RaiseComplaintRequest {
    pub fn into_complaint(self, id: String, user: &User, today: NaiveDate) -> Complaint {
        Complaint {
            id,
            title: self.title.trim().to_string(),
            raised_by: user.display_with_flat(),
            date: today,
            priority: self.priority,
            status: ComplaintStatus::Open,
            description: self.description.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SetComplaintStatusRequest {
    pub status: ComplaintStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct ComplaintCommentRequest {
    #[cfg_attr(
        feature = "validation",
        validate(custom(function = "crate::common::not_blank", message = "Comment cannot be empty."))
    )]
    pub comment: String,
}
