//! Landing-page aggregates for staff and residents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amenity::{bookings_on, split_bookings, Booking};
use crate::common::{format_inr, Labeled, Tone};
use crate::complaint::{open_count, own_complaints, Complaint, ComplaintStatus};
use crate::finance::{Invoice, InvoiceStatus, Payment};
use crate::notice::Notice;
use crate::resident::Resident;
use crate::role::{access, RoleSet};
use crate::{AppError, Role};

const RECENT_ROWS: usize = 4;
const LATEST_NOTICES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Kpi {
    pub title: String,
    pub value: String,
    pub tone: Tone,
}

impl Kpi {
    fn new(title: &str, value: impl ToString, tone: Tone) -> Self {
        Self {
            title: title.to_string(),
            value: value.to_string(),
            tone,
        }
    }
}

/// A dashboard shortcut into another page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct QuickAction {
    pub label: String,
    pub path: String,
}

const STAFF_ACTIONS: &[(&str, &str, u8)] = &[
    ("Add New Resident", "/admin/residents", access::OFFICE),
    ("Post a Notice", "/admin/notices", access::OFFICE),
    ("Generate Invoice", "/admin/finances", access::FINANCE),
    ("Manage Complaints", "/admin/complaints", access::OFFICE),
];

const RESIDENT_LINKS: &[(&str, &str)] = &[
    ("Pay Bills", "/resident/finances"),
    ("Raise Complaint", "/resident/complaints"),
    ("Book Amenity", "/resident/amenities"),
    ("View Notices", "/resident/notices"),
];

pub fn quick_actions(role: Role) -> Vec<QuickAction> {
    if role == Role::Resident {
        return RESIDENT_LINKS
            .iter()
            .map(|(label, path)| QuickAction {
                label: label.to_string(),
                path: path.to_string(),
            })
            .collect();
    }
    STAFF_ACTIONS
        .iter()
        .filter(|(_, _, roles)| RoleSet(*roles).contains(role))
        .map(|(label, path, _)| QuickAction {
            label: label.to_string(),
            path: path.to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Staff
// ---------------------------------------------------------------------------

/// Slice of a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatusCount {
    pub label: String,
    pub count: usize,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StaffDashboard {
    pub kpis: Vec<Kpi>,
    pub recent_complaints: Vec<Complaint>,
    pub recent_payments: Vec<Payment>,
    pub quick_actions: Vec<QuickAction>,
    /// Only for roles that manage complaints.
    #[serde(default)]
    pub complaint_breakdown: Option<Vec<StatusCount>>,
}

/// Everything a staff dashboard reads.
pub struct StaffSources<'a> {
    pub residents: &'a [Resident],
    pub invoices: &'a [Invoice],
    pub complaints: &'a [Complaint],
    pub notices: &'a [Notice],
    pub bookings: &'a [Booking],
    pub payments: &'a [Payment],
}

pub fn complaint_breakdown(complaints: &[Complaint]) -> Vec<StatusCount> {
    ComplaintStatus::ALL
        .iter()
        .map(|&status| StatusCount {
            label: status.label().to_string(),
            count: complaints.iter().filter(|c| c.status == status).count(),
            tone: status.tone(),
        })
        .collect()
}

pub fn staff_kpis(role: Role, src: &StaffSources<'_>, today: NaiveDate) -> Vec<Kpi> {
    let total_residents = Kpi::new("Total Residents", src.residents.len(), Tone::Info);
    let pending_payments = Kpi::new(
        "Pending Payments",
        src.invoices
            .iter()
            .filter(|i| i.status.is_payable())
            .count(),
        Tone::Warning,
    );
    let open_complaints = Kpi::new("Open Complaints", open_count(src.complaints), Tone::Error);
    let bookings_today = Kpi::new(
        "Bookings Today",
        bookings_on(src.bookings, today),
        Tone::Success,
    );

    match role {
        Role::Admin => vec![total_residents, pending_payments, open_complaints, bookings_today],
        Role::Secretary => vec![
            total_residents,
            open_complaints,
            Kpi::new("Total Notices", src.notices.len(), Tone::Info),
            bookings_today,
        ],
        Role::Treasurer => {
            let collected: f64 = src
                .invoices
                .iter()
                .filter(|i| i.status == InvoiceStatus::Paid)
                .map(|i| i.amount)
                .sum();
            let overdue = src
                .invoices
                .iter()
                .filter(|i| i.status == InvoiceStatus::Overdue)
                .count();
            vec![
                pending_payments,
                Kpi::new("Collection", format_inr(collected), Tone::Success),
                Kpi::new("Overdue Invoices", overdue, Tone::Error),
                total_residents,
            ]
        }
        Role::Security | Role::Resident => Vec::new(),
    }
}

pub fn staff_dashboard(role: Role, src: &StaffSources<'_>, today: NaiveDate) -> StaffDashboard {
    let manages_complaints = RoleSet(access::OFFICE).contains(role);
    StaffDashboard {
        kpis: staff_kpis(role, src, today),
        recent_complaints: src.complaints.iter().take(RECENT_ROWS).cloned().collect(),
        recent_payments: src.payments.iter().take(RECENT_ROWS).cloned().collect(),
        quick_actions: quick_actions(role),
        complaint_breakdown: manages_complaints.then(|| complaint_breakdown(src.complaints)),
    }
}

// ---------------------------------------------------------------------------
// Resident
// ---------------------------------------------------------------------------

pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning"
    } else if hour < 18 {
        "Good Afternoon"
    } else {
        "Good Evening"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PollOption {
    pub label: String,
    pub votes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Poll {
    pub question: String,
    pub options: Vec<PollOption>,
}

impl Poll {
    pub fn community() -> Self {
        Self {
            question: "What color should we paint the clubhouse?".to_string(),
            options: [("Ocean Blue", 45), ("Warm Beige", 30), ("Modern Gray", 25)]
                .into_iter()
                .map(|(label, votes)| PollOption {
                    label: label.to_string(),
                    votes,
                })
                .collect(),
        }
    }

    pub fn total_votes(&self) -> u32 {
        self.options.iter().map(|o| o.votes).sum()
    }

    /// Share of the vote per option, rounded to whole percent.
    pub fn percentages(&self) -> Vec<(String, u32)> {
        let total = self.total_votes().max(1) as f64;
        self.options
            .iter()
            .map(|o| (o.label.clone(), (o.votes as f64 * 100.0 / total).round() as u32))
            .collect()
    }

    pub fn vote(&mut self, option: &str) -> Result<(), AppError> {
        let choice = self
            .options
            .iter_mut()
            .find(|o| !option.trim().is_empty() && o.label == option.trim())
            .ok_or_else(|| AppError::field("option", "Please select an option to vote."))?;
        choice.votes += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VoteRequest {
    #[serde(default)]
    pub option: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ResidentDashboard {
    pub greeting: String,
    pub first_name: String,
    pub latest_unpaid: Option<Invoice>,
    pub open_complaints: usize,
    pub upcoming_booking: Option<Booking>,
    pub latest_notices: Vec<Notice>,
    pub quick_links: Vec<QuickAction>,
    pub poll: Poll,
    pub has_voted: bool,
}

pub struct ResidentSources<'a> {
    pub user_name: &'a str,
    pub invoices: &'a [Invoice],
    pub complaints: &'a [Complaint],
    pub notices: &'a [Notice],
    /// The resident's own bookings.
    pub bookings: &'a [Booking],
    pub poll: &'a Poll,
    pub has_voted: bool,
}

pub fn resident_dashboard(src: &ResidentSources<'_>, today: NaiveDate, hour: u32) -> ResidentDashboard {
    ResidentDashboard {
        greeting: greeting(hour).to_string(),
        first_name: src
            .user_name
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string(),
        latest_unpaid: src
            .invoices
            .iter()
            .find(|i| i.belongs_to(src.user_name) && i.status.is_payable())
            .cloned(),
        open_complaints: own_complaints(src.complaints, src.user_name)
            .into_iter()
            .filter(|c| c.status == ComplaintStatus::Open)
            .count(),
        upcoming_booking: split_bookings(src.bookings, today).upcoming.into_iter().next(),
        latest_notices: src.notices.iter().take(LATEST_NOTICES).cloned().collect(),
        quick_links: quick_actions(Role::Resident),
        poll: src.poll.clone(),
        has_voted: src.has_voted,
    }
}
