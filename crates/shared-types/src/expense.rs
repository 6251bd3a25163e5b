use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::common::{iso_date, matches_search, Attachment, Labeled, Tone};
use crate::export::{Cell, ExportFormat, Tabular};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ExpenseCategory {
    Maintenance,
    Utilities,
    #[serde(rename = "Staff Salary")]
    StaffSalary,
    Event,
    #[default]
    Miscellaneous,
}

impl Labeled for ExpenseCategory {
    const ALL: &'static [Self] = &[
        ExpenseCategory::Maintenance,
        ExpenseCategory::Utilities,
        ExpenseCategory::StaffSalary,
        ExpenseCategory::Event,
        ExpenseCategory::Miscellaneous,
    ];

    fn label(self) -> &'static str {
        match self {
            ExpenseCategory::Maintenance => "Maintenance",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::StaffSalary => "Staff Salary",
            ExpenseCategory::Event => "Event",
            ExpenseCategory::Miscellaneous => "Miscellaneous",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ExpenseStatus {
    Paid,
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    Rejected,
}

impl Labeled for ExpenseStatus {
    const ALL: &'static [Self] = &[
        ExpenseStatus::Paid,
        ExpenseStatus::PendingApproval,
        ExpenseStatus::Rejected,
    ];

    fn label(self) -> &'static str {
        match self {
            ExpenseStatus::Paid => "Paid",
            ExpenseStatus::PendingApproval => "Pending Approval",
            ExpenseStatus::Rejected => "Rejected",
        }
    }
}

impl ExpenseStatus {
    pub fn tone(self) -> Tone {
        match self {
            ExpenseStatus::Paid => Tone::Success,
            ExpenseStatus::PendingApproval => Tone::Warning,
            ExpenseStatus::Rejected => Tone::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub payee: String,
    pub amount: f64,
    pub status: ExpenseStatus,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Query-string filter shared by the list and export endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct ExpenseFilter {
    /// Category label or "All".
    #[serde(default)]
    pub category: Option<String>,
    /// Status label or "All".
    #[serde(default)]
    pub status: Option<String>,
    /// Inclusive.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Inclusive.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub search: Option<String>,
}

impl ExpenseFilter {
    pub fn matches(&self, e: &Expense) -> bool {
        let category = self
            .category
            .as_deref()
            .and_then(ExpenseCategory::filter_value);
        let status = self.status.as_deref().and_then(ExpenseStatus::filter_value);

        category.is_none_or(|c| e.category == c)
            && status.is_none_or(|s| e.status == s)
            && self.start_date.is_none_or(|d| e.date >= d)
            && self.end_date.is_none_or(|d| e.date <= d)
            && matches_search(
                &[&e.payee, &e.description, e.category.label()],
                self.search.as_deref().unwrap_or_default(),
            )
    }
}

/// Matching expenses, newest first. Equal dates keep store order.
pub fn filter_expenses(expenses: &[Expense], filter: &ExpenseFilter) -> Vec<Expense> {
    let mut rows: Vec<Expense> = expenses
        .iter()
        .filter(|e| filter.matches(e))
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MonthlyTotal {
    pub month: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ExpenseSummary {
    pub total_this_month: f64,
    pub pending_approval_total: f64,
    pub pending_approval_count: usize,
    pub year: i32,
    /// Always twelve entries, Jan..Dec.
    pub monthly: Vec<MonthlyTotal>,
}

/// KPIs over the whole ledger; the monthly chart covers `year`.
pub fn expense_summary(expenses: &[Expense], today: NaiveDate, year: i32) -> ExpenseSummary {
    let mut monthly = [0.0_f64; 12];
    let mut total_this_month = 0.0;
    let mut pending_approval_total = 0.0;
    let mut pending_approval_count = 0;

    for e in expenses {
        if e.date.year() == today.year() && e.date.month() == today.month() {
            total_this_month += e.amount;
        }
        if e.status == ExpenseStatus::PendingApproval {
            pending_approval_total += e.amount;
            pending_approval_count += 1;
        }
        if e.date.year() == year {
            monthly[e.date.month0() as usize] += e.amount;
        }
    }

    ExpenseSummary {
        total_this_month,
        pending_approval_total,
        pending_approval_count,
        year,
        monthly: MONTH_NAMES
            .iter()
            .zip(monthly)
            .map(|(m, total)| MonthlyTotal {
                month: m.to_string(),
                total,
            })
            .collect(),
    }
}

/// Years present in the ledger, newest first, for the chart picker.
pub fn expense_years(expenses: &[Expense]) -> Vec<i32> {
    let mut years: Vec<i32> = expenses.iter().map(|e| e.date.year()).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct LogExpenseRequest {
    /// Defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub category: ExpenseCategory,
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "crate::common::not_blank",
            message = "Please fill all fields with valid data."
        ))
    )]
    pub payee: String,
    #[cfg_attr(
        feature = "validation",
        validate(range(exclusive_min = 0.0, message = "Please fill all fields with valid data."))
    )]
    pub amount: f64,
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "crate::common::not_blank",
            message = "Please fill all fields with valid data."
        ))
    )]
    pub description: String,
    #[serde(default)]
    pub receipt: Option<Attachment>,
}

impl LogExpenseRequest {
    pub fn into_expense(self, id: String, today: NaiveDate) -> Expense {
        Expense {
            id,
            date: self.date.unwrap_or(today),
            category: self.category,
            payee: self.payee.trim().to_string(),
            amount: self.amount,
            status: ExpenseStatus::PendingApproval,
            description: self.description.trim().to_string(),
            receipt: self.receipt.map(|r| r.file_name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    Approve,
    Reject,
    Delete,
}

impl BulkAction {
    pub fn past_tense(self) -> &'static str {
        match self {
            BulkAction::Approve => "approved",
            BulkAction::Reject => "rejected",
            BulkAction::Delete => "deleted",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BulkExpenseRequest {
    pub ids: Vec<String>,
    pub action: BulkAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BulkOutcome {
    pub action: BulkAction,
    /// Records actually changed or removed.
    pub affected: usize,
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

impl Tabular for Expense {
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Date",
        "Category",
        "Payee",
        "Amount",
        "Status",
        "Description",
        "Receipt",
    ];
    const SHEET_NAME: &'static str = "Expenses";
    const FILE_STEM: &'static str = "expenses_log";
    const EMPTY_MESSAGE: &'static str = "No expense data to export.";

    fn cells(&self, format: ExportFormat) -> Vec<Cell> {
        let receipt = match (&self.receipt, format) {
            (Some(r), _) => r.clone(),
            (None, ExportFormat::Csv) => String::new(),
            (None, ExportFormat::Xlsx) => "N/A".to_string(),
        };
        vec![
            Cell::text(&self.id),
            Cell::text(iso_date(self.date)),
            Cell::text(self.category.label()),
            Cell::text(&self.payee),
            Cell::Number(self.amount),
            Cell::text(self.status.label()),
            Cell::text(&self.description),
            Cell::text(receipt),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::to_csv;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn exp(
        id: &str,
        date: NaiveDate,
        category: ExpenseCategory,
        payee: &str,
        amount: f64,
        status: ExpenseStatus,
    ) -> Expense {
        Expense {
            id: id.into(),
            date,
            category,
            payee: payee.into(),
            amount,
            status,
            description: format!("{payee} work"),
            receipt: None,
        }
    }

    fn ledger() -> Vec<Expense> {
        vec![
            exp("e1", date(2024, 7, 28), ExpenseCategory::Maintenance, "Reliable Plumbing Co.", 15000.0, ExpenseStatus::Paid),
            exp("e2", date(2024, 8, 2), ExpenseCategory::Event, "Decorations & Catering", 25000.0, ExpenseStatus::PendingApproval),
            exp("e3", date(2024, 8, 3), ExpenseCategory::Miscellaneous, "Office Supplies Inc.", 3500.0, ExpenseStatus::Paid),
            exp("e4", date(2024, 1, 25), ExpenseCategory::Utilities, "City Power Ltd.", 78000.0, ExpenseStatus::Paid),
        ]
    }

    #[test]
    fn default_filter_sorts_newest_first() {
        let rows = filter_expenses(&ledger(), &ExpenseFilter::default());
        let ids: Vec<&str> = rows.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e3", "e2", "e1", "e4"]);
    }

    #[test]
    fn filter_by_category_status_and_range() {
        let f = ExpenseFilter {
            status: Some("Paid".into()),
            start_date: Some(date(2024, 7, 28)),
            end_date: Some(date(2024, 8, 3)),
            ..Default::default()
        };
        let ids: Vec<String> = filter_expenses(&ledger(), &f).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["e3", "e1"]);

        let f = ExpenseFilter {
            category: Some("Utilities".into()),
            status: Some("All".into()),
            ..Default::default()
        };
        assert_eq!(filter_expenses(&ledger(), &f).len(), 1);
    }

    #[test]
    fn search_matches_payee_description_and_category() {
        let by_category = ExpenseFilter {
            search: Some("  miscell ".into()),
            ..Default::default()
        };
        assert_eq!(filter_expenses(&ledger(), &by_category)[0].id, "e3");

        let by_payee = ExpenseFilter {
            search: Some("power".into()),
            ..Default::default()
        };
        assert_eq!(filter_expenses(&ledger(), &by_payee)[0].id, "e4");
    }

    #[test]
    fn summary_uses_today_for_month_and_year_for_chart() {
        let s = expense_summary(&ledger(), date(2024, 8, 15), 2024);
        assert_eq!(s.total_this_month, 28500.0);
        assert_eq!(s.pending_approval_total, 25000.0);
        assert_eq!(s.pending_approval_count, 1);
        assert_eq!(s.monthly.len(), 12);
        assert_eq!(s.monthly[0].total, 78000.0);
        assert_eq!(s.monthly[6].total, 15000.0);
        assert_eq!(s.monthly[7].total, 28500.0);
        assert_eq!(s.monthly[11].month, "Dec");
    }

    #[test]
    fn new_expense_is_pending_approval() {
        let req = LogExpenseRequest {
            date: None,
            category: ExpenseCategory::Event,
            payee: "  Caterer ".into(),
            amount: 1200.0,
            description: " Snacks ".into(),
            receipt: Some(Attachment::new("bill.pdf", 100)),
        };
        let e = req.into_expense("exp-1".into(), date(2024, 8, 10));
        assert_eq!(e.status, ExpenseStatus::PendingApproval);
        assert_eq!(e.date, date(2024, 8, 10));
        assert_eq!(e.payee, "Caterer");
        assert_eq!(e.receipt.as_deref(), Some("bill.pdf"));
    }

    #[test]
    fn csv_escapes_payee_with_comma() {
        let mut e = ledger().remove(1);
        e.payee = "Decorations, Catering".into();
        e.description = "Stage \"lights\"".into();
        let csv = to_csv(&[e]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "ID,Date,Category,Payee,Amount,Status,Description,Receipt");
        assert_eq!(
            lines[1],
            r#"e2,2024-08-02,Event,"Decorations, Catering",25000,Pending Approval,"Stage ""lights""","#
        );
    }
}
