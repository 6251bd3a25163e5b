use axum::Router;
use shared_types::{
    // Session & account
    AppError, AppErrorKind, ChangePasswordRequest, LoginRequest, MessageResponse, Role,
    UpdateProfileRequest, User, FeatureFlags, Attachment, ExportFormat,
    // Residents & tenants
    Resident, ResidentInput, ResidentStatus, Tenant, TenantDocuments, TenantInput, TenantRow,
    // Finances
    FinanceSummary, GenerateInvoiceRequest, Invoice, InvoiceStatus, MaintenanceConfig, Payment,
    PaymentMethod, SetInvoiceStatusRequest, SubmitPaymentRequest, VerifyAction,
    VerifyPaymentRequest,
    // Expenses
    BulkAction, BulkExpenseRequest, BulkOutcome, Expense, ExpenseCategory, ExpenseStatus,
    ExpenseSummary, LogExpenseRequest, MonthlyTotal,
    // Quotations
    QuotationAction, QuotationRequest, QuotationStatus, QuotationTransitionRequest,
    RaiseQuotationRequest,
    // Complaints
    Complaint, ComplaintColumn, ComplaintCommentRequest, ComplaintPriority, ComplaintStatus,
    RaiseComplaintRequest, SetComplaintStatusRequest,
    // Amenities
    Amenity, BookAmenityRequest, Booking, BookingSplit,
    // Notices & notifications
    Audience, Notice, NoticeCategory, Notification, PostNoticeRequest, ReadFilter,
    // Security
    Incident, IncidentSeverity, IncidentStatus, OwnerType, Patrol, PatrolStatus, PresenceStatus,
    ReportIncidentRequest, SchedulePatrolRequest, SecurityDashboard, SetIncidentStatusRequest,
    Vehicle, Visitor, VisitorInput,
    // Dashboards
    CommitteeMember, Kpi, Poll, PollOption, QuickAction, ResidentDashboard, StaffDashboard,
    StatusCount, Tone, VoteRequest,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::AppState;
use crate::health;
use crate::rest;
use crate::rest::notifications::{MarkAllReadResponse, UnreadCountResponse};

/// OpenAPI documentation for the API.
#[derive(OpenApi)]
#[openapi(
    paths(
        // Session & account
        rest::auth::login,
        rest::auth::logout,
        rest::auth::me,
        rest::account::update_profile,
        rest::account::change_password,
        // Residents & tenants
        rest::residents::list_residents,
        rest::residents::create_resident,
        rest::residents::update_resident,
        rest::residents::delete_resident,
        rest::residents::list_tenants,
        rest::tenants::get_residence,
        rest::tenants::add_tenant,
        rest::tenants::update_tenant,
        rest::tenants::remove_tenant,
        // Finances
        rest::finance::list_invoices,
        rest::finance::invoice_summary,
        rest::finance::generate_invoice,
        rest::finance::verify_payment,
        rest::finance::set_invoice_status,
        rest::finance::send_reminder,
        rest::finance::list_payments,
        rest::finance::get_maintenance,
        rest::finance::update_maintenance,
        rest::finance::own_invoices,
        rest::finance::submit_payment,
        rest::finance::download_receipt,
        // Expenses
        rest::expenses::list_expenses,
        rest::expenses::expense_summary,
        rest::expenses::expense_years,
        rest::expenses::log_expense,
        rest::expenses::approve_expense,
        rest::expenses::reject_expense,
        rest::expenses::delete_expense,
        rest::expenses::bulk_expenses,
        rest::expenses::export_expenses,
        // Quotations
        rest::quotations::list_quotations,
        rest::quotations::raise_quotation,
        rest::quotations::transition_quotation,
        // Complaints
        rest::complaints::list_complaints,
        rest::complaints::complaint_board,
        rest::complaints::set_complaint_status,
        rest::complaints::add_comment,
        rest::complaints::own_complaints,
        rest::complaints::raise_complaint,
        rest::complaints::delete_own_complaint,
        // Amenities
        rest::amenities::list_amenities,
        rest::amenities::book_amenity,
        rest::amenities::own_bookings,
        rest::amenities::cancel_booking,
        // Notices & notifications
        rest::notices::list_notices,
        rest::notices::post_notice,
        rest::notifications::list_notifications,
        rest::notifications::unread_count,
        rest::notifications::mark_read,
        rest::notifications::mark_all_read,
        // Security
        rest::security::security_dashboard,
        rest::security::list_visitors,
        rest::security::add_visitor,
        rest::security::update_visitor,
        rest::security::exit_visitor,
        rest::security::qr_exit,
        rest::security::export_visitors,
        rest::security::list_patrols,
        rest::security::schedule_patrol,
        rest::security::start_patrol,
        rest::security::end_patrol,
        rest::security::list_incidents,
        rest::security::report_incident,
        rest::security::set_incident_status,
        rest::security::list_vehicles,
        rest::security::exit_vehicle,
        // Dashboards
        rest::dashboard::staff_dashboard,
        rest::dashboard::resident_dashboard,
        rest::dashboard::vote,
        rest::dashboard::committee,
        // Health
        health::health_check,
        health::get_features,
    ),
    components(schemas(
        AppError, AppErrorKind, ChangePasswordRequest, LoginRequest, MessageResponse, Role,
        UpdateProfileRequest, User, FeatureFlags, Attachment, ExportFormat,
        Resident, ResidentInput, ResidentStatus, Tenant, TenantDocuments, TenantInput, TenantRow,
        FinanceSummary, GenerateInvoiceRequest, Invoice, InvoiceStatus, MaintenanceConfig,
        Payment, PaymentMethod, SetInvoiceStatusRequest, SubmitPaymentRequest, VerifyAction,
        VerifyPaymentRequest,
        BulkAction, BulkExpenseRequest, BulkOutcome, Expense, ExpenseCategory, ExpenseStatus,
        ExpenseSummary, LogExpenseRequest, MonthlyTotal,
        QuotationAction, QuotationRequest, QuotationStatus, QuotationTransitionRequest,
        RaiseQuotationRequest,
        Complaint, ComplaintColumn, ComplaintCommentRequest, ComplaintPriority, ComplaintStatus,
        RaiseComplaintRequest, SetComplaintStatusRequest,
        Amenity, BookAmenityRequest, Booking, BookingSplit,
        Audience, Notice, NoticeCategory, Notification, PostNoticeRequest, ReadFilter,
        UnreadCountResponse, MarkAllReadResponse,
        Incident, IncidentSeverity, IncidentStatus, OwnerType, Patrol, PatrolStatus,
        PresenceStatus, ReportIncidentRequest, SchedulePatrolRequest, SecurityDashboard,
        SetIncidentStatusRequest, Vehicle, Visitor, VisitorInput,
        CommitteeMember, Kpi, Poll, PollOption, QuickAction, ResidentDashboard, StaffDashboard,
        StatusCount, Tone, VoteRequest,
        health::HealthResponse, health::SocietySnapshot,
    )),
    tags(
        (name = "auth", description = "Sign in, sign out and the current session"),
        (name = "account", description = "Profile and password"),
        (name = "residents", description = "Resident directory and tenant overview"),
        (name = "tenants", description = "A resident's own tenant records"),
        (name = "finance", description = "Invoices, payments and maintenance settings"),
        (name = "expenses", description = "Society expense log"),
        (name = "quotations", description = "Quotation approval workflow"),
        (name = "complaints", description = "Resident complaints"),
        (name = "amenities", description = "Amenity booking"),
        (name = "notices", description = "Notice board"),
        (name = "notifications", description = "Role notifications"),
        (name = "security", description = "Visitors, patrols, incidents and vehicles"),
        (name = "dashboard", description = "Dashboards, poll and committee"),
        (name = "health", description = "Liveness and optional features")
    ),
    info(
        title = "AuraLiva API",
        description = "Society management dashboard API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build an Axum router that serves the REST API at `/api/*`, `/health`,
/// and the API reference at `/docs` when `api_docs` is enabled.
pub fn api_router(state: AppState) -> Router {
    let router = Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check))
        .route("/api/features", axum::routing::get(health::get_features))
        .with_state(state);

    if crate::config::feature_flags().api_docs {
        router.merge(Scalar::with_url("/docs", ApiDoc::openapi()))
    } else {
        router
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_lists_every_tagged_route() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "AuraLiva API");
        for path in [
            "/api/auth/login",
            "/api/expenses/export",
            "/api/quotations/{id}/transition",
            "/api/visitors/qr-exit",
            "/api/me/invoices/{id}/receipt",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
