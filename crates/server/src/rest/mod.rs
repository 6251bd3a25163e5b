pub mod account;
pub mod amenities;
pub mod auth;
pub mod complaints;
pub mod dashboard;
pub mod expenses;
pub mod finance;
pub mod notices;
pub mod notifications;
pub mod quotations;
pub mod residents;
pub mod security;
pub mod tenants;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::db::AppState;

/// Build the REST API router with all `/api/...` routes.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Session
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/account/profile", put(account::update_profile))
        .route("/api/account/password", post(account::change_password))
        // Residents & tenants
        .route(
            "/api/residents",
            get(residents::list_residents).post(residents::create_resident),
        )
        .route(
            "/api/residents/{id}",
            put(residents::update_resident).delete(residents::delete_resident),
        )
        .route("/api/tenants", get(residents::list_tenants))
        .route("/api/me/residence", get(tenants::get_residence))
        .route(
            "/api/me/tenant",
            post(tenants::add_tenant)
                .put(tenants::update_tenant)
                .delete(tenants::remove_tenant),
        )
        // Finances
        .route(
            "/api/invoices",
            get(finance::list_invoices).post(finance::generate_invoice),
        )
        .route("/api/invoices/summary", get(finance::invoice_summary))
        .route("/api/invoices/{id}/verify", post(finance::verify_payment))
        .route("/api/invoices/{id}/status", patch(finance::set_invoice_status))
        .route("/api/invoices/{id}/reminder", post(finance::send_reminder))
        .route("/api/payments", get(finance::list_payments))
        .route(
            "/api/maintenance",
            get(finance::get_maintenance).put(finance::update_maintenance),
        )
        .route("/api/me/invoices", get(finance::own_invoices))
        .route("/api/me/invoices/{id}/receipt", get(finance::download_receipt))
        .route("/api/me/payments", post(finance::submit_payment))
        // Expenses
        .route(
            "/api/expenses",
            get(expenses::list_expenses).post(expenses::log_expense),
        )
        .route("/api/expenses/summary", get(expenses::expense_summary))
        .route("/api/expenses/years", get(expenses::expense_years))
        .route("/api/expenses/export", get(expenses::export_expenses))
        .route("/api/expenses/bulk", post(expenses::bulk_expenses))
        .route("/api/expenses/{id}", delete(expenses::delete_expense))
        .route("/api/expenses/{id}/approve", post(expenses::approve_expense))
        .route("/api/expenses/{id}/reject", post(expenses::reject_expense))
        // Quotations
        .route(
            "/api/quotations",
            get(quotations::list_quotations).post(quotations::raise_quotation),
        )
        .route(
            "/api/quotations/{id}/transition",
            post(quotations::transition_quotation),
        )
        // Complaints
        .route("/api/complaints", get(complaints::list_complaints))
        .route("/api/complaints/board", get(complaints::complaint_board))
        .route(
            "/api/complaints/{id}/status",
            patch(complaints::set_complaint_status),
        )
        .route("/api/complaints/{id}/comments", post(complaints::add_comment))
        .route(
            "/api/me/complaints",
            get(complaints::own_complaints).post(complaints::raise_complaint),
        )
        .route(
            "/api/me/complaints/{id}",
            delete(complaints::delete_own_complaint),
        )
        // Amenities
        .route("/api/amenities", get(amenities::list_amenities))
        .route("/api/amenities/{id}/bookings", post(amenities::book_amenity))
        .route("/api/me/bookings", get(amenities::own_bookings))
        .route("/api/me/bookings/{id}", delete(amenities::cancel_booking))
        // Notices & notifications
        .route(
            "/api/notices",
            get(notices::list_notices).post(notices::post_notice),
        )
        .route("/api/notifications", get(notifications::list_notifications))
        .route("/api/notifications/unread", get(notifications::unread_count))
        .route("/api/notifications/read-all", post(notifications::mark_all_read))
        .route("/api/notifications/{id}/read", post(notifications::mark_read))
        // Security
        .route("/api/security/dashboard", get(security::security_dashboard))
        .route(
            "/api/visitors",
            get(security::list_visitors).post(security::add_visitor),
        )
        .route("/api/visitors/export", get(security::export_visitors))
        .route("/api/visitors/qr-exit", post(security::qr_exit))
        .route("/api/visitors/{id}", put(security::update_visitor))
        .route("/api/visitors/{id}/exit", post(security::exit_visitor))
        .route(
            "/api/patrols",
            get(security::list_patrols).post(security::schedule_patrol),
        )
        .route("/api/patrols/{id}/start", post(security::start_patrol))
        .route("/api/patrols/{id}/end", post(security::end_patrol))
        .route(
            "/api/incidents",
            get(security::list_incidents).post(security::report_incident),
        )
        .route(
            "/api/incidents/{id}/status",
            patch(security::set_incident_status),
        )
        .route("/api/vehicles", get(security::list_vehicles))
        .route("/api/vehicles/{id}/exit", post(security::exit_vehicle))
        // Dashboards
        .route("/api/dashboard/staff", get(dashboard::staff_dashboard))
        .route("/api/dashboard/resident", get(dashboard::resident_dashboard))
        .route("/api/poll/vote", post(dashboard::vote))
        .route("/api/committee", get(dashboard::committee))
}
