use dioxus::prelude::*;
use shared_types::AppError;
use shared_ui::{ToastExt, Toasts};
use std::collections::HashMap;

/// Per-field messages from the last failed submit, keyed by field name.
pub type FieldErrors = Signal<HashMap<String, String>>;

/// Show a failed server call: field messages go under their inputs and the
/// summary goes to a toast.
pub fn report_error(toast: Toasts, mut errors: FieldErrors, e: &ServerFnError) {
    errors.set(AppError::parse_field_errors(&e.to_string()));
    toast.server_error(e);
}

pub fn field_error(errors: FieldErrors, field: &str) -> Option<String> {
    errors.read().get(field).cloned()
}

/// Optional text input: blank means "not given".
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parse an amount field; blank or garbage reads as zero so server-side
/// validation reports it.
pub fn parse_amount(value: &str) -> f64 {
    value.trim().parse().unwrap_or(0.0)
}

/// Parse an `<input type="date">` value.
pub fn parse_date(value: &str) -> Option<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
