//! Links to the REST download endpoints. Downloads bypass server functions so
//! the browser can save the response body directly.

use shared_types::{iso_date, ExpenseFilter, ExportFormat, VisitorFilter};

fn href(base: &str, pairs: &[(&str, String)]) -> String {
    let query: Vec<String> = pairs
        .iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v.trim())))
        .collect();
    if query.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{}", query.join("&"))
    }
}

pub fn expense_export(format: ExportFormat, filter: &ExpenseFilter) -> String {
    href(
        "/api/expenses/export",
        &[
            ("format", format.extension().to_string()),
            ("category", filter.category.clone().unwrap_or_default()),
            ("status", filter.status.clone().unwrap_or_default()),
            ("start_date", filter.start_date.map(iso_date).unwrap_or_default()),
            ("end_date", filter.end_date.map(iso_date).unwrap_or_default()),
            ("search", filter.search.clone().unwrap_or_default()),
        ],
    )
}

pub fn visitor_export(format: ExportFormat, filter: &VisitorFilter) -> String {
    href(
        "/api/visitors/export",
        &[
            ("format", format.extension().to_string()),
            ("history", filter.history.to_string()),
            ("search", filter.search.clone().unwrap_or_default()),
        ],
    )
}

pub fn invoice_receipt(invoice_id: &str) -> String {
    format!("/api/me/invoices/{}/receipt", urlencoding::encode(invoice_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_filters_are_left_out() {
        assert_eq!(
            expense_export(ExportFormat::Csv, &ExpenseFilter::default()),
            "/api/expenses/export?format=csv"
        );
    }

    #[test]
    fn filter_values_are_encoded() {
        let filter = ExpenseFilter {
            category: Some("Staff Salary".into()),
            start_date: NaiveDate::from_ymd_opt(2024, 7, 1),
            search: Some(" power & co ".into()),
            ..Default::default()
        };
        assert_eq!(
            expense_export(ExportFormat::Xlsx, &filter),
            "/api/expenses/export?format=xlsx&category=Staff%20Salary&start_date=2024-07-01&search=power%20%26%20co"
        );
    }

    #[test]
    fn visitor_export_carries_history_flag() {
        let filter = VisitorFilter {
            history: true,
            search: None,
        };
        assert_eq!(
            visitor_export(ExportFormat::Csv, &filter),
            "/api/visitors/export?format=csv&history=true"
        );
    }
}
