//! File downloads: table exports and the printable payment receipt.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use shared_types::{
    export_file_name, format_inr, to_csv, AppError, Cell, ExportFormat, FeatureFlags, Invoice,
    Tabular,
};

/// A rendered file ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl IntoResponse for Download {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.file_name);
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, self.content_type.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.bytes,
        )
            .into_response()
    }
}

fn xlsx_error(e: XlsxError) -> AppError {
    tracing::error!(error = %e, "XLSX rendering failed");
    AppError::internal("Failed to build the spreadsheet")
}

/// XLSX downloads are only offered when the `xlsx_export` flag is on.
pub fn check_format(format: ExportFormat, flags: &FeatureFlags) -> Result<(), AppError> {
    if flags.allows(format) {
        Ok(())
    } else {
        Err(AppError::bad_request("XLSX export is not enabled"))
    }
}

/// Render `rows` in the given format. An empty table is an error carrying
/// the table's own message.
pub fn render<T: Tabular>(rows: &[T], format: ExportFormat, on: NaiveDate) -> Result<Download, AppError> {
    if rows.is_empty() {
        return Err(AppError::bad_request(T::EMPTY_MESSAGE));
    }
    let bytes = match format {
        ExportFormat::Csv => to_csv(rows).into_bytes(),
        ExportFormat::Xlsx => to_xlsx(rows).map_err(xlsx_error)?,
    };
    tracing::info!(file = T::FILE_STEM, rows = rows.len(), ?format, "Export rendered");
    Ok(Download {
        file_name: export_file_name::<T>(format, on),
        content_type: format.content_type(),
        bytes,
    })
}

/// One sheet named after the table, bold header row, one row per record.
pub fn to_xlsx<T: Tabular>(rows: &[T]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(T::SHEET_NAME)?;

    for (col, title) in T::HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &bold)?;
    }
    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.cells(ExportFormat::Xlsx).into_iter().enumerate() {
            match cell {
                Cell::Text(s) => sheet.write_string(r, col as u16, s)?,
                Cell::Number(n) => sheet.write_number(r, col as u16, n)?,
            };
        }
    }
    sheet.autofit();
    workbook.save_to_buffer()
}

// ---------------------------------------------------------------------------
// Receipt
// ---------------------------------------------------------------------------

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Standalone printable receipt for a paid invoice.
pub fn receipt_html(invoice: &Invoice) -> String {
    let number = escape_html(&invoice.invoice_number);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Receipt {number}</title>
<style>
body {{ font-family: sans-serif; max-width: 640px; margin: 2rem auto; color: #1f2937; }}
h1 {{ color: #0f766e; }}
table {{ width: 100%; border-collapse: collapse; }}
td {{ padding: .5rem; border-bottom: 1px solid #e5e7eb; }}
td:last-child {{ text-align: right; }}
.stamp {{ margin-top: 2rem; font-size: 2rem; font-weight: bold; color: #16a34a; }}
</style>
</head>
<body onload="window.print()">
<h1>AuraLiva Society</h1>
<h2>Payment Receipt</h2>
<table>
<tr><td>Invoice Number</td><td>{number}</td></tr>
<tr><td>Resident</td><td>{resident}</td></tr>
<tr><td>Due Date</td><td>{due}</td></tr>
<tr><td>Amount</td><td>{amount}</td></tr>
<tr><td>Late Fee</td><td>{fine}</td></tr>
<tr><td><strong>Total Paid</strong></td><td><strong>{total}</strong></td></tr>
</table>
<div class="stamp">PAID</div>
</body>
</html>
"#,
        resident = escape_html(&invoice.resident_name),
        due = invoice.due_date.format("%d %b %Y"),
        amount = format_inr(invoice.amount),
        fine = format_inr(invoice.fine_amount()),
        total = format_inr(invoice.total()),
    )
}

/// Receipt as a download named after the invoice.
pub fn receipt_download(invoice: &Invoice) -> Download {
    Download {
        file_name: format!("receipt_{}.html", invoice.invoice_number),
        content_type: "text/html; charset=utf-8",
        bytes: receipt_html(invoice).into_bytes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Expense, ExpenseCategory, ExpenseStatus, InvoiceStatus, Visitor};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 3).unwrap()
    }

    fn expense(id: &str, description: &str) -> Expense {
        Expense {
            id: id.into(),
            date: date(),
            category: ExpenseCategory::Utilities,
            payee: "City Power Ltd.".into(),
            amount: 85000.0,
            status: ExpenseStatus::Paid,
            description: description.into(),
            receipt: None,
        }
    }

    #[test]
    fn empty_table_uses_its_message() {
        let err = render::<Expense>(&[], ExportFormat::Csv, date()).unwrap_err();
        assert_eq!(err.message, "No expense data to export.");
        let err = render::<Visitor>(&[], ExportFormat::Xlsx, date()).unwrap_err();
        assert_eq!(err.message, "No data to export.");
    }

    #[test]
    fn xlsx_needs_its_flag() {
        let off = FeatureFlags::default();
        let on = FeatureFlags {
            xlsx_export: true,
            ..FeatureFlags::default()
        };
        assert!(check_format(ExportFormat::Csv, &off).is_ok());
        assert!(check_format(ExportFormat::Xlsx, &off).is_err());
        assert!(check_format(ExportFormat::Xlsx, &on).is_ok());
    }

    #[test]
    fn csv_has_header_plus_row_per_record() {
        let rows = vec![expense("exp-1", "Bill, July"), expense("exp-2", "Bill")];
        let d = render(&rows, ExportFormat::Csv, date()).unwrap();
        assert_eq!(d.file_name, "expenses_log_2024-08-03.csv");
        let text = String::from_utf8(d.bytes).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("\"Bill, July\""));
    }

    #[test]
    fn xlsx_is_a_zip_container() {
        let d = render(&[expense("exp-1", "Bill")], ExportFormat::Xlsx, date()).unwrap();
        assert_eq!(d.file_name, "expenses_log_2024-08-03.xlsx");
        assert!(d.bytes.starts_with(b"PK"));
    }

    #[test]
    fn receipt_shows_total_and_escapes_names() {
        let invoice = Invoice {
            id: "inv-3".into(),
            invoice_number: "INV003".into(),
            resident_name: "Diana <Miller>".into(),
            amount: 5000.0,
            due_date: NaiveDate::from_ymd_opt(2024, 7, 10).unwrap(),
            status: InvoiceStatus::Paid,
            payment_screenshot: None,
            fine: Some(250.0),
        };
        let html = receipt_html(&invoice);
        assert!(html.contains("Diana &lt;Miller&gt;"));
        assert!(html.contains(&format_inr(5250.0)));
        assert!(html.contains("PAID"));
        assert_eq!(receipt_download(&invoice).file_name, "receipt_INV003.html");
    }
}
