//! Table exports. CSV is rendered here; XLSX rendering lives server-side.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::iso_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// Button text for the download link.
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "Export CSV",
            ExportFormat::Xlsx => "Export XLSX",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

/// One spreadsheet cell. Numbers stay numeric in XLSX.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
        }
    }
}

/// A record type that can be exported as a table.
pub trait Tabular {
    const HEADERS: &'static [&'static str];
    const SHEET_NAME: &'static str;
    const FILE_STEM: &'static str;
    /// Error shown when there is nothing to export.
    const EMPTY_MESSAGE: &'static str;

    fn cells(&self, format: ExportFormat) -> Vec<Cell>;
}

/// Quote a field when it contains a comma, quote or newline.
pub fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Header line plus one line per row, in order, joined by `\n`.
pub fn to_csv<T: Tabular>(rows: &[T]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(T::HEADERS.join(","));
    for row in rows {
        let line: Vec<String> = row
            .cells(ExportFormat::Csv)
            .iter()
            .map(|c| csv_escape(&c.render()))
            .collect();
        lines.push(line.join(","));
    }
    lines.join("\n")
}

/// e.g. `expenses_log_2024-08-03.csv`
pub fn export_file_name<T: Tabular>(format: ExportFormat, on: NaiveDate) -> String {
    format!("{}_{}.{}", T::FILE_STEM, iso_date(on), format.extension())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct ExportParams {
    #[serde(default)]
    pub format: ExportFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, f64);

    impl Tabular for Row {
        const HEADERS: &'static [&'static str] = &["Name", "Amount"];
        const SHEET_NAME: &'static str = "Rows";
        const FILE_STEM: &'static str = "rows";
        const EMPTY_MESSAGE: &'static str = "No rows.";

        fn cells(&self, _format: ExportFormat) -> Vec<Cell> {
            vec![Cell::text(self.0), Cell::Number(self.1)]
        }
    }

    #[test]
    fn escape_rules() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn one_line_per_row_in_order() {
        let csv = to_csv(&[Row("b", 2.0), Row("a", 1.5)]);
        assert_eq!(csv, "Name,Amount\nb,2\na,1.5");
    }

    #[test]
    fn empty_rows_render_header_only() {
        assert_eq!(to_csv::<Row>(&[]), "Name,Amount");
    }

    #[test]
    fn file_name_uses_stem_date_and_extension() {
        let d = NaiveDate::from_ymd_opt(2024, 8, 3).unwrap();
        assert_eq!(export_file_name::<Row>(ExportFormat::Xlsx, d), "rows_2024-08-03.xlsx");
    }

    #[test]
    fn format_parses_lowercase() {
        let p: ExportParams = serde_json::from_str(r#"{"format":"xlsx"}"#).unwrap();
        assert_eq!(p.format, ExportFormat::Xlsx);
        let p: ExportParams = serde_json::from_str("{}").unwrap();
        assert_eq!(p.format, ExportFormat::Csv);
    }
}
