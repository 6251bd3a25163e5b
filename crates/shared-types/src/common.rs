use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::AppError;

/// Sentinel used by filter dropdowns for "no restriction".
pub const ALL_FILTER: &str = "All";

/// Enums with a fixed, human-readable label per variant.
///
/// The label doubles as the serde representation and as the value stored in
/// `<select>` options, so `from_label(x.label()) == Some(x)` always holds.
pub trait Labeled: Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.label() == s.trim())
    }

    /// Parse a dropdown value where `"All"` (or empty) means no filter.
    fn filter_value(s: &str) -> Option<Self> {
        match s.trim() {
            "" | ALL_FILTER => None,
            other => Self::from_label(other),
        }
    }
}

/// Colour family for status badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Warning,
    Error,
    Info,
    Neutral,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Error => "error",
            Tone::Info => "info",
            Tone::Neutral => "neutral",
        }
    }
}

/// Case-insensitive substring match. An empty needle matches everything.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// True when any field contains the (trimmed) query, ignoring case.
pub fn matches_search(fields: &[&str], query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || fields.iter().any(|f| contains_ci(f, query))
}

/// Fresh record id such as `res-3f9a1c2b`.
pub fn new_id(prefix: &str) -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &raw[..8])
}

/// Wall-clock time as shown in logs, e.g. `02:30 PM`.
pub fn clock_time(t: NaiveTime) -> String {
    t.format("%I:%M %p").to_string()
}

pub fn iso_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Rupee amount with Indian digit grouping: `₹1,20,000`.
pub fn format_inr(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut parts: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            parts.push(&head[end - 2..end]);
            end -= 2;
        }
        parts.push(&head[..end]);
        parts.reverse();
        format!("{},{}", parts.join(","), tail)
    };
    if negative {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

/// Upper bound for receipts, screenshots and tenant documents.
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

/// An uploaded file as declared by the client. Only the name is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Attachment {
    pub file_name: String,
    #[serde(default)]
    pub size_bytes: u64,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
        }
    }

    /// Accepts PDF, JPG and PNG up to [`MAX_ATTACHMENT_BYTES`].
    pub fn check(&self, field: &str) -> Result<(), AppError> {
        let ext = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(AppError::field(
                field,
                "Invalid file type. Please upload a PDF, JPG, or PNG.",
            ));
        }
        if self.size_bytes > MAX_ATTACHMENT_BYTES {
            return Err(AppError::field(
                field,
                "File is too large. Maximum size is 5MB.",
            ));
        }
        Ok(())
    }
}

/// validator hook: rejects empty and whitespace-only strings.
#[cfg(feature = "validation")]
pub fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inr_grouping() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(250.0), "₹250");
        assert_eq!(format_inr(5000.0), "₹5,000");
        assert_eq!(format_inr(120000.0), "₹1,20,000");
        assert_eq!(format_inr(12345678.0), "₹1,23,45,678");
    }

    #[test]
    fn search_is_trimmed_and_case_insensitive() {
        assert!(matches_search(&["City Power Ltd."], "  power "));
        assert!(matches_search(&["a", "b"], ""));
        assert!(!matches_search(&["Garden Services"], "lift"));
    }

    #[test]
    fn new_id_has_prefix() {
        let id = new_id("res");
        assert!(id.starts_with("res-"));
        assert_eq!(id.len(), "res-".len() + 8);
        assert_ne!(new_id("res"), new_id("res"));
    }

    #[test]
    fn clock_time_is_twelve_hour() {
        let t = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        assert_eq!(clock_time(t), "02:30 PM");
    }

    #[test]
    fn attachment_rules() {
        assert!(Attachment::new("bill.PDF", 1024).check("receipt").is_ok());
        assert!(Attachment::new("photo.jpeg", MAX_ATTACHMENT_BYTES)
            .check("receipt")
            .is_ok());

        let err = Attachment::new("notes.txt", 10).check("receipt").unwrap_err();
        assert_eq!(
            err.message,
            "Invalid file type. Please upload a PDF, JPG, or PNG."
        );

        let err = Attachment::new("scan.png", MAX_ATTACHMENT_BYTES + 1)
            .check("receipt")
            .unwrap_err();
        assert_eq!(err.message, "File is too large. Maximum size is 5MB.");
        assert!(err.field_errors.contains_key("receipt"));
    }
}
