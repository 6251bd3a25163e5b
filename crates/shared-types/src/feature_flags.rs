use serde::{Deserialize, Serialize};

use crate::ExportFormat;

/// Optional AuraLiva features, read from the `[features]` table of
/// `config.toml`. Anything the file leaves out stays off.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FeatureFlags {
    /// Ship traces and logs to an OTLP collector.
    #[serde(default)]
    pub telemetry: bool,
    /// Expense and visitor logs can also be downloaded as spreadsheets.
    #[serde(default)]
    pub xlsx_export: bool,
    /// Mount the OpenAPI reference at `/docs`.
    #[serde(default)]
    pub api_docs: bool,
}

impl FeatureFlags {
    pub fn allows(&self, format: ExportFormat) -> bool {
        match format {
            ExportFormat::Csv => true,
            ExportFormat::Xlsx => self.xlsx_export,
        }
    }

    /// Download formats to offer next to a log, CSV first.
    pub fn export_formats(&self) -> Vec<ExportFormat> {
        [ExportFormat::Csv, ExportFormat::Xlsx]
            .into_iter()
            .filter(|f| self.allows(*f))
            .collect()
    }
}

/// Shape of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> FeatureFlags {
        toml::from_str::<AppConfig>(toml_src).unwrap().features
    }

    #[test]
    fn missing_table_leaves_everything_off() {
        assert_eq!(parse(""), FeatureFlags::default());
        assert_eq!(parse("[features]"), FeatureFlags::default());
    }

    #[test]
    fn only_named_flags_turn_on() {
        let flags = parse("[features]\nxlsx_export = true\n");
        assert!(flags.xlsx_export);
        assert!(!flags.telemetry && !flags.api_docs);
    }

    #[test]
    fn csv_is_always_offered() {
        let off = FeatureFlags::default();
        assert_eq!(off.export_formats(), vec![ExportFormat::Csv]);
        assert!(!off.allows(ExportFormat::Xlsx));

        let on = parse("[features]\nxlsx_export = true\napi_docs = true\n");
        assert_eq!(on.export_formats(), vec![ExportFormat::Csv, ExportFormat::Xlsx]);
    }

    #[test]
    fn client_payload_tolerates_missing_fields() {
        let flags: FeatureFlags = serde_json::from_str(r#"{"api_docs":true}"#).unwrap();
        assert!(flags.api_docs);
        assert!(!flags.xlsx_export);
    }
}
