use shared_types::{AppConfig, FeatureFlags};
use std::sync::OnceLock;

static FLAGS: OnceLock<FeatureFlags> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Parse `config.toml` contents. Malformed files leave every flag off.
pub fn parse_feature_flags(contents: &str) -> FeatureFlags {
    match toml::from_str::<AppConfig>(contents) {
        Ok(config) => config.features,
        Err(e) => {
            tracing::warn!(path = CONFIG_PATH, error = %e, "Failed to parse config, defaulting all flags off");
            FeatureFlags::default()
        }
    }
}

/// Load `.env`, then read `config.toml` and store the flags in the global
/// `OnceLock`. Only the first call has effect.
pub fn load_feature_flags() {
    FLAGS.get_or_init(|| {
        let _ = dotenvy::dotenv();
        let flags = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => parse_feature_flags(&contents),
            Err(e) => {
                tracing::warn!(path = CONFIG_PATH, error = %e, "Config not found, defaulting all flags off");
                FeatureFlags::default()
            }
        };
        tracing::info!(?flags, "Feature flags loaded");
        flags
    });
}

/// Get the loaded feature flags. Returns all-false defaults if
/// `load_feature_flags()` hasn't been called yet.
pub fn feature_flags() -> &'static FeatureFlags {
    static DEFAULT: FeatureFlags = FeatureFlags {
        telemetry: false,
        xlsx_export: false,
        api_docs: false,
    };
    FLAGS.get().unwrap_or(&DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_config_turns_everything_off() {
        assert_eq!(parse_feature_flags("[features"), FeatureFlags::default());
    }

    #[test]
    fn flags_read_from_features_table() {
        let flags = parse_feature_flags("[features]\nxlsx_export = true\n");
        assert!(flags.xlsx_export);
        assert!(!flags.api_docs);
    }
}
