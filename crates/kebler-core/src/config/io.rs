use super::models::AppConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let tables: ConfigTables =
        toml::from_str(contents).context("failed to parse config tables")?;
    Ok(AppConfig::from(tables).sanitized())
}

pub fn serialize_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(&ConfigTables::from(config)).context("failed to serialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutPolicy, LogLevel};

    #[test]
    fn empty_document_yields_defaults() {
        let config = parse_config("").expect("empty config parses");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn tables_override_individual_fields() {
        let config = parse_config(
            r#"
            [logging]
            log_level = "debug"

            [viewer]
            settle_delay_ms = 1500
            layout_policy = "clamp"

            [slider]
            gap_px = 12.0
            "#,
        )
        .expect("config parses");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.settle_delay_ms, 1500);
        assert_eq!(config.layout_policy, LayoutPolicy::Clamp);
        assert_eq!(config.slider_gap_px, 12.0);
        assert_eq!(config.header_offset_px, 80.0);
    }

    #[test]
    fn unknown_enum_value_is_an_error() {
        assert!(parse_config("[viewer]\nlayout_policy = \"loose\"").is_err());
    }

    #[test]
    fn serialized_tables_parse_back() {
        let config = AppConfig {
            settle_delay_ms: 1200,
            display_format: "%d/%m/%Y".to_string(),
            ..AppConfig::default()
        };
        let text = serialize_config(&config).expect("serialize");
        assert!(text.contains("[viewer]"));
        assert_eq!(parse_config(&text).expect("reparse"), config);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("/nonexistent/kebler/config.toml"));
        assert_eq!(config, AppConfig::default());
    }
}
