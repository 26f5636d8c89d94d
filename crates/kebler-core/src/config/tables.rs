use super::defaults;
use super::models::{AppConfig, LayoutPolicy, LogLevel};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    viewer: ViewerConfig,
    #[serde(default)]
    dates: DatesConfig,
    #[serde(default)]
    slider: SliderConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            log_level: tables.logging.log_level,
            header_offset_px: tables.viewer.header_offset_px,
            settle_delay_ms: tables.viewer.settle_delay_ms,
            layout_policy: tables.viewer.layout_policy,
            observer_root_margin: tables.viewer.observer_root_margin,
            observer_thresholds: tables.viewer.observer_thresholds,
            value_format: tables.dates.value_format,
            display_format: tables.dates.display_format,
            slider_breakpoint_px: tables.slider.breakpoint_px,
            slider_gap_px: tables.slider.gap_px,
            resize_debounce_ms: tables.slider.resize_debounce_ms,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            viewer: ViewerConfig {
                header_offset_px: config.header_offset_px,
                settle_delay_ms: config.settle_delay_ms,
                layout_policy: config.layout_policy,
                observer_root_margin: config.observer_root_margin.clone(),
                observer_thresholds: config.observer_thresholds.clone(),
            },
            dates: DatesConfig {
                value_format: config.value_format.clone(),
                display_format: config.display_format.clone(),
            },
            slider: SliderConfig {
                breakpoint_px: config.slider_breakpoint_px,
                gap_px: config.slider_gap_px,
                resize_debounce_ms: config.resize_debounce_ms,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ViewerConfig {
    #[serde(default = "defaults::default_header_offset_px")]
    header_offset_px: f32,
    #[serde(default = "defaults::default_settle_delay_ms")]
    settle_delay_ms: u64,
    #[serde(default = "defaults::default_layout_policy")]
    layout_policy: LayoutPolicy,
    #[serde(default = "defaults::default_observer_root_margin")]
    observer_root_margin: String,
    #[serde(default = "defaults::default_observer_thresholds")]
    observer_thresholds: Vec<f32>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            header_offset_px: defaults::default_header_offset_px(),
            settle_delay_ms: defaults::default_settle_delay_ms(),
            layout_policy: defaults::default_layout_policy(),
            observer_root_margin: defaults::default_observer_root_margin(),
            observer_thresholds: defaults::default_observer_thresholds(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct DatesConfig {
    #[serde(default = "defaults::default_value_format")]
    value_format: String,
    #[serde(default = "defaults::default_display_format")]
    display_format: String,
}

impl Default for DatesConfig {
    fn default() -> Self {
        DatesConfig {
            value_format: defaults::default_value_format(),
            display_format: defaults::default_display_format(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct SliderConfig {
    #[serde(default = "defaults::default_slider_breakpoint_px")]
    breakpoint_px: f32,
    #[serde(default = "defaults::default_slider_gap_px")]
    gap_px: f32,
    #[serde(default = "defaults::default_resize_debounce_ms")]
    resize_debounce_ms: u64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        SliderConfig {
            breakpoint_px: defaults::default_slider_breakpoint_px(),
            gap_px: defaults::default_slider_gap_px(),
            resize_debounce_ms: defaults::default_resize_debounce_ms(),
        }
    }
}
