use super::defaults;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Flattened runtime configuration; built from the TOML tables in `tables.rs`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_header_offset_px")]
    pub header_offset_px: f32,
    #[serde(default = "crate::config::defaults::default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "crate::config::defaults::default_layout_policy")]
    pub layout_policy: LayoutPolicy,
    #[serde(default = "crate::config::defaults::default_observer_root_margin")]
    pub observer_root_margin: String,
    #[serde(default = "crate::config::defaults::default_observer_thresholds")]
    pub observer_thresholds: Vec<f32>,
    #[serde(default = "crate::config::defaults::default_value_format")]
    pub value_format: String,
    #[serde(default = "crate::config::defaults::default_display_format")]
    pub display_format: String,
    #[serde(default = "crate::config::defaults::default_slider_breakpoint_px")]
    pub slider_breakpoint_px: f32,
    #[serde(default = "crate::config::defaults::default_slider_gap_px")]
    pub slider_gap_px: f32,
    #[serde(default = "crate::config::defaults::default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: defaults::default_log_level(),
            header_offset_px: defaults::default_header_offset_px(),
            settle_delay_ms: defaults::default_settle_delay_ms(),
            layout_policy: defaults::default_layout_policy(),
            observer_root_margin: defaults::default_observer_root_margin(),
            observer_thresholds: defaults::default_observer_thresholds(),
            value_format: defaults::default_value_format(),
            display_format: defaults::default_display_format(),
            slider_breakpoint_px: defaults::default_slider_breakpoint_px(),
            slider_gap_px: defaults::default_slider_gap_px(),
            resize_debounce_ms: defaults::default_resize_debounce_ms(),
        }
    }
}

impl AppConfig {
    /// Pull out-of-range values back to something the widgets can use.
    pub fn sanitized(mut self) -> Self {
        if !self.header_offset_px.is_finite() || self.header_offset_px < 0.0 {
            warn!(
                value = self.header_offset_px,
                "Invalid header offset; using default"
            );
            self.header_offset_px = defaults::default_header_offset_px();
        }
        if self.settle_delay_ms == 0 {
            warn!("Settle delay of 0ms would race the scroll animation; using default");
            self.settle_delay_ms = defaults::default_settle_delay_ms();
        }

        self.observer_thresholds
            .retain(|t| t.is_finite() && (0.0..=1.0).contains(t));
        self.observer_thresholds.sort_by(f32::total_cmp);
        self.observer_thresholds.dedup();
        if self.observer_thresholds.is_empty() {
            warn!("No usable observer thresholds; using defaults");
            self.observer_thresholds = defaults::default_observer_thresholds();
        }

        if self.value_format.trim().is_empty() {
            self.value_format = defaults::default_value_format();
        }
        if self.display_format.trim().is_empty() {
            self.display_format = defaults::default_display_format();
        }
        if !self.slider_breakpoint_px.is_finite() || self.slider_breakpoint_px <= 0.0 {
            self.slider_breakpoint_px = defaults::default_slider_breakpoint_px();
        }
        if !self.slider_gap_px.is_finite() || self.slider_gap_px < 0.0 {
            self.slider_gap_px = defaults::default_slider_gap_px();
        }
        self
    }
}

/// How the section viewer treats menu/section/dot lists of different lengths.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPolicy {
    /// Reject layouts where a list length would hide content.
    Strict,
    /// Navigate over the shortest list and log the mismatch.
    Clamp,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        LayoutPolicy::Strict
    }
}

impl std::fmt::Display for LayoutPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LayoutPolicy::Strict => "strict",
            LayoutPolicy::Clamp => "clamp",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_restores_unusable_timing_and_offsets() {
        let config = AppConfig {
            header_offset_px: f32::NAN,
            settle_delay_ms: 0,
            observer_thresholds: vec![1.5, -0.2],
            ..AppConfig::default()
        }
        .sanitized();

        assert_eq!(config.header_offset_px, 80.0);
        assert_eq!(config.settle_delay_ms, 1000);
        assert_eq!(config.observer_thresholds, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn sanitize_sorts_and_dedups_thresholds() {
        let config = AppConfig {
            observer_thresholds: vec![0.5, 0.1, 0.5, 2.0],
            ..AppConfig::default()
        }
        .sanitized();

        assert_eq!(config.observer_thresholds, vec![0.1, 0.5]);
    }
}
