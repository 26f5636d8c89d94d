use super::models::{LayoutPolicy, LogLevel};

/// Height of the fixed site header; scroll targets land just below it.
pub(crate) fn default_header_offset_px() -> f32 {
    80.0
}

/// Must exceed the smooth-scroll animation, which reports no completion.
pub(crate) fn default_settle_delay_ms() -> u64 {
    1000
}

pub(crate) fn default_layout_policy() -> LayoutPolicy {
    LayoutPolicy::Strict
}

pub(crate) fn default_observer_root_margin() -> String {
    "-20% 0px -60% 0px".to_string()
}

pub(crate) fn default_observer_thresholds() -> Vec<f32> {
    vec![0.0, 0.25, 0.5, 0.75, 1.0]
}

pub(crate) fn default_value_format() -> String {
    "%Y-%m-%d".to_string()
}

pub(crate) fn default_display_format() -> String {
    "%b %-d, %Y".to_string()
}

pub(crate) fn default_slider_breakpoint_px() -> f32 {
    768.0
}

pub(crate) fn default_slider_gap_px() -> f32 {
    20.0
}

pub(crate) fn default_resize_debounce_ms() -> u64 {
    250
}

pub(crate) fn default_log_level() -> LogLevel {
    LogLevel::Info
}
