//! Date-only arithmetic and field text handling for the booking pickers.
//!
//! All comparisons use `NaiveDate`, so there is no time-of-day or timezone
//! component that could make two picks of the same day compare unequal.

use crate::config::AppConfig;
use chrono::NaiveDate;
use std::fmt::Write;
use tracing::warn;

const FALLBACK_DISPLAY_FORMAT: &str = "%b %-d, %Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormats {
    /// Format of the raw field value the picker writes.
    pub value: String,
    /// Human-readable rendering shown once the picker closes.
    pub display: String,
}

impl DateFormats {
    pub fn from_config(config: &AppConfig) -> Self {
        DateFormats {
            value: config.value_format.clone(),
            display: config.display_format.clone(),
        }
    }
}

impl Default for DateFormats {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

pub fn day_after(date: NaiveDate) -> Option<NaiveDate> {
    date.succ_opt()
}

pub fn day_before(date: NaiveDate) -> Option<NaiveDate> {
    date.pred_opt()
}

/// Parse a field value; blank or malformed text means "no selection".
pub fn parse_field_value(text: &str, format: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, format).ok()
}

pub fn format_display(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_ok() {
        return out;
    }
    warn!(%format, "Unusable display format; using fallback");
    out.clear();
    let _ = write!(out, "{}", date.format(FALLBACK_DISPLAY_FORMAT));
    out
}
