//! Capability traits the components drive instead of touching a document.
//!
//! A browser binding implements these over real elements; the headless
//! document in [`crate::document`] implements them in memory for the replay
//! driver and the tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use ts_rs::TS;

/// Which button of a prev/next pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PagingButton {
    Previous,
    Next,
}

/// Per-element affordance mutation for the section viewer.
pub trait SectionSurface {
    fn set_menu_entry_active(&mut self, index: usize, active: bool);
    fn set_dot_active(&mut self, index: usize, active: bool);
    fn set_section_mobile_visible(&mut self, index: usize, visible: bool);
    fn set_paging_button(&mut self, group: usize, button: PagingButton, enabled: bool);
}

/// Animated scroll so the section's top lands `header_offset_px` below the
/// viewport top. Returns `false` when the section element is missing.
pub trait SmoothScroll {
    fn scroll_to_section(&mut self, index: usize, header_offset_px: f32) -> bool;
}

/// Observer registration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ObserverOptions {
    pub root_margin: String,
    pub thresholds: Vec<f32>,
}

/// One observer report for a registered section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VisibilityEntry {
    pub section: usize,
    pub intersection_ratio: f32,
    pub is_intersecting: bool,
}

pub trait VisibilityObserver {
    fn observe(&mut self, section: usize, options: &ObserverOptions);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TimerKind {
    ScrollSettle,
    ResizeDebounce,
}

/// Identifies one armed timer. Only the most recent ticket of a kind is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimerTicket {
    pub kind: TimerKind,
    pub generation: u64,
}

/// Fires the ticket back into the owning component after `delay`.
pub trait TimerHost {
    fn schedule(&mut self, ticket: TimerTicket, delay: Duration);
}

/// Everything the section viewer needs from its host.
pub trait ViewerHost: SectionSurface + SmoothScroll + VisibilityObserver + TimerHost {}

impl<T> ViewerHost for T where T: SectionSurface + SmoothScroll + VisibilityObserver + TimerHost {}

/// A single-date picker bound to one input field.
///
/// Setters never fire the widget's own change callback; the range picker is
/// the only caller and already knows what changed.
pub trait DateWidget {
    fn selected(&self) -> Option<NaiveDate>;
    fn set_selected(&mut self, date: Option<NaiveDate>);
    fn clear(&mut self);
    fn set_min_date(&mut self, date: Option<NaiveDate>);
    fn set_max_date(&mut self, date: Option<NaiveDate>);
    fn set_display_text(&mut self, text: &str);
}
