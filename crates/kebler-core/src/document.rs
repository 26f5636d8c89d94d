//! In-memory stand-in for the page markup.
//!
//! Records every mutation the components make so the replay driver can print
//! it and tests can assert on it. Indices outside the markup are treated as
//! missing elements and ignored.

use crate::host::{
    DateWidget, ObserverOptions, PagingButton, SectionSurface, SmoothScroll, TimerHost,
    TimerTicket, VisibilityObserver,
};
use crate::section_viewer::SectionCounts;
use chrono::NaiveDate;
use serde::Serialize;
use std::time::Duration;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ScrollRequest {
    pub section: usize,
    pub header_offset_px: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ScheduledTimer {
    pub ticket: TimerTicket,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct PagingState {
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessDocument {
    menu_active: Vec<bool>,
    dot_active: Vec<bool>,
    mobile_visible: Vec<bool>,
    section_present: Vec<bool>,
    paging: Vec<PagingState>,
    observed: Vec<usize>,
    observer_options: Option<ObserverOptions>,
    scrolls: Vec<ScrollRequest>,
    timers: Vec<ScheduledTimer>,
}

impl HeadlessDocument {
    pub fn new(counts: SectionCounts) -> Self {
        HeadlessDocument {
            menu_active: vec![false; counts.menu_entries],
            dot_active: vec![false; counts.dots],
            mobile_visible: vec![false; counts.sections],
            section_present: vec![true; counts.sections],
            paging: vec![PagingState::default(); counts.paging_groups],
            ..HeadlessDocument::default()
        }
    }

    /// Simulate markup where a section element was never rendered.
    pub fn remove_section_element(&mut self, index: usize) {
        if let Some(present) = self.section_present.get_mut(index) {
            *present = false;
        }
    }

    pub fn active_menu_entries(&self) -> Vec<usize> {
        flagged(&self.menu_active)
    }

    pub fn active_dots(&self) -> Vec<usize> {
        flagged(&self.dot_active)
    }

    pub fn visible_mobile_sections(&self) -> Vec<usize> {
        flagged(&self.mobile_visible)
    }

    pub fn paging_enabled(&self, group: usize, button: PagingButton) -> bool {
        self.paging.get(group).is_some_and(|state| match button {
            PagingButton::Previous => state.previous_enabled,
            PagingButton::Next => state.next_enabled,
        })
    }

    pub fn paging_groups(&self) -> &[PagingState] {
        &self.paging
    }

    pub fn observed_sections(&self) -> &[usize] {
        &self.observed
    }

    pub fn observer_options(&self) -> Option<&ObserverOptions> {
        self.observer_options.as_ref()
    }

    pub fn scrolls(&self) -> &[ScrollRequest] {
        &self.scrolls
    }

    pub fn pending_timers(&self) -> &[ScheduledTimer] {
        &self.timers
    }

    /// Hand pending timers to the caller, as if they had all fired.
    pub fn take_timers(&mut self) -> Vec<ScheduledTimer> {
        std::mem::take(&mut self.timers)
    }
}

fn flagged(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter_map(|(idx, on)| on.then_some(idx))
        .collect()
}

fn set_flag(flags: &mut [bool], index: usize, value: bool) {
    if let Some(flag) = flags.get_mut(index) {
        *flag = value;
    }
}

impl SectionSurface for HeadlessDocument {
    fn set_menu_entry_active(&mut self, index: usize, active: bool) {
        set_flag(&mut self.menu_active, index, active);
    }

    fn set_dot_active(&mut self, index: usize, active: bool) {
        set_flag(&mut self.dot_active, index, active);
    }

    fn set_section_mobile_visible(&mut self, index: usize, visible: bool) {
        set_flag(&mut self.mobile_visible, index, visible);
    }

    fn set_paging_button(&mut self, group: usize, button: PagingButton, enabled: bool) {
        if let Some(state) = self.paging.get_mut(group) {
            match button {
                PagingButton::Previous => state.previous_enabled = enabled,
                PagingButton::Next => state.next_enabled = enabled,
            }
        }
    }
}

impl SmoothScroll for HeadlessDocument {
    fn scroll_to_section(&mut self, index: usize, header_offset_px: f32) -> bool {
        if !self.section_present.get(index).copied().unwrap_or(false) {
            return false;
        }
        self.scrolls.push(ScrollRequest {
            section: index,
            header_offset_px,
        });
        true
    }
}

impl VisibilityObserver for HeadlessDocument {
    fn observe(&mut self, section: usize, options: &ObserverOptions) {
        if self.observer_options.as_ref() != Some(options) {
            self.observer_options = Some(options.clone());
        }
        self.observed.push(section);
    }
}

impl TimerHost for HeadlessDocument {
    fn schedule(&mut self, ticket: TimerTicket, delay: Duration) {
        self.timers.push(ScheduledTimer {
            ticket,
            delay_ms: delay.as_millis() as u64,
        });
    }
}

/// One date input with its picker state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct HeadlessDateField {
    pub selected: Option<NaiveDate>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub display_text: String,
}

impl HeadlessDateField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the calendar would offer `date` as clickable.
    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        self.min_date.is_none_or(|min| date >= min) && self.max_date.is_none_or(|max| date <= max)
    }

    /// A user click on the calendar. Disabled dates are not clickable.
    pub fn pick(&mut self, date: NaiveDate) -> bool {
        if !self.is_selectable(date) {
            return false;
        }
        self.selected = Some(date);
        true
    }
}

impl DateWidget for HeadlessDateField {
    fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    fn set_selected(&mut self, date: Option<NaiveDate>) {
        self.selected = date;
    }

    fn clear(&mut self) {
        self.selected = None;
        self.display_text.clear();
    }

    fn set_min_date(&mut self, date: Option<NaiveDate>) {
        self.min_date = date;
    }

    fn set_max_date(&mut self, date: Option<NaiveDate>) {
        self.max_date = date;
    }

    fn set_display_text(&mut self, text: &str) {
        self.display_text = text.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn out_of_range_elements_are_ignored() {
        let mut doc = HeadlessDocument::new(SectionCounts {
            sections: 2,
            menu_entries: 2,
            dots: 0,
            paging_groups: 1,
        });
        doc.set_menu_entry_active(9, true);
        doc.set_dot_active(0, true);
        doc.set_paging_button(3, PagingButton::Next, true);

        assert!(doc.active_menu_entries().is_empty());
        assert!(doc.active_dots().is_empty());
        assert!(!doc.paging_enabled(3, PagingButton::Next));
        assert!(!doc.scroll_to_section(5, 80.0));
    }

    #[test]
    fn bounds_disable_dates_outside_range() {
        let mut field = HeadlessDateField::new();
        field.set_min_date(Some(date(2025, 6, 11)));
        field.set_max_date(Some(date(2025, 6, 20)));

        assert!(!field.pick(date(2025, 6, 10)));
        assert!(!field.pick(date(2025, 6, 21)));
        assert!(field.pick(date(2025, 6, 11)));
        assert_eq!(field.selected(), Some(date(2025, 6, 11)));
    }
}
