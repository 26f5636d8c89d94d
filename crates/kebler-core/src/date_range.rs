//! Check-in / check-out picker pair.
//!
//! Each field owns its own selection; this type keeps the pair consistent by
//! pushing bounds across on every change. Check-in is the anchor: moving it
//! past the current check-out clears check-out, while a check-out change only
//! narrows what check-in may pick.

use crate::dates::{self, DateFormats};
use crate::host::DateWidget;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct DateRangeView {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub check_in_max: Option<NaiveDate>,
    pub check_out_min: NaiveDate,
    pub nights: Option<i64>,
}

#[derive(Debug)]
pub struct DateRangePicker<W: DateWidget> {
    check_in: W,
    check_out: W,
    today: NaiveDate,
    formats: DateFormats,
    check_in_max: Option<NaiveDate>,
    check_out_min: NaiveDate,
}

impl<W: DateWidget> DateRangePicker<W> {
    /// Attach both fields with `today` as their floor. Values already present
    /// in the fields are reconciled as if they had just been picked.
    pub fn initialize(check_in: W, check_out: W, today: NaiveDate, formats: DateFormats) -> Self {
        let mut picker = DateRangePicker {
            check_in,
            check_out,
            today,
            formats,
            check_in_max: None,
            check_out_min: today,
        };
        picker.check_in.set_min_date(Some(today));
        picker.check_in.set_max_date(None);
        picker.check_out.set_min_date(Some(today));
        picker.check_out.set_max_date(None);

        let prefilled_in = picker.check_in.selected();
        let prefilled_out = picker.check_out.selected();
        if prefilled_in.is_some() {
            picker.on_check_in_changed(prefilled_in);
        }
        if prefilled_out.is_some() && picker.check_out.selected().is_some() {
            picker.on_check_out_changed(prefilled_out);
        }

        debug!(%today, "Date range picker initialized");
        picker
    }

    pub fn on_check_in_changed(&mut self, selected: Option<NaiveDate>) {
        // Typed and prefilled values bypass the calendar; hold them to its floor.
        if let Some(date) = selected.filter(|date| *date < self.today) {
            warn!(%date, floor = %self.today, "Rejecting check-in before today");
        }
        let Some(check_in) = selected.filter(|date| *date >= self.today) else {
            self.check_in.clear();
            self.set_check_out_min(self.today);
            debug!("Check-in cleared; check-out floor reset to today");
            return;
        };

        self.check_in.set_selected(Some(check_in));
        self.set_check_out_min(dates::day_after(check_in).unwrap_or(check_in));

        if let Some(check_out) = self.check_out.selected().filter(|out| *out <= check_in) {
            info!(
                %check_in,
                %check_out,
                "Check-out no longer after check-in; clearing it"
            );
            self.check_out.clear();
            self.set_check_in_max(None);
        }
    }

    pub fn on_check_out_changed(&mut self, selected: Option<NaiveDate>) {
        let Some(check_out) = selected else {
            self.check_out.clear();
            self.set_check_in_max(None);
            debug!("Check-out cleared; check-in ceiling removed");
            return;
        };

        if check_out < self.check_out_min {
            warn!(
                %check_out,
                floor = %self.check_out_min,
                "Rejecting check-out below its floor"
            );
            self.check_out.clear();
            self.set_check_in_max(None);
            return;
        }

        // The widget's floor makes this unreachable by clicking; typed or
        // scripted values are rejected here instead of moving the anchor.
        if let Some(check_in) = self.check_in.selected().filter(|start| check_out <= *start) {
            warn!(
                %check_in,
                %check_out,
                "Rejecting check-out on or before check-in"
            );
            self.check_out.clear();
            self.set_check_in_max(None);
            return;
        }

        self.check_out.set_selected(Some(check_out));
        self.set_check_in_max(dates::day_before(check_out));
    }

    /// Typed input: parsed with the value format. Garbage and disabled dates
    /// clear the field.
    pub fn on_check_in_input(&mut self, text: &str) {
        self.on_check_in_changed(dates::parse_field_value(text, &self.formats.value));
    }

    pub fn on_check_out_input(&mut self, text: &str) {
        self.on_check_out_changed(dates::parse_field_value(text, &self.formats.value));
    }

    /// Render the closed field's value for display. Never touches the selection.
    pub fn on_check_in_closed(&mut self, value_text: &str) {
        let rendered = self.render_display(value_text);
        self.check_in.set_display_text(&rendered);
    }

    pub fn on_check_out_closed(&mut self, value_text: &str) {
        let rendered = self.render_display(value_text);
        self.check_out.set_display_text(&rendered);
    }

    pub fn check_in(&self) -> &W {
        &self.check_in
    }

    pub fn check_out(&self) -> &W {
        &self.check_out
    }

    pub fn check_in_mut(&mut self) -> &mut W {
        &mut self.check_in
    }

    pub fn check_out_mut(&mut self) -> &mut W {
        &mut self.check_out
    }

    pub fn value_format(&self) -> &str {
        &self.formats.value
    }

    pub fn view(&self) -> DateRangeView {
        let check_in = self.check_in.selected();
        let check_out = self.check_out.selected();
        DateRangeView {
            check_in,
            check_out,
            check_in_max: self.check_in_max,
            check_out_min: self.check_out_min,
            nights: match (check_in, check_out) {
                (Some(start), Some(end)) => Some((end - start).num_days()),
                _ => None,
            },
        }
    }

    fn render_display(&self, value_text: &str) -> String {
        dates::parse_field_value(value_text, &self.formats.value)
            .map(|date| dates::format_display(date, &self.formats.display))
            .unwrap_or_default()
    }

    fn set_check_out_min(&mut self, min: NaiveDate) {
        self.check_out_min = min;
        self.check_out.set_min_date(Some(min));
    }

    fn set_check_in_max(&mut self, max: Option<NaiveDate>) {
        self.check_in_max = max;
        self.check_in.set_max_date(max);
    }
}
