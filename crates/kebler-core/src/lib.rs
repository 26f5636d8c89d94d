//! Headless interaction layer for the Kebler Corner booking site.
//!
//! The stateful parts of the page (the scroll-synchronized cabin viewer and
//! the check-in/check-out picker pair) drive capability traits from [`host`]
//! instead of a document, so they run the same against a browser binding or
//! the in-memory [`document`].

pub mod config;
pub mod date_range;
pub mod dates;
pub mod document;
pub mod host;
pub mod page;
pub mod section_viewer;
pub mod widgets;

pub use date_range::{DateRangePicker, DateRangeView};
pub use page::{PageCommand, PageEvent, PageLayout, PageScript, PageSession, PageSnapshot};
pub use section_viewer::{LayoutError, SectionCounts, SectionViewer, ViewerOptions};

use std::path::Path;
use ts_rs::TS;

fn export_single_type<T: TS + 'static>(out_dir: &Path) -> Result<(), String> {
    T::export_all_to(out_dir).map_err(|err| err.to_string())
}

/// Write TypeScript definitions for every type crossing into a front end.
pub fn export_ts_bindings(out_dir: &Path) -> Result<(), String> {
    std::fs::create_dir_all(out_dir).map_err(|err| err.to_string())?;
    export_single_type::<PageCommand>(out_dir)?;
    export_single_type::<PageLayout>(out_dir)?;
    export_single_type::<PageSnapshot>(out_dir)?;
    export_single_type::<page::SliderView>(out_dir)?;
    export_single_type::<DateRangeView>(out_dir)?;
    export_single_type::<section_viewer::ViewerSnapshot>(out_dir)?;
    export_single_type::<SectionCounts>(out_dir)?;
    export_single_type::<document::HeadlessDateField>(out_dir)?;
    export_single_type::<document::PagingState>(out_dir)?;
    export_single_type::<document::ScrollRequest>(out_dir)?;
    export_single_type::<document::ScheduledTimer>(out_dir)?;
    export_single_type::<host::VisibilityEntry>(out_dir)?;
    export_single_type::<host::ObserverOptions>(out_dir)?;
    export_single_type::<host::PagingButton>(out_dir)?;
    export_single_type::<host::TimerTicket>(out_dir)?;
    export_single_type::<host::TimerKind>(out_dir)?;
    export_single_type::<widgets::KeyPress>(out_dir)?;
    export_single_type::<widgets::DrawerLink>(out_dir)?;
    export_single_type::<widgets::SignupOutcome>(out_dir)?;
    Ok(())
}
