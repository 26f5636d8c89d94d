//! Scroll-synchronized cabin detail viewer.
//!
//! Keeps one active section in step with the sidebar menu, the progress dots
//! and the prev/next paging buttons. The active index moves either through
//! explicit navigation (menu click, paging button) or through visibility
//! reports while the user scrolls. Navigation starts an animated scroll that
//! itself produces visibility reports, so those are ignored until the settle
//! timer armed by the navigation fires.

mod layout;

pub use layout::{LayoutError, SectionCounts};

use crate::config::{AppConfig, LayoutPolicy};
use crate::host::{
    ObserverOptions, PagingButton, TimerKind, TimerTicket, ViewerHost, VisibilityEntry,
};
use layout::SectionLayout;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerOptions {
    pub header_offset_px: f32,
    pub settle_delay: Duration,
    pub layout_policy: LayoutPolicy,
    pub observer: ObserverOptions,
}

impl ViewerOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        ViewerOptions {
            header_offset_px: config.header_offset_px,
            settle_delay: Duration::from_millis(config.settle_delay_ms),
            layout_policy: config.layout_policy,
            observer: ObserverOptions {
                root_margin: config.observer_root_margin.clone(),
                thresholds: config.observer_thresholds.clone(),
            },
        }
    }
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ViewerSnapshot {
    pub active_index: Option<usize>,
    pub max_index: Option<usize>,
    pub programmatic_scroll: bool,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

#[derive(Debug)]
pub struct SectionViewer<H: ViewerHost> {
    host: H,
    layout: Option<SectionLayout>,
    options: ViewerOptions,
    active_index: usize,
    programmatic_scroll: bool,
    settle_generation: u64,
}

impl<H: ViewerHost> SectionViewer<H> {
    /// Bind the viewer to the page's sections and render the first one as
    /// active. Empty section or menu lists produce an inert viewer.
    pub fn initialize(
        host: H,
        counts: SectionCounts,
        options: ViewerOptions,
    ) -> Result<Self, LayoutError> {
        let layout = SectionLayout::resolve(counts, options.layout_policy)?;
        let mut viewer = SectionViewer {
            host,
            layout,
            options,
            active_index: 0,
            programmatic_scroll: false,
            settle_generation: 0,
        };

        let Some(layout) = viewer.layout else {
            debug!(
                sections = counts.sections,
                menu_entries = counts.menu_entries,
                "No navigable sections; viewer stays inert"
            );
            return Ok(viewer);
        };

        for section in 0..=layout.max_index {
            viewer.host.observe(section, &viewer.options.observer);
        }
        viewer.render_all();
        info!(
            sections = layout.max_index + 1,
            dots = layout.counts.dots,
            paging_groups = layout.counts.paging_groups,
            "Section viewer initialized"
        );
        Ok(viewer)
    }

    /// A viewer that ignores every event. Used when the layout is rejected.
    pub fn inert(host: H, options: ViewerOptions) -> Self {
        SectionViewer {
            host,
            layout: None,
            options,
            active_index: 0,
            programmatic_scroll: false,
            settle_generation: 0,
        }
    }

    pub fn navigate_to(&mut self, index: isize) {
        let Some(layout) = self.layout else {
            debug!(index, "Ignoring navigation on inert viewer");
            return;
        };

        let target = clamp_index(index, layout.max_index);
        // Must be set before the scroll starts; the observer fires during it.
        self.programmatic_scroll = true;

        let previous = self.active_index;
        self.active_index = target;
        self.render_transition(previous);

        if !self
            .host
            .scroll_to_section(target, self.options.header_offset_px)
        {
            warn!(section = target, "Scroll target missing; still arming settle timer");
        }
        self.arm_settle_timer();

        info!(
            requested = index,
            section = target,
            "Navigated to section"
        );
    }

    pub fn next(&mut self) {
        let Some(layout) = self.layout else {
            return;
        };
        if self.active_index < layout.max_index {
            self.navigate_to(self.active_index as isize + 1);
        }
    }

    pub fn previous(&mut self) {
        if self.layout.is_some() && self.active_index > 0 {
            self.navigate_to(self.active_index as isize - 1);
        }
    }

    /// Reconcile the active index with an observer batch. Returns whether the
    /// active section changed.
    pub fn on_visibility_changed(&mut self, entries: &[VisibilityEntry]) -> bool {
        let Some(layout) = self.layout else {
            return false;
        };
        if self.programmatic_scroll {
            debug!(
                entries = entries.len(),
                "Visibility report suppressed during programmatic scroll"
            );
            return false;
        }

        let Some(winner) = most_visible(entries, self.active_index, layout.max_index) else {
            return false;
        };
        if winner == self.active_index {
            return false;
        }

        let previous = self.active_index;
        self.active_index = winner;
        self.render_transition(previous);
        debug!(from = previous, to = winner, "Active section follows scroll");
        true
    }

    /// Timer callback. Only the most recently armed ticket clears the flag.
    pub fn on_settle_elapsed(&mut self, ticket: TimerTicket) -> bool {
        if ticket.kind != TimerKind::ScrollSettle || ticket.generation != self.settle_generation
        {
            debug!(
                generation = ticket.generation,
                current = self.settle_generation,
                "Ignoring stale settle timer"
            );
            return false;
        }
        self.programmatic_scroll = false;
        true
    }

    pub fn active_index(&self) -> Option<usize> {
        self.layout.map(|_| self.active_index)
    }

    pub fn max_index(&self) -> Option<usize> {
        self.layout.map(|layout| layout.max_index)
    }

    pub fn is_inert(&self) -> bool {
        self.layout.is_none()
    }

    pub fn is_programmatic_scroll(&self) -> bool {
        self.programmatic_scroll
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        let max_index = self.max_index();
        ViewerSnapshot {
            active_index: self.active_index(),
            max_index,
            programmatic_scroll: self.programmatic_scroll,
            can_go_previous: max_index.is_some() && self.active_index > 0,
            can_go_next: max_index.is_some_and(|max| self.active_index < max),
        }
    }

    fn arm_settle_timer(&mut self) {
        self.settle_generation = self.settle_generation.wrapping_add(1);
        self.host.schedule(
            TimerTicket {
                kind: TimerKind::ScrollSettle,
                generation: self.settle_generation,
            },
            self.options.settle_delay,
        );
    }

    fn render_all(&mut self) {
        let Some(layout) = self.layout else {
            return;
        };
        let active = self.active_index;
        for idx in 0..layout.counts.menu_entries {
            self.host.set_menu_entry_active(idx, idx == active);
        }
        for idx in 0..layout.counts.dots {
            self.host.set_dot_active(idx, idx == active);
        }
        for idx in 0..layout.counts.sections {
            self.host.set_section_mobile_visible(idx, idx == active);
        }
        self.render_paging(layout);
    }

    fn render_transition(&mut self, previous: usize) {
        let Some(layout) = self.layout else {
            return;
        };
        let active = self.active_index;
        if previous != active {
            self.host.set_menu_entry_active(previous, false);
            self.host.set_section_mobile_visible(previous, false);
            if layout.has_dots() {
                self.host.set_dot_active(previous, false);
            }
        }
        self.host.set_menu_entry_active(active, true);
        self.host.set_section_mobile_visible(active, true);
        if layout.has_dots() {
            self.host.set_dot_active(active, true);
        }
        self.render_paging(layout);
    }

    fn render_paging(&mut self, layout: SectionLayout) {
        let active = self.active_index;
        for group in 0..layout.counts.paging_groups {
            self.host
                .set_paging_button(group, PagingButton::Previous, active > 0);
            self.host
                .set_paging_button(group, PagingButton::Next, active < layout.max_index);
        }
    }
}

fn clamp_index(index: isize, max_index: usize) -> usize {
    if index <= 0 {
        0
    } else {
        (index as usize).min(max_index)
    }
}

/// Strictly highest ratio among intersecting entries. On a tie the current
/// section keeps its place; otherwise the first tied entry wins.
fn most_visible(entries: &[VisibilityEntry], current: usize, max_index: usize) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    let mut current_tied = false;

    for entry in entries.iter().filter(|entry| {
        entry.is_intersecting && entry.section <= max_index && entry.intersection_ratio.is_finite()
    }) {
        match best {
            Some((_, ratio)) if entry.intersection_ratio < ratio => {}
            Some((_, ratio)) if entry.intersection_ratio == ratio => {
                current_tied |= entry.section == current;
            }
            _ => {
                best = Some((entry.section, entry.intersection_ratio));
                current_tied = entry.section == current;
            }
        }
    }

    best.map(|(section, _)| if current_tied { current } else { section })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HeadlessDocument;

    fn counts(sections: usize, dots: usize, paging_groups: usize) -> SectionCounts {
        SectionCounts {
            sections,
            menu_entries: sections,
            dots,
            paging_groups,
        }
    }

    fn build_viewer(sections: usize, dots: usize) -> SectionViewer<HeadlessDocument> {
        let layout = counts(sections, dots, 2);
        SectionViewer::initialize(
            HeadlessDocument::new(layout),
            layout,
            ViewerOptions::default(),
        )
        .expect("valid layout")
    }

    fn entry(section: usize, ratio: f32) -> VisibilityEntry {
        VisibilityEntry {
            section,
            intersection_ratio: ratio,
            is_intersecting: ratio > 0.0,
        }
    }

    fn settle(viewer: &mut SectionViewer<HeadlessDocument>) {
        for timer in viewer.host_mut().take_timers() {
            viewer.on_settle_elapsed(timer.ticket);
        }
    }

    fn assert_single_active(viewer: &SectionViewer<HeadlessDocument>) {
        let doc = viewer.host();
        let active = viewer.active_index().expect("active viewer");
        assert_eq!(doc.active_menu_entries(), vec![active]);
        assert_eq!(doc.active_dots(), vec![active]);
        assert_eq!(doc.visible_mobile_sections(), vec![active]);
    }

    #[test]
    fn initialize_renders_first_section_and_observes_all() {
        let viewer = build_viewer(3, 3);
        let doc = viewer.host();

        assert_eq!(viewer.active_index(), Some(0));
        assert_eq!(viewer.max_index(), Some(2));
        assert_eq!(doc.observed_sections(), [0usize, 1, 2].as_slice());
        let observer = doc.observer_options().expect("observer configured");
        assert_eq!(observer.root_margin, "-20% 0px -60% 0px");
        assert_eq!(observer.thresholds, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_single_active(&viewer);
        for group in 0..2 {
            assert!(!doc.paging_enabled(group, PagingButton::Previous));
            assert!(doc.paging_enabled(group, PagingButton::Next));
        }
    }

    #[test]
    fn empty_section_lists_leave_viewer_inert() {
        let layout = SectionCounts {
            sections: 0,
            menu_entries: 3,
            dots: 0,
            paging_groups: 1,
        };
        let mut viewer = SectionViewer::initialize(
            HeadlessDocument::new(layout),
            layout,
            ViewerOptions::default(),
        )
        .expect("empty layout is not an error");

        viewer.navigate_to(1);
        viewer.next();
        assert!(!viewer.on_visibility_changed(&[entry(1, 0.9)]));

        assert!(viewer.is_inert());
        assert_eq!(viewer.active_index(), None);
        assert!(viewer.host().scrolls().is_empty());
        assert!(viewer.host().observed_sections().is_empty());
        assert!(!viewer.is_programmatic_scroll());
    }

    #[test]
    fn navigate_clamps_out_of_range_requests() {
        let mut viewer = build_viewer(3, 3);

        viewer.navigate_to(5);
        assert_eq!(viewer.active_index(), Some(2));
        assert_single_active(&viewer);

        viewer.navigate_to(-1);
        assert_eq!(viewer.active_index(), Some(0));
        assert_single_active(&viewer);

        for requested in [-40, -2, 0, 1, 2, 3, 99, isize::MAX, isize::MIN] {
            viewer.navigate_to(requested);
            let active = viewer.active_index().expect("active viewer");
            assert!(active <= 2, "index {requested} escaped bounds: {active}");
        }
    }

    #[test]
    fn navigate_scrolls_with_header_offset_and_arms_settle() {
        let mut viewer = build_viewer(3, 3);
        viewer.navigate_to(1);

        let doc = viewer.host();
        let scroll = doc.scrolls().last().expect("scroll issued");
        assert_eq!(scroll.section, 1);
        assert_eq!(scroll.header_offset_px, 80.0);

        let timers = doc.pending_timers();
        assert_eq!(timers.len(), 1);
        assert_eq!(timers[0].ticket.kind, TimerKind::ScrollSettle);
        assert_eq!(timers[0].delay_ms, 1000);
        assert!(viewer.is_programmatic_scroll());
    }

    #[test]
    fn visibility_reports_are_ignored_while_scrolling() {
        let mut viewer = build_viewer(3, 3);
        viewer.navigate_to(2);

        for _ in 0..5 {
            assert!(!viewer.on_visibility_changed(&[entry(0, 1.0), entry(1, 0.4)]));
        }
        assert_eq!(viewer.active_index(), Some(2));

        settle(&mut viewer);
        assert!(!viewer.is_programmatic_scroll());
        assert!(viewer.on_visibility_changed(&[entry(0, 1.0), entry(1, 0.4)]));
        assert_eq!(viewer.active_index(), Some(0));
    }

    #[test]
    fn most_visible_intersecting_section_wins() {
        let mut viewer = build_viewer(3, 3);

        let changed = viewer.on_visibility_changed(&[
            entry(0, 0.0),
            entry(1, 0.6),
            entry(2, 0.3),
        ]);

        assert!(changed);
        assert_eq!(viewer.active_index(), Some(1));
        assert_single_active(&viewer);
        let doc = viewer.host();
        assert!(doc.paging_enabled(0, PagingButton::Previous));
        assert!(doc.paging_enabled(1, PagingButton::Next));
    }

    #[test]
    fn no_intersecting_entries_keep_current_section() {
        let mut viewer = build_viewer(3, 3);
        let report = [
            VisibilityEntry {
                section: 2,
                intersection_ratio: 0.9,
                is_intersecting: false,
            },
            entry(1, 0.0),
        ];

        assert!(!viewer.on_visibility_changed(&report));
        assert!(!viewer.on_visibility_changed(&[]));
        assert_eq!(viewer.active_index(), Some(0));
    }

    #[test]
    fn ties_prefer_the_current_section_then_report_order() {
        let mut viewer = build_viewer(4, 4);

        assert!(!viewer.on_visibility_changed(&[entry(2, 0.5), entry(0, 0.5)]));
        assert_eq!(viewer.active_index(), Some(0));

        assert!(viewer.on_visibility_changed(&[entry(3, 0.5), entry(2, 0.5)]));
        assert_eq!(viewer.active_index(), Some(3));
    }

    #[test]
    fn entries_outside_the_layout_are_ignored() {
        let mut viewer = build_viewer(3, 3);
        assert!(!viewer.on_visibility_changed(&[entry(7, 1.0), entry(0, 0.2)]));
        assert!(!viewer.on_visibility_changed(&[entry(1, f32::NAN)]));
        assert_eq!(viewer.active_index(), Some(0));
    }

    #[test]
    fn paging_is_idempotent_at_the_bounds() {
        let mut viewer = build_viewer(3, 3);

        viewer.previous();
        assert_eq!(viewer.active_index(), Some(0));
        assert!(viewer.host().scrolls().is_empty());
        assert!(!viewer.is_programmatic_scroll());

        viewer.next();
        viewer.next();
        assert_eq!(viewer.active_index(), Some(2));
        let scrolls = viewer.host().scrolls().len();

        viewer.next();
        assert_eq!(viewer.active_index(), Some(2));
        assert_eq!(viewer.host().scrolls().len(), scrolls);
        let doc = viewer.host();
        assert!(!doc.paging_enabled(0, PagingButton::Next));
        assert!(doc.paging_enabled(0, PagingButton::Previous));
    }

    #[test]
    fn rearmed_navigation_keeps_flag_until_latest_timer() {
        let mut viewer = build_viewer(3, 3);
        viewer.navigate_to(1);
        viewer.navigate_to(2);

        let timers = viewer.host_mut().take_timers();
        assert_eq!(timers.len(), 2);

        assert!(!viewer.on_settle_elapsed(timers[0].ticket));
        assert!(viewer.is_programmatic_scroll());

        assert!(viewer.on_settle_elapsed(timers[1].ticket));
        assert!(!viewer.is_programmatic_scroll());
        assert_eq!(viewer.host().scrolls().last().map(|s| s.section), Some(2));
    }

    #[test]
    fn missing_scroll_target_still_clears_flag() {
        let layout = counts(3, 0, 1);
        let mut doc = HeadlessDocument::new(layout);
        doc.remove_section_element(1);
        let mut viewer =
            SectionViewer::initialize(doc, layout, ViewerOptions::default()).expect("layout");

        viewer.navigate_to(1);
        assert_eq!(viewer.active_index(), Some(1));
        assert!(viewer.is_programmatic_scroll());

        settle(&mut viewer);
        assert!(!viewer.is_programmatic_scroll());
    }

    #[test]
    fn viewer_without_dots_marks_no_dots() {
        let mut viewer = build_viewer(3, 0);
        viewer.navigate_to(1);
        let doc = viewer.host();
        assert!(doc.active_dots().is_empty());
        assert_eq!(doc.active_menu_entries(), vec![1]);
    }

    #[test]
    fn snapshot_reflects_bounds() {
        let mut viewer = build_viewer(3, 3);
        viewer.navigate_to(2);
        let snapshot = viewer.snapshot();
        assert_eq!(snapshot.active_index, Some(2));
        assert_eq!(snapshot.max_index, Some(2));
        assert!(snapshot.programmatic_scroll);
        assert!(snapshot.can_go_previous);
        assert!(!snapshot.can_go_next);
    }
}
