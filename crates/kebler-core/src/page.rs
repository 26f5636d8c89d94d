//! Page-level composition: one session per page view.
//!
//! Host events arrive as [`PageCommand`]s; every command returns a
//! [`PageEvent`] carrying a full snapshot so a front end (or the replay
//! driver) can re-render from it.

use crate::config::AppConfig;
use crate::date_range::{DateRangePicker, DateRangeView};
use crate::dates::{self, DateFormats};
use crate::document::{HeadlessDateField, HeadlessDocument, PagingState};
use crate::host::{DateWidget, TimerKind, VisibilityEntry};
use crate::section_viewer::{SectionCounts, SectionViewer, ViewerOptions, ViewerSnapshot};
use crate::widgets::{
    Accordion, CabinCatalog, CardSlider, Drawer, DrawerLink, Dropdown, FadeRotator, KeyPress,
    SignupOutcome, SliderOptions, submit_signup,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

/// Element counts and geometry taken from the page markup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PageLayout {
    pub sections: SectionCounts,
    #[serde(default)]
    pub faq_items: usize,
    #[serde(default)]
    pub drawer_submenus: usize,
    #[serde(default)]
    pub rotator_images: Vec<usize>,
    #[serde(default)]
    pub slider_cards: usize,
    #[serde(default = "default_card_width_px")]
    pub card_width_px: f32,
    #[serde(default = "default_viewport_width_px")]
    pub viewport_width_px: f32,
    #[serde(default)]
    pub cabin_categories: Vec<usize>,
}

fn default_card_width_px() -> f32 {
    360.0
}

fn default_viewport_width_px() -> f32 {
    1280.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case", tag = "type")]
#[ts(export)]
pub enum PageCommand {
    GetSnapshot,
    NavigateTo { index: isize },
    NextSection,
    PreviousSection,
    VisibilityChanged { entries: Vec<VisibilityEntry> },
    FireTimers,
    PickCheckIn { date: NaiveDate },
    PickCheckOut { date: NaiveDate },
    ClearCheckIn,
    ClearCheckOut,
    TypeCheckIn { text: String },
    TypeCheckOut { text: String },
    CloseCheckIn,
    CloseCheckOut,
    ToggleFaq { index: usize },
    FaqKey { index: usize, key: KeyPress },
    ToggleDropdown,
    ClickOutside,
    ClickOverlay,
    ToggleDrawer,
    TapDrawerLink { link: DrawerLink },
    KeyDown { key: KeyPress },
    RotatorNext { card: usize },
    RotatorPrev { card: usize },
    SliderNext,
    SliderPrev,
    Resize { width: f32 },
    SelectCategory { index: usize },
    SelectCabin { index: usize },
    SubmitSignup { email: String },
}

impl PageCommand {
    pub fn action(&self) -> &'static str {
        match self {
            Self::GetSnapshot => "page_get_snapshot",
            Self::NavigateTo { .. } => "viewer_navigate_to",
            Self::NextSection => "viewer_next",
            Self::PreviousSection => "viewer_previous",
            Self::VisibilityChanged { .. } => "viewer_visibility_changed",
            Self::FireTimers => "page_fire_timers",
            Self::PickCheckIn { .. } => "dates_pick_check_in",
            Self::PickCheckOut { .. } => "dates_pick_check_out",
            Self::ClearCheckIn => "dates_clear_check_in",
            Self::ClearCheckOut => "dates_clear_check_out",
            Self::TypeCheckIn { .. } => "dates_type_check_in",
            Self::TypeCheckOut { .. } => "dates_type_check_out",
            Self::CloseCheckIn => "dates_close_check_in",
            Self::CloseCheckOut => "dates_close_check_out",
            Self::ToggleFaq { .. } => "faq_toggle",
            Self::FaqKey { .. } => "faq_key",
            Self::ToggleDropdown => "dropdown_toggle",
            Self::ClickOutside => "page_click_outside",
            Self::ClickOverlay => "drawer_click_overlay",
            Self::ToggleDrawer => "drawer_toggle",
            Self::TapDrawerLink { .. } => "drawer_tap_link",
            Self::KeyDown { .. } => "page_key_down",
            Self::RotatorNext { .. } => "rotator_next",
            Self::RotatorPrev { .. } => "rotator_prev",
            Self::SliderNext => "slider_next",
            Self::SliderPrev => "slider_prev",
            Self::Resize { .. } => "page_resize",
            Self::SelectCategory { .. } => "catalog_select_category",
            Self::SelectCabin { .. } => "catalog_select_cabin",
            Self::SubmitSignup { .. } => "signup_submit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct SliderView {
    pub current: usize,
    pub max_slide: usize,
    pub cards_per_view: usize,
    pub offset_px: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct PageSnapshot {
    pub viewer: ViewerSnapshot,
    pub layout_error: Option<String>,
    pub active_menu_entries: Vec<usize>,
    pub active_dots: Vec<usize>,
    pub paging: Vec<PagingState>,
    pub dates: DateRangeView,
    pub check_in_field: HeadlessDateField,
    pub check_out_field: HeadlessDateField,
    pub faq_open: Option<usize>,
    pub dropdown_expanded: bool,
    pub drawer_open: bool,
    pub drawer_submenus: Vec<usize>,
    pub rotators: Vec<usize>,
    pub slider: SliderView,
    pub cabin_category: Option<usize>,
    pub cabin: Option<usize>,
    pub last_signup: Option<SignupOutcome>,
    pub pending_timers: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageEvent {
    pub action: &'static str,
    pub snapshot: PageSnapshot,
}

/// A recorded page view: markup counts, the day it happened, and its events.
#[derive(Debug, Clone, Deserialize)]
pub struct PageScript {
    pub layout: PageLayout,
    #[serde(default)]
    pub today: Option<NaiveDate>,
    #[serde(default)]
    pub commands: Vec<PageCommand>,
}

impl PageScript {
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("failed to parse page script")
    }
}

#[derive(Debug)]
pub struct PageSession {
    viewer: SectionViewer<HeadlessDocument>,
    layout_error: Option<String>,
    dates: DateRangePicker<HeadlessDateField>,
    faq: Accordion,
    dropdown: Dropdown,
    drawer: Drawer,
    rotators: Vec<FadeRotator>,
    slider: CardSlider,
    catalog: CabinCatalog,
    last_signup: Option<SignupOutcome>,
}

impl PageSession {
    pub fn load(layout: &PageLayout, today: NaiveDate, config: &AppConfig) -> Self {
        let viewer_options = ViewerOptions::from_config(config);
        let (viewer, layout_error) = match SectionViewer::initialize(
            HeadlessDocument::new(layout.sections),
            layout.sections,
            viewer_options.clone(),
        ) {
            Ok(viewer) => (viewer, None),
            Err(err) => {
                warn!("Section layout rejected; viewer disabled: {err}");
                (
                    SectionViewer::inert(HeadlessDocument::new(layout.sections), viewer_options),
                    Some(err.to_string()),
                )
            }
        };

        let dates = DateRangePicker::initialize(
            HeadlessDateField::new(),
            HeadlessDateField::new(),
            today,
            DateFormats::from_config(config),
        );

        info!(
            sections = layout.sections.sections,
            faq_items = layout.faq_items,
            rotators = layout.rotator_images.len(),
            slider_cards = layout.slider_cards,
            %today,
            "Page session ready"
        );

        PageSession {
            viewer,
            layout_error,
            dates,
            faq: Accordion::new(layout.faq_items),
            dropdown: Dropdown::default(),
            drawer: Drawer::new(layout.drawer_submenus),
            rotators: layout
                .rotator_images
                .iter()
                .map(|images| FadeRotator::new(*images))
                .collect(),
            slider: CardSlider::new(
                layout.slider_cards,
                layout.card_width_px,
                layout.viewport_width_px,
                SliderOptions::from_config(config),
            ),
            catalog: CabinCatalog::new(layout.cabin_categories.clone()),
            last_signup: None,
        }
    }

    pub fn apply_command(&mut self, command: PageCommand) -> PageEvent {
        let action = command.action();
        debug!(action, "Applying page command");

        match command {
            PageCommand::GetSnapshot => {}
            PageCommand::NavigateTo { index } => self.viewer.navigate_to(index),
            PageCommand::NextSection => self.viewer.next(),
            PageCommand::PreviousSection => self.viewer.previous(),
            PageCommand::VisibilityChanged { entries } => {
                self.viewer.on_visibility_changed(&entries);
            }
            PageCommand::FireTimers => self.fire_timers(),
            PageCommand::PickCheckIn { date } => {
                if self.dates.check_in_mut().pick(date) {
                    self.dates.on_check_in_changed(Some(date));
                } else {
                    debug!(%date, "Check-in date is disabled");
                }
            }
            PageCommand::PickCheckOut { date } => {
                if self.dates.check_out_mut().pick(date) {
                    self.dates.on_check_out_changed(Some(date));
                } else {
                    debug!(%date, "Check-out date is disabled");
                }
            }
            PageCommand::ClearCheckIn => self.dates.on_check_in_changed(None),
            PageCommand::ClearCheckOut => self.dates.on_check_out_changed(None),
            PageCommand::TypeCheckIn { text } => self.dates.on_check_in_input(&text),
            PageCommand::TypeCheckOut { text } => self.dates.on_check_out_input(&text),
            PageCommand::CloseCheckIn => {
                let text = self.field_value_text(self.dates.check_in().selected());
                self.dates.on_check_in_closed(&text);
            }
            PageCommand::CloseCheckOut => {
                let text = self.field_value_text(self.dates.check_out().selected());
                self.dates.on_check_out_closed(&text);
            }
            PageCommand::ToggleFaq { index } => self.faq.toggle(index),
            PageCommand::FaqKey { index, key } => self.faq.key_press(index, key),
            PageCommand::ToggleDropdown => self.dropdown.toggle(),
            PageCommand::ClickOutside => self.dropdown.click_outside(),
            PageCommand::ClickOverlay => self.drawer.close(),
            PageCommand::ToggleDrawer => self.drawer.toggle(),
            PageCommand::TapDrawerLink { link } => self.drawer.tap_link(link),
            PageCommand::KeyDown { key } => self.drawer.key_press(key),
            PageCommand::RotatorNext { card } => {
                if let Some(rotator) = self.rotators.get_mut(card) {
                    rotator.next();
                }
            }
            PageCommand::RotatorPrev { card } => {
                if let Some(rotator) = self.rotators.get_mut(card) {
                    rotator.previous();
                }
            }
            PageCommand::SliderNext => self.slider.next(),
            PageCommand::SliderPrev => self.slider.previous(),
            PageCommand::Resize { width } => {
                let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
                self.slider.on_resize(width, self.viewer.host_mut());
            }
            PageCommand::SelectCategory { index } => self.catalog.select_category(index),
            PageCommand::SelectCabin { index } => self.catalog.select_cabin(index),
            PageCommand::SubmitSignup { email } => {
                let outcome = submit_signup(&email);
                info!(accepted = matches!(outcome, SignupOutcome::Accepted { .. }), "Signup submitted");
                self.last_signup = Some(outcome);
            }
        }

        PageEvent {
            action,
            snapshot: self.snapshot(),
        }
    }

    pub fn replay(&mut self, commands: Vec<PageCommand>) -> Vec<PageEvent> {
        commands
            .into_iter()
            .map(|command| self.apply_command(command))
            .collect()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let doc = self.viewer.host();
        PageSnapshot {
            viewer: self.viewer.snapshot(),
            layout_error: self.layout_error.clone(),
            active_menu_entries: doc.active_menu_entries(),
            active_dots: doc.active_dots(),
            paging: doc.paging_groups().to_vec(),
            dates: self.dates.view(),
            check_in_field: self.dates.check_in().clone(),
            check_out_field: self.dates.check_out().clone(),
            faq_open: self.faq.open_item(),
            dropdown_expanded: self.dropdown.is_expanded(),
            drawer_open: self.drawer.is_open(),
            drawer_submenus: self.drawer.open_submenus(),
            rotators: self.rotators.iter().map(FadeRotator::current).collect(),
            slider: SliderView {
                current: self.slider.current(),
                max_slide: self.slider.max_slide(),
                cards_per_view: self.slider.cards_per_view(),
                offset_px: self.slider.offset_px(),
            },
            cabin_category: self.catalog.active_category(),
            cabin: self.catalog.active_cabin(),
            last_signup: self.last_signup.clone(),
            pending_timers: doc.pending_timers().len(),
        }
    }

    /// Deliver every pending timer in the order it was armed.
    fn fire_timers(&mut self) {
        for timer in self.viewer.host_mut().take_timers() {
            match timer.ticket.kind {
                TimerKind::ScrollSettle => {
                    self.viewer.on_settle_elapsed(timer.ticket);
                }
                TimerKind::ResizeDebounce => {
                    self.slider.on_resize_settled(timer.ticket);
                }
            }
        }
    }

    fn field_value_text(&self, date: Option<NaiveDate>) -> String {
        date.map(|date| dates::format_display(date, self.dates.value_format()))
            .unwrap_or_default()
    }
}
