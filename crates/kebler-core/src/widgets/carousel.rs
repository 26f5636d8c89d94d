use crate::config::AppConfig;
use crate::host::{TimerHost, TimerKind, TimerTicket};
use std::time::Duration;
use tracing::debug;

/// Image rotator on one RV card. Wraps in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FadeRotator {
    images: usize,
    current: usize,
}

impl FadeRotator {
    pub fn new(images: usize) -> Self {
        FadeRotator { images, current: 0 }
    }

    pub fn next(&mut self) {
        if self.images > 0 {
            self.current = (self.current + 1) % self.images;
        }
    }

    pub fn previous(&mut self) {
        if self.images > 0 {
            self.current = (self.current + self.images - 1) % self.images;
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliderOptions {
    pub breakpoint_px: f32,
    pub gap_px: f32,
    pub resize_debounce: Duration,
}

impl SliderOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        SliderOptions {
            breakpoint_px: config.slider_breakpoint_px,
            gap_px: config.slider_gap_px,
            resize_debounce: Duration::from_millis(config.resize_debounce_ms),
        }
    }
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Horizontal strip of cards moved one card per click.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSlider {
    cards: usize,
    card_width_px: f32,
    viewport_width_px: f32,
    current: usize,
    options: SliderOptions,
    resize_generation: u64,
}

impl CardSlider {
    pub fn new(
        cards: usize,
        card_width_px: f32,
        viewport_width_px: f32,
        options: SliderOptions,
    ) -> Self {
        CardSlider {
            cards,
            card_width_px,
            viewport_width_px,
            current: 0,
            options,
            resize_generation: 0,
        }
    }

    pub fn cards_per_view(&self) -> usize {
        if self.viewport_width_px >= self.options.breakpoint_px {
            2
        } else {
            1
        }
    }

    pub fn max_slide(&self) -> usize {
        self.cards.saturating_sub(self.cards_per_view())
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1).min(self.max_slide());
    }

    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Leftward translation of the strip, in pixels.
    pub fn offset_px(&self) -> f32 {
        self.current as f32 * (self.card_width_px + self.options.gap_px)
    }

    /// Every resize re-arms the debounce; only the last one resets the strip.
    pub fn on_resize(&mut self, viewport_width_px: f32, timers: &mut impl TimerHost) {
        self.viewport_width_px = viewport_width_px;
        self.resize_generation = self.resize_generation.wrapping_add(1);
        timers.schedule(
            TimerTicket {
                kind: TimerKind::ResizeDebounce,
                generation: self.resize_generation,
            },
            self.options.resize_debounce,
        );
    }

    pub fn on_resize_settled(&mut self, ticket: TimerTicket) -> bool {
        if ticket.kind != TimerKind::ResizeDebounce || ticket.generation != self.resize_generation
        {
            return false;
        }
        self.current = 0;
        debug!(
            width = self.viewport_width_px,
            per_view = self.cards_per_view(),
            "Slider reset after resize"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HeadlessDocument;

    #[test]
    fn rotator_wraps_both_ways() {
        let mut rotator = FadeRotator::new(3);
        rotator.previous();
        assert_eq!(rotator.current(), 2);
        rotator.next();
        assert_eq!(rotator.current(), 0);

        let mut empty = FadeRotator::new(0);
        empty.next();
        empty.previous();
        assert_eq!(empty.current(), 0);
    }

    #[test]
    fn slider_stops_at_last_full_view() {
        let mut slider = CardSlider::new(5, 300.0, 1024.0, SliderOptions::default());
        assert_eq!(slider.cards_per_view(), 2);
        for _ in 0..10 {
            slider.next();
        }
        assert_eq!(slider.current(), 3);
        assert_eq!(slider.offset_px(), 3.0 * 320.0);

        slider.previous();
        assert_eq!(slider.current(), 2);
    }

    #[test]
    fn narrow_viewport_shows_one_card() {
        let mut slider = CardSlider::new(2, 300.0, 500.0, SliderOptions::default());
        assert_eq!(slider.max_slide(), 1);
        slider.next();
        slider.next();
        assert_eq!(slider.current(), 1);

        let mut single = CardSlider::new(1, 300.0, 1024.0, SliderOptions::default());
        single.next();
        assert_eq!(single.current(), 0);
    }

    #[test]
    fn only_latest_resize_resets_position() {
        let mut doc = HeadlessDocument::default();
        let mut slider = CardSlider::new(6, 300.0, 1024.0, SliderOptions::default());
        slider.next();
        slider.next();

        slider.on_resize(900.0, &mut doc);
        slider.on_resize(600.0, &mut doc);
        let timers = doc.take_timers();
        assert_eq!(timers.len(), 2);
        assert_eq!(timers[0].delay_ms, 250);

        assert!(!slider.on_resize_settled(timers[0].ticket));
        assert_eq!(slider.current(), 2);
        assert!(slider.on_resize_settled(timers[1].ticket));
        assert_eq!(slider.current(), 0);
        assert_eq!(slider.cards_per_view(), 1);
    }
}
