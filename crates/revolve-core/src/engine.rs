//! The slide-position state machine.
//!
//! The engine owns the current index, drag offset, trim bounds and the
//! measured extents, and computes the track transform plus the
//! active/prev/next classification every dependent view reads. All
//! mutation happens through the operations below in response to discrete
//! input events; the embedding view layer drives time by calling
//! [`CarouselEngine::tick`] once per frame.

use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::config::{CarouselOptions, ConfigResolver};
use crate::events::{ArrowKey, CarouselEvent, Pointer};
use crate::group::{GroupRegistry, HandlerId};
use crate::index::{get_in_range, normalize_slide_index};
use crate::slides::{RenderSlide, SlideDescriptor, SlideRegistry};
use crate::timer::Timer;

/// Successive wheel events closer together than this are ignored so one
/// scroll gesture triggers a single navigation.
const WHEEL_DEBOUNCE: Duration = Duration::from_millis(200);

/// Drag offset in the embedder's units (terminal cells, pixels, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Delta {
    pub x: f64,
    pub y: f64,
}

/// Inclusive index window considered "active" for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideBounds {
    pub lower: i64,
    pub upper: i64,
}

/// Classification of one rendered index against the current window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlideClass {
    pub is_active: bool,
    pub is_prev: bool,
    pub is_next: bool,
    pub is_current: bool,
}

/// Back-reference from an engine to its group channel. The channel
/// outlives the engine; the binding only holds a lookup handle plus the
/// subscription id used to exclude this instance from its own broadcasts.
pub struct GroupBinding {
    pub(crate) registry: Rc<GroupRegistry>,
    pub(crate) name: String,
    pub(crate) id: HandlerId,
}

pub struct CarouselEngine {
    resolver: ConfigResolver,
    config: CarouselOptions,
    slides: SlideRegistry,

    current_slide: i64,
    is_dragging: bool,
    is_sliding: bool,
    is_hover: bool,
    is_focus: bool,
    initialized: bool,
    layout_rtl: bool,

    container_width: f64,
    container_height: f64,
    slide_width: f64,
    slide_height: f64,
    trim_start: i64,
    trim_end: i64,

    delta: Delta,
    start_position: Delta,
    drag_pointer: Option<Pointer>,

    clock: Instant,
    transition_timer: Timer,
    loaded_timer: Timer,
    autoplay: Option<Timer>,
    last_wheel: Option<Instant>,

    group: Option<GroupBinding>,
    events: Vec<CarouselEvent>,
}

impl CarouselEngine {
    pub fn new(resolver: ConfigResolver) -> Self {
        let config = resolver.base().clone();
        Self {
            resolver,
            config,
            slides: SlideRegistry::default(),
            current_slide: 0,
            is_dragging: false,
            is_sliding: false,
            is_hover: false,
            is_focus: false,
            initialized: false,
            layout_rtl: false,
            container_width: 0.0,
            container_height: 0.0,
            slide_width: 0.0,
            slide_height: 0.0,
            trim_start: 0,
            trim_end: 1,
            delta: Delta::default(),
            start_position: Delta::default(),
            drag_pointer: None,
            clock: Instant::now(),
            // Zero defaults: a zero transition settles on the next tick
            // instead of falling back to some longer delay.
            transition_timer: Timer::unarmed(Duration::ZERO),
            loaded_timer: Timer::unarmed(Duration::ZERO),
            autoplay: None,
            last_wheel: None,
            group: None,
            events: Vec::new(),
        }
    }

    pub fn set_slides(&mut self, slides: Vec<SlideDescriptor>) {
        self.slides.set_slides(slides);
    }

    /// Bring the engine up on a mounted surface: derive the layout
    /// direction, arm autoplay, run the first layout pass, navigate to
    /// the initial slide and schedule the one-shot `Loaded` emission.
    pub fn mount(
        &mut self,
        now: Instant,
        layout_rtl: bool,
        viewport_width: f64,
        width: f64,
        height: f64,
    ) {
        self.clock = now;
        self.layout_rtl = layout_rtl;
        self.last_wheel = Some(now);
        if self.resolver.base().auto_play {
            self.start_autoplay(now);
        }
        self.update(viewport_width, width, height);
        self.slide_to(self.config.initial_slide);
        self.loaded_timer.set(now, self.config.transition());
    }

    /// Recompute the effective configuration, extents and trim bounds.
    /// Runs once after mount and again on every resize signal.
    pub fn update(&mut self, viewport_width: f64, width: f64, height: f64) {
        let was_auto_play = self.config.auto_play;
        self.config = self.resolver.resolve(viewport_width);
        if self.config.auto_play != was_auto_play {
            self.restart_autoplay(self.clock);
        }

        self.container_width = width;
        self.container_height = height;
        if self.config.vertical {
            self.slide_height = self.container_height / self.config.items_to_show;
        } else {
            self.slide_width = self.container_width / self.config.items_to_show;
        }
        self.update_trim();

        tracing::debug!(
            width,
            height,
            slide_width = self.slide_width,
            slide_height = self.slide_height,
            "layout updated"
        );
        self.events.push(CarouselEvent::Updated {
            container_width: self.container_width,
            container_height: self.container_height,
            slide_width: self.slide_width,
            slide_height: self.slide_height,
            settings: self.config.clone(),
        });
    }

    fn update_trim(&mut self) {
        let CarouselOptions {
            trim_white_space,
            items_to_show,
            center_mode,
            infinite_scroll,
            ..
        } = self.config;

        if !trim_white_space || infinite_scroll {
            self.trim_start = 0;
            self.trim_end = 1;
            return;
        }
        self.trim_start = if center_mode {
            ((items_to_show - 1.0) / 2.0).floor() as i64
        } else {
            0
        };
        self.trim_end = if center_mode {
            (items_to_show / 2.0).ceil() as i64
        } else {
            items_to_show.ceil() as i64
        };
    }

    /// Navigate to `slide_index`, broadcasting to the group.
    pub fn slide_to(&mut self, slide_index: i64) {
        self.slide(slide_index, true);
    }

    /// Navigation re-entered from a group broadcast; never rebroadcasts.
    pub fn slide_from_group(&mut self, slide_index: i64) {
        self.slide(slide_index, false);
    }

    pub fn slide_next(&mut self) {
        self.slide_to(self.current_slide + self.config.items_to_slide);
    }

    pub fn slide_prev(&mut self) {
        self.slide_to(self.current_slide - self.config.items_to_slide);
    }

    fn slide(&mut self, slide_index: i64, is_source: bool) {
        if self.is_sliding || slide_index == self.current_slide {
            return;
        }

        let count = self.slides.len() as i64;
        let index = if self.config.infinite_scroll {
            slide_index
        } else {
            get_in_range(slide_index, self.trim_start, count - self.trim_end)
        };
        let previous = self.current_slide;

        self.events.push(CarouselEvent::BeforeSlide {
            current_slide: previous,
            slide_to: index,
        });

        self.current_slide = index;
        self.is_sliding = true;
        self.transition_timer.set(self.clock, self.config.transition());

        tracing::debug!(from = previous, to = index, "slide");
        self.events.push(CarouselEvent::Slide {
            current_slide: index,
            slide_from: previous,
        });

        // Group members receive the raw requested index, not the clamped
        // one; each instance clamps against its own bounds.
        if is_source {
            if let Some(binding) = &self.group {
                binding
                    .registry
                    .publish_from(&binding.name, binding.id, slide_index);
            }
        }
    }

    /// Advance timers. The view layer calls this every frame.
    pub fn tick(&mut self, now: Instant) {
        self.clock = now;

        if self.transition_timer.fire(now) {
            self.is_sliding = false;
            self.current_slide =
                normalize_slide_index(self.current_slide, self.slides.len() as i64);
        }

        if self.loaded_timer.fire(now) {
            self.initialized = true;
            self.events.push(CarouselEvent::Loaded);
        }

        let autoplay_fired = match &mut self.autoplay {
            Some(timer) => timer.fire(now),
            None => false,
        };
        if autoplay_fired {
            self.autoplay_step(now);
        }
    }

    /// Visual-transition-end signal from the view layer. The timer path
    /// in `tick` may settle the state first or after; either order leaves
    /// the engine idle.
    pub fn notify_transition_end(&mut self) {
        self.is_sliding = false;
        self.events.push(CarouselEvent::AfterSlide {
            current_slide: self.current_slide,
        });
    }

    fn autoplay_step(&mut self, now: Instant) {
        let paused = self.is_sliding
            || self.is_dragging
            || (self.is_hover && self.config.hover_pause)
            || self.is_focus
            || !self.config.auto_play;

        if !paused {
            let count = self.slides.len() as i64;
            if self.current_slide == count - 1 && !self.config.infinite_scroll {
                self.slide_to(0);
            } else {
                self.slide_next();
            }
        }

        // Autoplay never disables itself; a paused tick just re-arms.
        let timeout = self.current_slide_timeout();
        if let Some(timer) = &mut self.autoplay {
            timer.set(now, timeout);
        }
    }

    fn current_slide_timeout(&self) -> Duration {
        let count = self.slides.len() as i64;
        let index = normalize_slide_index(self.current_slide, count).max(0) as usize;
        self.slides
            .get(index)
            .and_then(|slide| slide.duration)
            .unwrap_or_else(|| self.config.play_speed())
    }

    fn start_autoplay(&mut self, now: Instant) {
        let timeout = self.current_slide_timeout();
        let mut timer = Timer::unarmed(self.config.play_speed());
        timer.set(now, timeout);
        self.autoplay = Some(timer);
    }

    /// Re-arm autoplay after manual navigation or a drag, or start/stop
    /// it after the `auto_play` flag changed.
    pub fn restart_autoplay(&mut self, now: Instant) {
        self.clock = now;
        if self.autoplay.is_none() {
            if self.config.auto_play {
                self.start_autoplay(now);
            }
            return;
        }

        let auto_play = self.config.auto_play;
        let timeout = self.current_slide_timeout();
        if let Some(timer) = &mut self.autoplay {
            timer.stop();
            if auto_play {
                timer.set(now, timeout);
            }
        }
    }

    // --- input -----------------------------------------------------------

    /// Begin a drag gesture. Returns whether the gesture was accepted.
    pub fn drag_start(&mut self, x: f64, y: f64, pointer: Pointer) -> bool {
        let allowed = match pointer {
            Pointer::Mouse => self.config.mouse_drag,
            Pointer::Touch => self.config.touch_drag,
        };
        if !allowed {
            return false;
        }
        self.drag_pointer = Some(pointer);
        self.is_dragging = true;
        self.start_position = Delta { x, y };
        self.delta = Delta::default();
        true
    }

    /// Track pointer movement. Returns true when the event should be
    /// suppressed from default handling; perpendicular-dominant movement
    /// is treated as a scroll gesture and left alone, and touch moves are
    /// never suppressed.
    pub fn drag_move(&mut self, x: f64, y: f64) -> bool {
        if !self.is_dragging || self.is_sliding {
            return false;
        }
        let delta_x = x - self.start_position.x;
        let delta_y = y - self.start_position.y;
        if self.is_invalid_direction(delta_x, delta_y) {
            return false;
        }
        self.delta = Delta {
            x: delta_x,
            y: delta_y,
        };
        self.drag_pointer == Some(Pointer::Mouse)
    }

    fn is_invalid_direction(&self, delta_x: f64, delta_y: f64) -> bool {
        if self.config.vertical {
            delta_y.abs() <= delta_x.abs()
        } else {
            delta_x.abs() <= delta_y.abs()
        }
    }

    /// Resolve the gesture: commit a navigation when the drag crossed the
    /// commit tolerance, reset the delta and restart autoplay either way.
    pub fn drag_end(&mut self, now: Instant) {
        self.clock = now;
        if !self.is_dragging {
            return;
        }
        self.is_dragging = false;
        self.drag_pointer = None;

        let tolerance = if self.config.short_drag { 0.5 } else { 0.15 };
        if self.config.vertical {
            let dragged = ((self.delta.y / self.slide_height).abs() + tolerance).round() as i64;
            self.slide_to(self.current_slide - sign(self.delta.y) * dragged);
        } else {
            let direction = if self.is_rtl() { -1 } else { 1 } * sign(self.delta.x);
            let dragged = ((self.delta.x / self.slide_width).abs() + tolerance).round() as i64;
            self.slide_to(self.current_slide - direction * dragged);
        }

        self.delta = Delta::default();
        self.restart_autoplay(now);
    }

    /// Wheel navigation with a debounce window. Returns whether the event
    /// was consumed (it always is while wheel control is enabled).
    pub fn wheel(&mut self, now: Instant, delta_y: f64) -> bool {
        self.clock = now;
        if !self.config.wheel_control {
            return false;
        }
        if let Some(last) = self.last_wheel {
            if now.duration_since(last) < WHEEL_DEBOUNCE {
                return true;
            }
        }
        self.last_wheel = Some(now);

        match sign(-delta_y) {
            -1 => self.slide_next(),
            1 => self.slide_prev(),
            _ => {}
        }
        true
    }

    /// Arrow-key navigation mapped through orientation and rtl. All four
    /// arrows are consumed whenever keyboard control is enabled.
    pub fn key(&mut self, key: ArrowKey) -> bool {
        if !self.config.keys_control {
            return false;
        }
        if self.config.vertical {
            match key {
                ArrowKey::Up => self.slide_prev(),
                ArrowKey::Down => self.slide_next(),
                _ => {}
            }
            return true;
        }
        if self.is_rtl() {
            match key {
                ArrowKey::Right => self.slide_prev(),
                ArrowKey::Left => self.slide_next(),
                _ => {}
            }
            return true;
        }
        match key {
            ArrowKey::Right => self.slide_next(),
            ArrowKey::Left => self.slide_prev(),
            _ => {}
        }
        true
    }

    pub fn set_hover(&mut self, hover: bool) {
        self.is_hover = hover;
    }

    pub fn set_focus(&mut self, focus: bool) {
        self.is_focus = focus;
    }

    // --- derived state ----------------------------------------------------

    /// The inclusive index window considered active. The window depends
    /// on the slides shown, not on the slidable count.
    pub fn bounds(&self) -> SlideBounds {
        let siblings = self.config.items_to_show;
        let current = self.current_slide as f64;
        if self.config.center_mode {
            SlideBounds {
                lower: (current - siblings / 2.0).ceil() as i64,
                upper: (current + siblings / 2.0).floor() as i64,
            }
        } else {
            SlideBounds {
                lower: self.current_slide,
                upper: (current + siblings - 1.0).floor() as i64,
            }
        }
    }

    pub fn classify(&self, index: i64) -> SlideClass {
        let SlideBounds { lower, upper } = self.bounds();
        let step = self.config.items_to_slide;
        SlideClass {
            is_active: index >= lower && index <= upper,
            is_prev: index < lower && index >= lower - step,
            is_next: index > upper && index <= upper + step,
            is_current: index == self.current_slide,
        }
    }

    /// Track translation along (x, y) in the embedder's units.
    pub fn transform(&self) -> (f64, f64) {
        let config = &self.config;
        let direction = if self.is_rtl() { -1.0 } else { 1.0 };
        let slide_length = if config.vertical {
            self.slide_height
        } else {
            self.slide_width
        };
        let container_length = if config.vertical {
            self.container_height
        } else {
            self.container_width
        };
        let drag_delta = if config.vertical {
            self.delta.y
        } else {
            self.delta.x
        };
        let clones_space = if config.infinite_scroll {
            slide_length * self.slides.len() as f64
        } else {
            0.0
        };
        let centering_space = if config.center_mode {
            (container_length - slide_length) / 2.0
        } else {
            0.0
        };

        let translate = drag_delta
            + direction
                * (centering_space - clones_space - self.current_slide as f64 * slide_length);

        if config.vertical {
            (0.0, translate)
        } else {
            (translate, 0.0)
        }
    }

    /// Transition duration for the view layer: none until the first
    /// layout pass has settled, and only while a slide is in flight.
    pub fn transition(&self) -> Option<Duration> {
        if self.initialized && self.is_sliding {
            Some(self.config.transition())
        } else {
            None
        }
    }

    /// Progress through the reachable slide range, 0 to 100.
    pub fn progress(&self) -> f64 {
        let count = self.slides.len() as i64;
        let range = (count - self.trim_start - self.trim_end) as f64;
        if range <= 0.0 {
            return 0.0;
        }
        let current = normalize_slide_index(self.current_slide, count) as f64;
        ((current - self.trim_start as f64) * 100.0) / range
    }

    pub fn render_buffer(&self) -> Vec<RenderSlide> {
        self.slides.render_buffer(self.config.infinite_scroll)
    }

    pub fn take_events(&mut self) -> Vec<CarouselEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn set_group_binding(&mut self, binding: Option<GroupBinding>) {
        self.group = binding;
    }

    // --- accessors ---------------------------------------------------------

    pub fn config(&self) -> &CarouselOptions {
        &self.config
    }

    pub fn slides(&self) -> &SlideRegistry {
        &self.slides
    }

    pub fn current_slide(&self) -> i64 {
        self.current_slide
    }

    pub fn slides_count(&self) -> i64 {
        self.slides.len() as i64
    }

    pub fn trim_start(&self) -> i64 {
        self.trim_start
    }

    pub fn trim_end(&self) -> i64 {
        self.trim_end
    }

    pub fn is_sliding(&self) -> bool {
        self.is_sliding
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_rtl(&self) -> bool {
        self.config.rtl.unwrap_or(self.layout_rtl)
    }

    pub fn slide_width(&self) -> f64 {
        self.slide_width
    }

    pub fn slide_height(&self) -> f64 {
        self.slide_height
    }

    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    pub fn container_height(&self) -> f64 {
        self.container_height
    }
}

fn sign(value: f64) -> i64 {
    if value < 0.0 {
        -1
    } else if value > 0.0 {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Breakpoints, OptionsPatch};

    const MS: Duration = Duration::from_millis(1);

    fn engine_with(count: usize, settings: OptionsPatch) -> (CarouselEngine, Instant) {
        engine_with_breakpoints(count, settings, Breakpoints::default())
    }

    fn engine_with_breakpoints(
        count: usize,
        settings: OptionsPatch,
        breakpoints: Breakpoints,
    ) -> (CarouselEngine, Instant) {
        let resolver = ConfigResolver::new(CarouselOptions::default(), settings, breakpoints);
        let mut engine = CarouselEngine::new(resolver);
        engine.set_slides(
            (0..count)
                .map(|i| SlideDescriptor::new(format!("Slide {}", i + 1)))
                .collect(),
        );
        let now = Instant::now();
        engine.mount(now, false, 800.0, 800.0, 200.0);
        engine.take_events();
        (engine, now)
    }

    fn settle(engine: &mut CarouselEngine, now: Instant) -> Instant {
        let later = now + 301 * MS;
        engine.tick(later);
        later
    }

    #[test]
    fn test_slide_to_event_sequence() {
        let (mut engine, now) = engine_with(5, OptionsPatch::default());
        engine.slide_to(4);

        assert_eq!(
            engine.take_events(),
            vec![
                CarouselEvent::BeforeSlide {
                    current_slide: 0,
                    slide_to: 4
                },
                CarouselEvent::Slide {
                    current_slide: 4,
                    slide_from: 0
                },
            ]
        );
        assert_eq!(engine.current_slide(), 4);
        assert!(engine.is_sliding());

        settle(&mut engine, now);
        assert!(!engine.is_sliding());
        assert_eq!(engine.current_slide(), 4);
    }

    #[test]
    fn test_slide_to_current_index_is_a_noop() {
        let (mut engine, _) = engine_with(5, OptionsPatch::default());
        engine.slide_to(0);
        assert!(engine.take_events().is_empty());
        assert!(!engine.is_sliding());
    }

    #[test]
    fn test_slide_to_while_sliding_is_a_noop() {
        let (mut engine, _) = engine_with(5, OptionsPatch::default());
        engine.slide_to(1);
        engine.take_events();

        engine.slide_to(3);
        assert!(engine.take_events().is_empty());
        assert_eq!(engine.current_slide(), 1);
    }

    #[test]
    fn test_slide_to_clamps_without_infinite_scroll() {
        let (mut engine, _) = engine_with(5, OptionsPatch::default());
        engine.slide_to(99);
        assert_eq!(engine.current_slide(), 4);

        let (mut engine, _) = engine_with(5, OptionsPatch::default());
        engine.slide_to(-3);
        assert_eq!(engine.current_slide(), 0);
    }

    #[test]
    fn test_infinite_scroll_settles_normalized() {
        let settings = OptionsPatch {
            infinite_scroll: Some(true),
            ..Default::default()
        };
        let (mut engine, now) = engine_with(5, settings);

        engine.slide_to(5);
        assert_eq!(engine.current_slide(), 5);

        settle(&mut engine, now);
        assert_eq!(engine.current_slide(), 0);
    }

    #[test]
    fn test_transition_end_emits_after_slide() {
        let (mut engine, _) = engine_with(5, OptionsPatch::default());
        engine.slide_to(2);
        engine.take_events();

        engine.notify_transition_end();
        assert!(!engine.is_sliding());
        assert_eq!(
            engine.take_events(),
            vec![CarouselEvent::AfterSlide { current_slide: 2 }]
        );
    }

    #[test]
    fn test_timer_and_transition_end_in_either_order() {
        let (mut engine, now) = engine_with(5, OptionsPatch::default());
        engine.slide_to(2);
        let now = settle(&mut engine, now);
        engine.notify_transition_end();
        assert!(!engine.is_sliding());

        engine.slide_to(3);
        engine.notify_transition_end();
        settle(&mut engine, now);
        assert!(!engine.is_sliding());
        assert_eq!(engine.current_slide(), 3);
    }

    #[test]
    fn test_trim_with_whitespace_disabled() {
        let (engine, _) = engine_with(5, OptionsPatch::default());
        assert_eq!(engine.trim_start(), 0);
        assert_eq!(engine.trim_end(), 1);
    }

    #[test]
    fn test_trim_whitespace_limits_reachable_range() {
        let settings = OptionsPatch {
            trim_white_space: Some(true),
            items_to_show: Some(2.0),
            ..Default::default()
        };
        let (mut engine, _) = engine_with(5, settings);
        assert_eq!(engine.trim_end(), 2);

        engine.slide_to(99);
        assert_eq!(engine.current_slide(), 3);
    }

    #[test]
    fn test_trim_center_mode() {
        let settings = OptionsPatch {
            trim_white_space: Some(true),
            center_mode: Some(true),
            items_to_show: Some(3.0),
            ..Default::default()
        };
        let (engine, _) = engine_with(7, settings);
        assert_eq!(engine.trim_start(), 1);
        assert_eq!(engine.trim_end(), 2);
    }

    #[test]
    fn test_infinite_scroll_forces_no_trim() {
        let settings = OptionsPatch {
            trim_white_space: Some(true),
            infinite_scroll: Some(true),
            items_to_show: Some(2.0),
            ..Default::default()
        };
        let (engine, _) = engine_with(5, settings);
        assert_eq!(engine.trim_start(), 0);
        assert_eq!(engine.trim_end(), 1);
    }

    #[test]
    fn test_bounds_non_center() {
        let settings = OptionsPatch {
            items_to_show: Some(2.0),
            ..Default::default()
        };
        let (engine, _) = engine_with(5, settings);
        assert_eq!(engine.bounds(), SlideBounds { lower: 0, upper: 1 });
    }

    #[test]
    fn test_bounds_center() {
        let settings = OptionsPatch {
            items_to_show: Some(3.0),
            center_mode: Some(true),
            ..Default::default()
        };
        let (engine, _) = engine_with(5, settings);
        assert_eq!(engine.bounds(), SlideBounds { lower: -1, upper: 1 });
    }

    #[test]
    fn test_classify() {
        let (mut engine, now) = engine_with(5, OptionsPatch::default());
        engine.slide_to(2);
        settle(&mut engine, now);

        assert!(engine.classify(2).is_active);
        assert!(engine.classify(2).is_current);
        assert!(engine.classify(1).is_prev);
        assert!(engine.classify(3).is_next);
        let far = engine.classify(4);
        assert!(!far.is_active && !far.is_prev && !far.is_next);
    }

    #[test]
    fn test_transform_basic() {
        let (mut engine, _) = engine_with(5, OptionsPatch::default());
        engine.slide_to(2);
        // slide width 800, current 2: translate -1600 on x
        assert_eq!(engine.transform(), (-1600.0, 0.0));
    }

    #[test]
    fn test_transform_rtl_flips_direction() {
        let settings = OptionsPatch {
            rtl: Some(true),
            ..Default::default()
        };
        let (mut engine, _) = engine_with(5, settings);
        engine.slide_to(2);
        assert_eq!(engine.transform(), (1600.0, 0.0));
    }

    #[test]
    fn test_transform_infinite_offsets_clone_buffer() {
        let settings = OptionsPatch {
            infinite_scroll: Some(true),
            ..Default::default()
        };
        let (engine, _) = engine_with(5, settings);
        // 5 clones before the real range: 5 * 800
        assert_eq!(engine.transform(), (-4000.0, 0.0));
    }

    #[test]
    fn test_transform_center_mode() {
        let settings = OptionsPatch {
            items_to_show: Some(2.0),
            center_mode: Some(true),
            ..Default::default()
        };
        let (engine, _) = engine_with(5, settings);
        // slide width 400, centering (800 - 400) / 2 = 200
        assert_eq!(engine.transform(), (200.0, 0.0));
    }

    #[test]
    fn test_transform_vertical_axis() {
        let settings = OptionsPatch {
            vertical: Some(true),
            ..Default::default()
        };
        let (mut engine, _) = engine_with(5, settings);
        engine.slide_to(1);
        // slide height 200, current 1
        assert_eq!(engine.transform(), (0.0, -200.0));
    }

    #[test]
    fn test_transition_style_lifecycle() {
        let (mut engine, now) = engine_with(5, OptionsPatch::default());
        // Not initialized until the loaded window elapsed
        assert_eq!(engine.transition(), None);

        let now = settle(&mut engine, now);
        assert!(engine.is_initialized());
        assert_eq!(
            engine.take_events(),
            vec![CarouselEvent::Loaded]
        );
        assert_eq!(engine.transition(), None);

        engine.slide_to(1);
        assert_eq!(engine.transition(), Some(Duration::from_millis(300)));
        settle(&mut engine, now);
        assert_eq!(engine.transition(), None);
    }

    #[test]
    fn test_loaded_fires_once() {
        let (mut engine, now) = engine_with(5, OptionsPatch::default());
        let now = settle(&mut engine, now);
        assert_eq!(engine.take_events(), vec![CarouselEvent::Loaded]);
        engine.tick(now + 1000 * MS);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_initial_slide() {
        let resolver = ConfigResolver::new(
            CarouselOptions::default(),
            OptionsPatch {
                initial_slide: Some(3),
                ..Default::default()
            },
            Breakpoints::default(),
        );
        let mut engine = CarouselEngine::new(resolver);
        engine.set_slides((0..5).map(|i| SlideDescriptor::new(format!("{i}"))).collect());
        engine.mount(Instant::now(), false, 800.0, 800.0, 200.0);
        assert_eq!(engine.current_slide(), 3);
    }

    #[test]
    fn test_breakpoint_resize_reresolves_config() {
        let mut table = std::collections::BTreeMap::new();
        table.insert(
            600,
            OptionsPatch {
                items_to_show: Some(2.0),
                ..Default::default()
            },
        );
        let (mut engine, _) = engine_with_breakpoints(
            5,
            OptionsPatch::default(),
            Breakpoints::new(table),
        );
        assert_eq!(engine.config().items_to_show, 2.0);
        assert_eq!(engine.slide_width(), 400.0);

        engine.update(500.0, 500.0, 200.0);
        assert_eq!(engine.config().items_to_show, 1.0);
        assert_eq!(engine.slide_width(), 500.0);
    }

    #[test]
    fn test_update_emits_measurements() {
        let (mut engine, _) = engine_with(5, OptionsPatch::default());
        engine.update(800.0, 640.0, 180.0);
        let events = engine.take_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            CarouselEvent::Updated {
                container_width,
                container_height,
                slide_width,
                settings,
                ..
            } => {
                assert_eq!(*container_width, 640.0);
                assert_eq!(*container_height, 180.0);
                assert_eq!(*slide_width, 640.0);
                assert_eq!(settings.items_to_show, 1.0);
            }
            other => panic!("expected Updated, got {other:?}"),
        }
    }

    #[test]
    fn test_wheel_debounce_window() {
        let (mut engine, now) = engine_with(5, OptionsPatch::default());
        let now = settle(&mut engine, now);

        assert!(engine.wheel(now, 1.0));
        let now = settle(&mut engine, now);
        assert_eq!(engine.current_slide(), 1);

        // 100ms apart: ignored but still consumed
        assert!(engine.wheel(now, 1.0));
        let now = now + 100 * MS;
        assert!(engine.wheel(now, 1.0));
        let now = settle(&mut engine, now);
        assert_eq!(engine.current_slide(), 2);

        // Past the 200ms window: navigates again
        let now = now + 250 * MS;
        engine.wheel(now, -1.0);
        settle(&mut engine, now);
        assert_eq!(engine.current_slide(), 1);
    }

    #[test]
    fn test_wheel_disabled_is_not_consumed() {
        let settings = OptionsPatch {
            wheel_control: Some(false),
            ..Default::default()
        };
        let (mut engine, now) = engine_with(5, settings);
        assert!(!engine.wheel(now + 1000 * MS, 1.0));
        assert_eq!(engine.current_slide(), 0);
    }

    #[test]
    fn test_keys_horizontal() {
        let (mut engine, now) = engine_with(5, OptionsPatch::default());
        assert!(engine.key(ArrowKey::Right));
        let now = settle(&mut engine, now);
        assert_eq!(engine.current_slide(), 1);

        assert!(engine.key(ArrowKey::Left));
        settle(&mut engine, now);
        assert_eq!(engine.current_slide(), 0);

        // Perpendicular arrows are consumed but do not navigate
        assert!(engine.key(ArrowKey::Up));
        assert_eq!(engine.current_slide(), 0);
    }

    #[test]
    fn test_keys_rtl_swaps_horizontal() {
        let settings = OptionsPatch {
            rtl: Some(true),
            ..Default::default()
        };
        let (mut engine, now) = engine_with(5, settings);
        engine.key(ArrowKey::Left);
        settle(&mut engine, now);
        assert_eq!(engine.current_slide(), 1);
    }

    #[test]
    fn test_keys_vertical() {
        let settings = OptionsPatch {
            vertical: Some(true),
            ..Default::default()
        };
        let (mut engine, now) = engine_with(5, settings);
        engine.key(ArrowKey::Down);
        settle(&mut engine, now);
        assert_eq!(engine.current_slide(), 1);
    }

    #[test]
    fn test_keys_disabled() {
        let settings = OptionsPatch {
            keys_control: Some(false),
            ..Default::default()
        };
        let (mut engine, _) = engine_with(5, settings);
        assert!(!engine.key(ArrowKey::Right));
        assert_eq!(engine.current_slide(), 0);
    }

    #[test]
    fn test_drag_commits_past_tolerance() {
        let (mut engine, now) = engine_with(5, OptionsPatch::default());
        let now = settle(&mut engine, now);

        // slide width 800; a 500px leftwards drag with shortDrag rounds
        // to one slide forward
        assert!(engine.drag_start(600.0, 100.0, Pointer::Mouse));
        assert!(engine.drag_move(100.0, 100.0));
        engine.drag_end(now);
        assert_eq!(engine.current_slide(), 1);
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_short_drag_tolerance_difference() {
        let settings = OptionsPatch {
            short_drag: Some(false),
            ..Default::default()
        };
        let (mut engine, now) = engine_with(5, settings);
        let now = settle(&mut engine, now);

        // 0.25 slides dragged + 0.15 tolerance rounds to zero
        engine.drag_start(600.0, 100.0, Pointer::Mouse);
        engine.drag_move(400.0, 100.0);
        engine.drag_end(now);
        assert_eq!(engine.current_slide(), 0);
    }

    #[test]
    fn test_drag_rtl_flips_horizontal_sign() {
        let settings = OptionsPatch {
            rtl: Some(true),
            ..Default::default()
        };
        let (mut engine, now) = engine_with(5, settings);
        let now = settle(&mut engine, now);

        // Dragging rightwards advances under rtl
        engine.drag_start(100.0, 100.0, Pointer::Mouse);
        engine.drag_move(600.0, 100.0);
        engine.drag_end(now);
        assert_eq!(engine.current_slide(), 1);
    }

    #[test]
    fn test_perpendicular_drag_is_ignored() {
        let (mut engine, now) = engine_with(5, OptionsPatch::default());
        let now = settle(&mut engine, now);

        engine.drag_start(100.0, 10.0, Pointer::Touch);
        // Mostly vertical movement on a horizontal carousel: scroll, not drag
        assert!(!engine.drag_move(150.0, 400.0));
        engine.drag_end(now);
        assert_eq!(engine.current_slide(), 0);
    }

    #[test]
    fn test_drag_gates_by_pointer_kind() {
        let settings = OptionsPatch {
            mouse_drag: Some(false),
            ..Default::default()
        };
        let (mut engine, _) = engine_with(5, settings);
        assert!(!engine.drag_start(0.0, 0.0, Pointer::Mouse));
        assert!(engine.drag_start(0.0, 0.0, Pointer::Touch));
    }

    #[test]
    fn test_drag_delta_feeds_transform() {
        let (mut engine, _) = engine_with(5, OptionsPatch::default());
        engine.drag_start(500.0, 100.0, Pointer::Mouse);
        engine.drag_move(380.0, 100.0);
        assert_eq!(engine.transform(), (-120.0, 0.0));
    }

    #[test]
    fn test_autoplay_advances_and_rearms() {
        let settings = OptionsPatch {
            auto_play: Some(true),
            ..Default::default()
        };
        let (mut engine, now) = engine_with(5, settings);

        engine.tick(now + 2000 * MS);
        assert_eq!(engine.current_slide(), 1);
        engine.tick(now + 2301 * MS); // settle transition
        engine.tick(now + 4000 * MS);
        assert_eq!(engine.current_slide(), 2);
    }

    #[test]
    fn test_autoplay_hover_pause_skips_ticks() {
        let settings = OptionsPatch {
            auto_play: Some(true),
            ..Default::default()
        };
        let (mut engine, now) = engine_with(5, settings);

        engine.set_hover(true);
        engine.tick(now + 2000 * MS);
        assert_eq!(engine.current_slide(), 0);

        // Timer re-armed while paused; resumes after hover ends
        engine.set_hover(false);
        engine.tick(now + 4000 * MS);
        assert_eq!(engine.current_slide(), 1);
    }

    #[test]
    fn test_autoplay_focus_pauses() {
        let settings = OptionsPatch {
            auto_play: Some(true),
            ..Default::default()
        };
        let (mut engine, now) = engine_with(5, settings);
        engine.set_focus(true);
        engine.tick(now + 2000 * MS);
        assert_eq!(engine.current_slide(), 0);
    }

    #[test]
    fn test_autoplay_rewinds_at_end_without_infinite() {
        let settings = OptionsPatch {
            auto_play: Some(true),
            ..Default::default()
        };
        let (mut engine, now) = engine_with(3, settings);
        engine.slide_to(2);
        let now = settle(&mut engine, now);

        engine.restart_autoplay(now);
        engine.tick(now + 2000 * MS);
        assert_eq!(engine.current_slide(), 0);
    }

    #[test]
    fn test_autoplay_per_slide_duration_override() {
        let resolver = ConfigResolver::new(
            CarouselOptions::default(),
            OptionsPatch {
                auto_play: Some(true),
                ..Default::default()
            },
            Breakpoints::default(),
        );
        let mut engine = CarouselEngine::new(resolver);
        engine.set_slides(vec![
            SlideDescriptor::with_duration("fast", Duration::from_millis(500)),
            SlideDescriptor::new("normal"),
            SlideDescriptor::new("normal"),
        ]);
        let now = Instant::now();
        engine.mount(now, false, 800.0, 800.0, 200.0);

        // First interval uses the slide override
        engine.tick(now + 500 * MS);
        assert_eq!(engine.current_slide(), 1);
        engine.tick(now + 801 * MS);

        // Second interval falls back to play_speed
        engine.tick(now + 2000 * MS);
        assert_eq!(engine.current_slide(), 1);
        engine.tick(now + 2500 * MS);
        assert_eq!(engine.current_slide(), 2);
    }

    #[test]
    fn test_progress_endpoints() {
        let (mut engine, now) = engine_with(5, OptionsPatch::default());
        assert_eq!(engine.progress(), 0.0);

        engine.slide_to(4);
        settle(&mut engine, now);
        assert_eq!(engine.progress(), 100.0);
    }

    #[test]
    fn test_progress_respects_trim() {
        let settings = OptionsPatch {
            trim_white_space: Some(true),
            items_to_show: Some(2.0),
            ..Default::default()
        };
        let (mut engine, now) = engine_with(5, settings);
        engine.slide_to(3);
        settle(&mut engine, now);
        assert_eq!(engine.progress(), 100.0);
    }
}
