use crate::config::CarouselOptions;

/// Notifications emitted by the engine, drained by the view layer via
/// [`CarouselEngine::take_events`](crate::engine::CarouselEngine::take_events).
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselEvent {
    /// Layout was remeasured or the effective configuration changed
    Updated {
        container_width: f64,
        container_height: f64,
        slide_width: f64,
        slide_height: f64,
        settings: CarouselOptions,
    },
    /// A navigation was accepted; emitted before any state changes
    BeforeSlide { current_slide: i64, slide_to: i64 },
    /// The current index moved; the visual transition is still animating
    Slide { current_slide: i64, slide_from: i64 },
    /// The view layer reported the visual transition finished
    AfterSlide { current_slide: i64 },
    /// Fired once, after the initial layout settles
    Loaded,
}

/// Arrow key input, already stripped of modifiers by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Right,
    Up,
    Down,
}

/// Origin of a drag gesture. Touch drags never suppress scrolling on
/// perpendicular movement; mouse drags do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    Mouse,
    Touch,
}
