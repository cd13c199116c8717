//! View models for the optional controls around a carousel: prev/next
//! navigation, pagination indicators and the progress fraction.
//!
//! Each addon reads a borrowed engine and computes plain data; how that
//! data is drawn (and how activating a control maps back to `slide_to`,
//! `slide_next`, `slide_prev`) is up to the embedding view.

use crate::engine::CarouselEngine;
use crate::index::normalize_slide_index;

/// Prev/next button state.
pub struct Navigation;

impl Navigation {
    pub fn is_prev_disabled(engine: &CarouselEngine) -> bool {
        if engine.config().infinite_scroll {
            return false;
        }
        engine.current_slide() == 0
    }

    pub fn is_next_disabled(engine: &CarouselEngine) -> bool {
        let config = engine.config();
        if config.infinite_scroll {
            return false;
        }
        let count = engine.slides_count();
        if config.trim_white_space {
            // The last position that still fills the view
            return engine.current_slide() as f64
                == count as f64 - config.items_to_show.min(count as f64);
        }
        engine.current_slide() == count - 1
    }
}

/// One pagination dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub index: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    Indicator,
    Fraction,
}

pub struct Pagination;

impl Pagination {
    /// One indicator per reachable slide, `[trim_start, count - trim_end]`
    /// inclusive. Clone positions never get a dot; the active index is
    /// compared after normalization so an in-flight wraparound still
    /// highlights the right one.
    pub fn indicators(engine: &CarouselEngine) -> Vec<Indicator> {
        let count = engine.slides_count();
        if count == 0 {
            return Vec::new();
        }
        let current = normalize_slide_index(engine.current_slide(), count);
        (engine.trim_start()..=count - engine.trim_end())
            .map(|index| Indicator {
                index,
                is_active: index == current,
            })
            .collect()
    }

    /// `(current, total)` for fraction-style pagination, one-based.
    pub fn fraction(engine: &CarouselEngine) -> (i64, i64) {
        let count = engine.slides_count();
        (normalize_slide_index(engine.current_slide(), count) + 1, count)
    }
}

/// Progress through the reachable range.
pub struct Progress;

impl Progress {
    /// Percentage in `[0, 100]`.
    pub fn percentage(engine: &CarouselEngine) -> f64 {
        engine.progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Breakpoints, CarouselOptions, ConfigResolver, OptionsPatch};
    use crate::slides::SlideDescriptor;
    use std::time::{Duration, Instant};

    fn engine_with(count: usize, settings: OptionsPatch) -> (CarouselEngine, Instant) {
        let resolver =
            ConfigResolver::new(CarouselOptions::default(), settings, Breakpoints::default());
        let mut engine = CarouselEngine::new(resolver);
        engine.set_slides(
            (0..count)
                .map(|i| SlideDescriptor::new(format!("Slide {}", i + 1)))
                .collect(),
        );
        let now = Instant::now();
        engine.mount(now, false, 800.0, 800.0, 200.0);
        (engine, now)
    }

    fn settle(engine: &mut CarouselEngine, now: Instant) {
        engine.tick(now + Duration::from_millis(301));
    }

    #[test]
    fn test_prev_disabled_only_at_start() {
        let (mut engine, now) = engine_with(5, OptionsPatch::default());
        assert!(Navigation::is_prev_disabled(&engine));

        engine.slide_to(1);
        settle(&mut engine, now);
        assert!(!Navigation::is_prev_disabled(&engine));
    }

    #[test]
    fn test_next_disabled_at_last_slide() {
        let (mut engine, now) = engine_with(5, OptionsPatch::default());
        assert!(!Navigation::is_next_disabled(&engine));

        engine.slide_to(4);
        settle(&mut engine, now);
        assert!(Navigation::is_next_disabled(&engine));
    }

    #[test]
    fn test_next_disabled_respects_trim() {
        let settings = OptionsPatch {
            trim_white_space: Some(true),
            items_to_show: Some(2.0),
            ..Default::default()
        };
        let (mut engine, now) = engine_with(5, settings);
        engine.slide_to(3);
        settle(&mut engine, now);
        // 5 - min(2, 5) = 3: the trimmed end of the range
        assert!(Navigation::is_next_disabled(&engine));
    }

    #[test]
    fn test_infinite_never_disables() {
        let settings = OptionsPatch {
            infinite_scroll: Some(true),
            ..Default::default()
        };
        let (engine, _) = engine_with(5, settings);
        assert!(!Navigation::is_prev_disabled(&engine));
        assert!(!Navigation::is_next_disabled(&engine));
    }

    #[test]
    fn test_indicator_per_reachable_slide() {
        let (mut engine, now) = engine_with(5, OptionsPatch::default());
        engine.slide_to(2);
        settle(&mut engine, now);

        let dots = Pagination::indicators(&engine);
        assert_eq!(dots.len(), 5);
        assert_eq!(
            dots.iter().map(|d| d.index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4]
        );
        assert!(dots[2].is_active);
        assert_eq!(dots.iter().filter(|d| d.is_active).count(), 1);
    }

    #[test]
    fn test_indicators_skip_trimmed_range() {
        let settings = OptionsPatch {
            trim_white_space: Some(true),
            items_to_show: Some(2.0),
            ..Default::default()
        };
        let (engine, _) = engine_with(5, settings);
        let dots = Pagination::indicators(&engine);
        assert_eq!(
            dots.iter().map(|d| d.index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn test_indicator_active_during_wraparound() {
        let settings = OptionsPatch {
            infinite_scroll: Some(true),
            ..Default::default()
        };
        let (mut engine, _) = engine_with(5, settings);
        // In flight past the end: rendered index 5, real slide 0
        engine.slide_to(5);
        let dots = Pagination::indicators(&engine);
        assert!(dots[0].is_active);
    }

    #[test]
    fn test_fraction() {
        let (mut engine, now) = engine_with(5, OptionsPatch::default());
        assert_eq!(Pagination::fraction(&engine), (1, 5));

        engine.slide_to(4);
        settle(&mut engine, now);
        assert_eq!(Pagination::fraction(&engine), (5, 5));
    }

    #[test]
    fn test_progress_tracks_position() {
        let (mut engine, now) = engine_with(5, OptionsPatch::default());
        assert_eq!(Progress::percentage(&engine), 0.0);

        engine.slide_to(2);
        settle(&mut engine, now);
        assert_eq!(Progress::percentage(&engine), 50.0);
    }

    #[test]
    fn test_empty_carousel_has_no_indicators() {
        let (engine, _) = engine_with(0, OptionsPatch::default());
        assert!(Pagination::indicators(&engine).is_empty());
        assert_eq!(Progress::percentage(&engine), 0.0);
    }
}
