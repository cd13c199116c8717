use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Margin, Position, Rect};

use revolve_core::addons::PaginationMode;
use revolve_core::index::normalize_slide_index;
use revolve_core::{
    AppConfig, Carousel, CarouselEngine, CarouselEvent, CarouselOptions, ConfigResolver,
    GroupRegistry, OptionsPatch, Pointer, SlideDescriptor,
};

use crate::input::{handle_key_event, Action};

/// Screen regions computed once per frame; mouse hit-testing reads the
/// same rectangles the widgets were drawn into.
#[derive(Debug, Clone, Copy, Default)]
pub struct Areas {
    pub hero: Rect,
    pub navigation: Rect,
    pub pagination: Rect,
    pub progress: Rect,
    pub thumbs: Option<Rect>,
    pub status: Rect,
}

/// Application state: the hero carousel, the optional synced thumbnail
/// rail and everything the widgets read.
pub struct App {
    pub config: AppConfig,
    pub registry: Rc<GroupRegistry>,
    pub hero: Carousel,
    pub thumbs: Option<Carousel>,
    pub areas: Areas,
    pub should_quit: bool,
    pub status_message: Option<String>,
    mounted: bool,
}

impl App {
    pub fn new(config: AppConfig, settings: OptionsPatch, slides: Vec<SlideDescriptor>) -> Self {
        let registry = GroupRegistry::new();
        let breakpoints = config.breakpoints();

        let resolver = ConfigResolver::new(
            CarouselOptions::default(),
            settings.clone(),
            breakpoints.clone(),
        );
        let mut engine = CarouselEngine::new(resolver);
        engine.set_slides(slides.clone());
        let mut hero = Carousel::new(engine, Rc::clone(&registry));
        hero.set_group(Some(&config.demo.group));

        let thumbs = if config.demo.thumbnails {
            let thumb_settings = OptionsPatch {
                items_to_show: Some(5.0),
                center_mode: Some(true),
                initial_slide: settings.initial_slide,
                rtl: settings.rtl,
                infinite_scroll: settings.infinite_scroll,
                ..Default::default()
            };
            let resolver =
                ConfigResolver::new(CarouselOptions::default(), thumb_settings, breakpoints);
            let mut engine = CarouselEngine::new(resolver);
            engine.set_slides(slides);
            let mut thumbs = Carousel::new(engine, Rc::clone(&registry));
            thumbs.set_group(Some(&config.demo.group));
            Some(thumbs)
        } else {
            None
        };

        Self {
            config,
            registry,
            hero,
            thumbs,
            areas: Areas::default(),
            should_quit: false,
            status_message: None,
            mounted: false,
        }
    }

    /// Split the frame into widget regions.
    pub fn layout(&self, size: Rect) -> Areas {
        let mut constraints = vec![
            Constraint::Min(5),    // hero
            Constraint::Length(1), // navigation
            Constraint::Length(1), // pagination
            Constraint::Length(1), // progress
        ];
        if self.thumbs.is_some() {
            constraints.push(Constraint::Length(7)); // thumbnail rail
        }
        constraints.push(Constraint::Length(1)); // status bar

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(size);

        let (thumbs, status) = if self.thumbs.is_some() {
            (Some(chunks[4]), chunks[5])
        } else {
            (None, chunks[4])
        };

        Areas {
            hero: chunks[0],
            navigation: chunks[1],
            pagination: chunks[2],
            progress: chunks[3],
            thumbs,
            status,
        }
    }

    /// The drawable region inside a carousel's border.
    pub fn track(area: Rect) -> Rect {
        area.inner(Margin::new(1, 1))
    }

    /// Recompute regions for the current frame, mounting the engines on
    /// the first pass and remeasuring them when a region changed size.
    pub fn sync_layout(&mut self, now: Instant, size: Rect) {
        self.areas = self.layout(size);
        let viewport = size.width as f64;

        let hero_track = Self::track(self.areas.hero);
        Self::sync_engine(&self.hero, now, self.mounted, viewport, hero_track);

        if let (Some(thumbs), Some(area)) = (&self.thumbs, self.areas.thumbs) {
            let track = Self::track(area);
            Self::sync_engine(thumbs, now, self.mounted, viewport, track);
        }
        self.mounted = true;
    }

    fn sync_engine(carousel: &Carousel, now: Instant, mounted: bool, viewport: f64, track: Rect) {
        let mut engine = carousel.engine().borrow_mut();
        let (width, height) = (track.width as f64, track.height as f64);
        if !mounted {
            engine.mount(now, false, viewport, width, height);
        } else if engine.container_width() != width || engine.container_height() != height {
            engine.update(viewport, width, height);
        }
    }

    /// Advance timers and drain engine notifications.
    pub fn on_tick(&mut self, now: Instant) {
        self.hero.engine().borrow_mut().tick(now);
        if let Some(thumbs) = &self.thumbs {
            thumbs.engine().borrow_mut().tick(now);
        }

        let events = self.hero.engine().borrow_mut().take_events();
        for event in events {
            match event {
                CarouselEvent::Loaded => self.set_status("Ready"),
                CarouselEvent::Slide {
                    current_slide,
                    slide_from,
                } => {
                    tracing::debug!(from = slide_from, to = current_slide, "hero slide");
                }
                _ => {}
            }
        }
        if let Some(thumbs) = &self.thumbs {
            thumbs.engine().borrow_mut().take_events();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match handle_key_event(key) {
            Action::Quit => self.should_quit = true,
            Action::Arrow(arrow) => {
                self.hero.engine().borrow_mut().key(arrow);
            }
            Action::JumpFirst => self.hero.engine().borrow_mut().slide_to(0),
            Action::JumpLast => {
                let mut engine = self.hero.engine().borrow_mut();
                let last = engine.slides_count() - 1;
                engine.slide_to(last);
            }
            Action::JumpTo(index) => {
                let mut engine = self.hero.engine().borrow_mut();
                if index < engine.slides_count() {
                    engine.slide_to(index);
                }
            }
            Action::None => {}
        }
    }

    pub fn handle_mouse(&mut self, now: Instant, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);
        let hero_track = Self::track(self.areas.hero);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self.thumb_at(position) {
                    self.hero.engine().borrow_mut().slide_to(index);
                } else if hero_track.contains(position) {
                    self.hero.engine().borrow_mut().drag_start(
                        mouse.column as f64,
                        mouse.row as f64,
                        Pointer::Mouse,
                    );
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.hero
                    .engine()
                    .borrow_mut()
                    .drag_move(mouse.column as f64, mouse.row as f64);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.hero.engine().borrow_mut().drag_end(now);
            }
            MouseEventKind::ScrollDown => {
                if hero_track.contains(position) {
                    self.hero.engine().borrow_mut().wheel(now, 1.0);
                }
            }
            MouseEventKind::ScrollUp => {
                if hero_track.contains(position) {
                    self.hero.engine().borrow_mut().wheel(now, -1.0);
                }
            }
            MouseEventKind::Moved => {
                let hover = hero_track.contains(position);
                self.hero.engine().borrow_mut().set_hover(hover);
            }
            _ => {}
        }
    }

    /// Map a click in the thumbnail rail to the slide under the cursor.
    fn thumb_at(&self, position: Position) -> Option<i64> {
        let thumbs = self.thumbs.as_ref()?;
        let track = Self::track(self.areas.thumbs?);
        if !track.contains(position) {
            return None;
        }

        let engine = thumbs.engine().borrow();
        let extent = engine.slide_width();
        if extent <= 0.0 {
            return None;
        }

        let buffer = engine.render_buffer();
        let start = buffer.first()?.index;
        let (tx, _) = engine.transform();
        let rel = (position.x - track.x) as f64;
        let width = track.width as f64;

        let index = if engine.is_rtl() {
            start + ((width + tx - rel - 1.0) / extent).floor() as i64
        } else {
            start + ((rel - tx) / extent).floor() as i64
        };

        if index < start || index >= start + buffer.len() as i64 {
            return None;
        }
        Some(normalize_slide_index(index, engine.slides_count()))
    }

    pub fn pagination_mode(&self) -> PaginationMode {
        if self.config.demo.fraction_pagination {
            PaginationMode::Fraction
        } else {
            PaginationMode::Indicator
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}
