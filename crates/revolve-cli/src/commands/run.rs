use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};

use revolve_core::{AppConfig, OptionsPatch, SlideDescriptor};
use revolve_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    widgets::{
        CarouselWidget, NavigationWidget, PaginationWidget, ProgressWidget, StatusBarWidget,
    },
};

pub fn run(config: AppConfig, settings: OptionsPatch, slide_count: Option<usize>) -> Result<()> {
    let count = slide_count.unwrap_or(config.demo.slide_count);
    let slides: Vec<SlideDescriptor> = (0..count)
        .map(|i| SlideDescriptor::new(format!("Slide {}", i + 1)))
        .collect();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle("Revolve")
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(config, settings, slides);
    let event_handler = EventHandler::new(app.config.ui.tick_rate_ms);

    // Main loop
    loop {
        let now = Instant::now();

        terminal.draw(|frame| {
            let size = frame.area();
            app.sync_layout(now, size);

            {
                let hero = app.hero.engine().borrow();
                CarouselWidget::render(frame, app.areas.hero, &hero, "Revolve");
                NavigationWidget::render(frame, app.areas.navigation, &hero);
                PaginationWidget::render(frame, app.areas.pagination, &hero, app.pagination_mode());
                ProgressWidget::render(frame, app.areas.progress, &hero);
            }

            if let (Some(thumbs), Some(area)) = (&app.thumbs, app.areas.thumbs) {
                let engine = thumbs.engine().borrow();
                CarouselWidget::render(frame, area, &engine, "Thumbnails");
            }

            StatusBarWidget::render(frame, app.areas.status, &app);
        })?;

        // Handle events
        if let Some(event) = event_handler.next()? {
            match event {
                AppEvent::Key(key) => app.handle_key(key),
                AppEvent::Mouse(mouse) => app.handle_mouse(Instant::now(), mouse),
                AppEvent::Resize(_, _) => {
                    // The next draw remeasures through sync_layout
                }
                AppEvent::Tick => {}
            }
        }
        app.on_tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
