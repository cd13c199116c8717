use ratatui::{
    layout::Rect,
    style::Style,
    widgets::Gauge,
    Frame,
};

use revolve_core::addons::Progress;
use revolve_core::CarouselEngine;

use crate::theme::GruvboxMaterial;

pub struct ProgressWidget;

impl ProgressWidget {
    pub fn render(frame: &mut Frame, area: Rect, engine: &CarouselEngine) {
        // Mid-flight in infinite mode the raw value can leave [0, 100]
        let percent = Progress::percentage(engine).clamp(0.0, 100.0);

        let gauge = Gauge::default()
            .gauge_style(
                Style::default()
                    .fg(GruvboxMaterial::AQUA)
                    .bg(GruvboxMaterial::BG2),
            )
            .ratio(percent / 100.0)
            .label(format!("{percent:.0}%"));
        frame.render_widget(gauge, area);
    }
}
