use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use revolve_core::addons::{Pagination, PaginationMode};
use revolve_core::CarouselEngine;

use crate::theme::GruvboxMaterial;

pub struct PaginationWidget;

impl PaginationWidget {
    pub fn render(frame: &mut Frame, area: Rect, engine: &CarouselEngine, mode: PaginationMode) {
        let line = match mode {
            PaginationMode::Indicator => Line::from(Self::dots(engine)),
            PaginationMode::Fraction => {
                let (current, total) = Pagination::fraction(engine);
                Line::from(Span::styled(
                    format!("{current} / {total}"),
                    Style::default().fg(GruvboxMaterial::YELLOW),
                ))
            }
        };

        let paragraph = Paragraph::new(line)
            .alignment(Alignment::Center)
            .style(Style::default().bg(GruvboxMaterial::BG0));
        frame.render_widget(paragraph, area);
    }

    fn dots(engine: &CarouselEngine) -> Vec<Span<'static>> {
        Pagination::indicators(engine)
            .iter()
            .map(|dot| {
                if dot.is_active {
                    Span::styled("● ", Style::default().fg(GruvboxMaterial::YELLOW))
                } else {
                    Span::styled("○ ", Style::default().fg(GruvboxMaterial::GREY1))
                }
            })
            .collect()
    }
}
