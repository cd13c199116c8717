use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use revolve_core::addons::{Navigation, Pagination};
use revolve_core::CarouselEngine;

use crate::theme::GruvboxMaterial;

pub struct NavigationWidget;

impl NavigationWidget {
    pub fn render(frame: &mut Frame, area: Rect, engine: &CarouselEngine) {
        let prev_style = Self::button_style(Navigation::is_prev_disabled(engine));
        let next_style = Self::button_style(Navigation::is_next_disabled(engine));

        let (current, total) = Pagination::fraction(engine);
        let line = Line::from(vec![
            Span::styled("◀ prev", prev_style),
            Span::styled(
                format!("   {current} / {total}   "),
                Style::default().fg(GruvboxMaterial::GREY2),
            ),
            Span::styled("next ▶", next_style),
        ]);

        let paragraph = Paragraph::new(line)
            .alignment(Alignment::Center)
            .style(Style::default().bg(GruvboxMaterial::BG0));
        frame.render_widget(paragraph, area);
    }

    fn button_style(disabled: bool) -> Style {
        if disabled {
            Style::default().fg(GruvboxMaterial::GREY0)
        } else {
            Style::default().fg(GruvboxMaterial::ACCENT)
        }
    }
}
