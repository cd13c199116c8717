use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use revolve_core::addons::Pagination;

use crate::app::App;
use crate::theme::GruvboxMaterial;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let engine = app.hero.engine().borrow();
        let (current, total) = Pagination::fraction(&engine);
        let autoplay = if engine.config().auto_play { "on" } else { "off" };

        let state = if engine.is_dragging() {
            "DRAG"
        } else if engine.is_sliding() {
            "SLIDE"
        } else {
            "IDLE"
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | Slide {}/{} | {}", state, current, total, msg)
        } else {
            format!(
                " {} | Slide {}/{} | Autoplay: {} | Group: {}",
                state,
                current,
                total,
                autoplay,
                app.hero.group().unwrap_or("-")
            )
        };

        let help_hint = " q:quit ←/→:slide 1-9:jump g/G:ends ";
        let padding_len = area
            .width
            .saturating_sub(status_text.chars().count() as u16 + help_hint.chars().count() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default()
                    .fg(GruvboxMaterial::FG0)
                    .bg(GruvboxMaterial::BG2),
            ),
            Span::styled(
                " ".repeat(padding_len),
                Style::default().bg(GruvboxMaterial::BG2),
            ),
            Span::styled(
                help_hint,
                Style::default()
                    .fg(GruvboxMaterial::GREY2)
                    .bg(GruvboxMaterial::BG2),
            ),
        ]);

        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, area);
    }
}
