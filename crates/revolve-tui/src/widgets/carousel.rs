use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use revolve_core::{CarouselEngine, RenderSlide};

use crate::theme::GruvboxMaterial;

pub struct CarouselWidget;

impl CarouselWidget {
    pub fn render(frame: &mut Frame, area: Rect, engine: &CarouselEngine, title: &str) {
        let block = Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GruvboxMaterial::GREY0))
            .style(Style::default().bg(GruvboxMaterial::BG0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let buffer = engine.render_buffer();
        if buffer.is_empty() || inner.width == 0 || inner.height == 0 {
            return;
        }

        let vertical = engine.config().vertical;
        let extent = if vertical {
            engine.slide_height()
        } else {
            engine.slide_width()
        };
        if extent <= 0.0 {
            return;
        }

        let (translate_x, translate_y) = engine.transform();
        let start = buffer[0].index;
        let track_span = if vertical { inner.height } else { inner.width };
        let span = track_span as f64;
        let rtl = !vertical && engine.is_rtl();

        for slide in &buffer {
            // Every buffer entry sits one extent after the previous; the
            // transform shifts the whole track.
            let offset = (slide.index - start) as f64 * extent;
            let position = if vertical {
                translate_y + offset
            } else if rtl {
                span - extent - offset + translate_x
            } else {
                translate_x + offset
            };
            let end = position + extent;
            if end <= 0.0 || position >= span {
                continue;
            }

            let clip_start = position.max(0.0).round() as u16;
            let clip_end = (end.min(span).round() as u16).min(track_span);
            if clip_end <= clip_start {
                continue;
            }

            let cell = if vertical {
                Rect::new(
                    inner.x,
                    inner.y + clip_start,
                    inner.width,
                    clip_end - clip_start,
                )
            } else {
                Rect::new(
                    inner.x + clip_start,
                    inner.y,
                    clip_end - clip_start,
                    inner.height,
                )
            };

            Self::render_slide(frame, cell, engine, slide);
        }
    }

    fn render_slide(frame: &mut Frame, cell: Rect, engine: &CarouselEngine, slide: &RenderSlide) {
        let class = engine.classify(slide.index);
        let title = engine
            .slides()
            .get(slide.source)
            .map(|descriptor| descriptor.title.clone())
            .unwrap_or_default();

        let border_color = if class.is_current {
            GruvboxMaterial::ACCENT
        } else if slide.is_clone {
            GruvboxMaterial::GREY0
        } else {
            GruvboxMaterial::GREY1
        };
        let text_style = if class.is_current {
            Style::default()
                .fg(GruvboxMaterial::FG0)
                .add_modifier(Modifier::BOLD)
        } else if class.is_active {
            Style::default().fg(GruvboxMaterial::FG1)
        } else if slide.is_clone {
            Style::default().fg(GruvboxMaterial::GREY0)
        } else {
            Style::default().fg(GruvboxMaterial::GREY1)
        };
        let background = if class.is_current {
            GruvboxMaterial::BG1
        } else {
            GruvboxMaterial::BG0
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(background));
        let body = block.inner(cell);
        frame.render_widget(block, cell);

        if body.height == 0 || body.width == 0 {
            return;
        }

        let padding = (body.height.saturating_sub(1) / 2) as usize;
        let mut lines = vec![Line::default(); padding];
        lines.push(Line::from(Span::styled(title, text_style)));

        let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, body);
    }
}
