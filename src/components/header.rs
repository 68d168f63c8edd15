//! Sheet header - pure layout, no state
//!
//! A one-line header with a centered title and optional left/right slots,
//! the presentational top edge of a sheet's content area.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// One-line sheet header with optional side slots
pub struct SheetHeader<'a> {
    title: &'a str,
    left: Option<&'a str>,
    right: Option<&'a str>,
}

impl<'a> SheetHeader<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            left: None,
            right: None,
        }
    }

    pub fn left(mut self, text: &'a str) -> Self {
        self.left = Some(text);
        self
    }

    pub fn right(mut self, text: &'a str) -> Self {
        self.right = Some(text);
        self
    }

    /// Render into a one-line area. Slots sit one cell in from each edge;
    /// the title is centered independently of them.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let line = Rect::new(area.x, area.y, area.width, 1);

        let title_width = self.title.width() as u16;
        let title_x = line.x + line.width.saturating_sub(title_width) / 2;
        let title = Paragraph::new(Line::from(Span::styled(
            self.title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(
            title,
            Rect::new(title_x, line.y, title_width.min(line.width), 1),
        );

        if let Some(left) = self.left {
            let width = (left.width() as u16).min(line.width.saturating_sub(1));
            let slot = Rect::new(line.x.saturating_add(1), line.y, width, 1);
            frame.render_widget(
                Paragraph::new(Span::styled(left, Style::default().fg(Color::Cyan))),
                slot,
            );
        }

        if let Some(right) = self.right {
            let width = (right.width() as u16).min(line.width);
            let slot_x = (line.x + line.width).saturating_sub(width + 1);
            frame.render_widget(
                Paragraph::new(Span::styled(right, Style::default().fg(Color::Cyan))),
                Rect::new(slot_x.max(line.x), line.y, width, 1),
            );
        }
    }
}
