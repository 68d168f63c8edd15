//! Bottom sheet surface component
//!
//! Renders one sheet at its current animated height and converts key and
//! mouse input into semantic actions. The component never mutates sheet
//! state itself; snap and close requests travel through Actions to the
//! animation layer, and the content only reads the dialog context it is
//! handed.

use crate::action::Action;
use crate::component::Component;
use crate::components::header::SheetHeader;
use crate::components::layout::sheet_area;
use crate::config::Config;
use crate::model::context::DialogContext;
use crate::model::snap::SnapPoint;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

/// What a sheet hosts; decides its content and confirm semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    /// Demo content sheet whose confirmation applies after the close
    Tasks,
    /// Quit confirmation; confirming quits once the close animation ends
    QuitConfirm,
}

/// Per-draw inputs the host hands to the sheet surface
pub struct SheetRenderContext<'a> {
    /// Dialog context for the content subtree
    pub context: &'a DialogContext,
    /// Animated height fraction from the animation layer
    pub fraction: f32,
    pub config: &'a Config,
}

/// One sheet's rendering and input surface
pub struct SheetComponent {
    id: String,
    title: String,
    kind: SheetKind,
}

impl SheetComponent {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: SheetKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> SheetKind {
        self.kind
    }

    /// Draw the sheet surface at its animated height
    pub fn draw_sheet(&self, frame: &mut Frame, area: Rect, ctx: &SheetRenderContext) {
        let surface = sheet_area(area, ctx.fraction);
        if surface.height < 2 || surface.width < 4 {
            return;
        }

        frame.render_widget(Clear, surface);

        let border_type = if ctx.config.rounded_corners {
            BorderType::Rounded
        } else {
            BorderType::Plain
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(ctx.config.background_color()));
        let inner = block.inner(surface);
        frame.render_widget(block, surface);

        if inner.height == 0 {
            return;
        }

        // Grab handle on the top inner row; dimmed when dragging is locked
        let handle_style = if ctx.context.disable_drag {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Gray)
        };
        let handle = Paragraph::new(Span::styled("━━━━━━", handle_style))
            .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(handle, Rect::new(inner.x, inner.y, inner.width, 1));

        if inner.height < 2 {
            return;
        }
        let header_area = Rect::new(inner.x, inner.y + 1, inner.width, 1);
        SheetHeader::new(&self.title)
            .left(ctx.context.snap_point.label())
            .right(if ctx.context.disable_drag {
                "drag off"
            } else {
                "drag on"
            })
            .render(frame, header_area);

        if inner.height < 4 {
            return;
        }
        let body = Rect::new(
            inner.x,
            inner.y + 3,
            inner.width,
            inner.height - 3,
        );
        let lines = self.body_lines(ctx.context);
        frame.render_widget(Paragraph::new(lines), body);
    }

    fn body_lines(&self, context: &DialogContext) -> Vec<Line<'static>> {
        let help = |keys: &'static str, label: &'static str| {
            vec![
                Span::styled(
                    format!(" {} ", keys),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(label),
            ]
        };

        match self.kind {
            SheetKind::Tasks => vec![
                Line::from("  • review open pull requests"),
                Line::from("  • rotate the staging credentials"),
                Line::from("  • close out last week's incident"),
                Line::from(""),
                Line::from(Span::styled(
                    format!("  snap point: {}", context.snap_point.label()),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
                Line::from(
                    [
                        help("Enter", "Apply (after close)  "),
                        help("f/p", "Snap  "),
                        help("d", "Drag lock  "),
                        help("Esc", "Close"),
                    ]
                    .concat(),
                ),
            ],
            SheetKind::QuitConfirm => vec![
                Line::from(Span::styled(
                    "  Quit once this sheet finishes closing?",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(
                    [help("y/Enter", "Quit  "), help("n/Esc", "Cancel")].concat(),
                ),
            ],
        }
    }
}

impl Component for SheetComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match self.kind {
            SheetKind::Tasks => match key.code {
                KeyCode::Enter => Some(Action::ConfirmSheet),
                KeyCode::Esc => Some(Action::CloseSheet),
                KeyCode::Char('f') => Some(Action::SnapSheet(SnapPoint::Full)),
                KeyCode::Char('p') => Some(Action::SnapSheet(SnapPoint::Partial)),
                KeyCode::Char('d') => Some(Action::ToggleDragLock),
                _ => None,
            },
            SheetKind::QuitConfirm => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    Some(Action::ConfirmSheet)
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    Some(Action::CloseSheet)
                }
                _ => None,
            },
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::Drag(MouseButton::Left) => Some(Action::DragSheet(mouse.row)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Sheets are drawn through `draw_sheet`, which needs the animated
        // height and dialog context from the host.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseEventKind};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_tasks_keys_map_to_actions() {
        let mut sheet = SheetComponent::new("tasks", "Tasks", SheetKind::Tasks);
        assert_eq!(
            sheet.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::ConfirmSheet)
        );
        assert_eq!(
            sheet.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseSheet)
        );
        assert_eq!(
            sheet.handle_key_event(key(KeyCode::Char('f'))).unwrap(),
            Some(Action::SnapSheet(SnapPoint::Full))
        );
        assert_eq!(
            sheet.handle_key_event(key(KeyCode::Char('p'))).unwrap(),
            Some(Action::SnapSheet(SnapPoint::Partial))
        );
        assert_eq!(
            sheet.handle_key_event(key(KeyCode::Char('d'))).unwrap(),
            Some(Action::ToggleDragLock)
        );
        assert_eq!(sheet.handle_key_event(key(KeyCode::Char('z'))).unwrap(), None);
    }

    #[test]
    fn test_quit_confirm_keys() {
        let mut sheet = SheetComponent::new("quit", "Quit", SheetKind::QuitConfirm);
        assert_eq!(
            sheet.handle_key_event(key(KeyCode::Char('y'))).unwrap(),
            Some(Action::ConfirmSheet)
        );
        assert_eq!(
            sheet.handle_key_event(key(KeyCode::Char('n'))).unwrap(),
            Some(Action::CloseSheet)
        );
    }

    #[test]
    fn test_left_drag_emits_drag_action() {
        let mut sheet = SheetComponent::new("tasks", "Tasks", SheetKind::Tasks);
        let mouse = MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 10,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            sheet.handle_mouse_event(mouse).unwrap(),
            Some(Action::DragSheet(7))
        );
    }
}
