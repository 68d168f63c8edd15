//! Home component - Main application screen
//!
//! Displays the expanded-count gauge, the dialog open registry, and the
//! persisted close history. The home screen is what sheets slide up over;
//! it stays rendered beneath the sheet the whole time.

use crate::action::Action;
use crate::component::Component;
use crate::model::history::CloseHistoryEntry;
use crate::model::registry::DialogStateControl;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Read-only state the home screen renders each frame
pub struct HomeRenderContext<'a> {
    pub control: &'a DialogStateControl,
    pub history: &'a [CloseHistoryEntry],
    /// Number of confirmations applied after their sheet finished closing
    pub applied: usize,
    pub status: Option<&'a str>,
}

/// Home component for the main application view
pub struct HomeComponent;

impl HomeComponent {
    pub fn new() -> Self {
        Self
    }

    /// Draw the home screen with live registry and history state
    pub fn draw_home(&self, frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        self.draw_state_panel(frame, chunks[0], ctx);
        self.draw_history_panel(frame, chunks[1], ctx.history);
        self.draw_help_bar(frame, chunks[2], ctx.status);
    }

    fn draw_state_panel(&self, frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
        let expanded = ctx.control.fully_expanded_count();
        let expanded_style = if expanded > 0 {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut lines = vec![
            Line::from(vec![
                Span::raw("fully expanded sheets: "),
                Span::styled(expanded.to_string(), expanded_style),
            ]),
            Line::from(vec![
                Span::raw("confirmations applied: "),
                Span::styled(
                    ctx.applied.to_string(),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
        ];

        let open: Vec<(String, bool)> = ctx.control.open_entries();
        if open.is_empty() {
            lines.push(Line::from(Span::styled(
                "open dialogs: none",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            let mut spans = vec![Span::raw("open dialogs: ")];
            for (i, (id, is_open)) in open.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw("  "));
                }
                let style = if *is_open {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                spans.push(Span::styled(
                    format!("{}={}", id, if *is_open { "open" } else { "closed" }),
                    style,
                ));
            }
            lines.push(Line::from(spans));
        }

        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Sheet State "),
        );
        frame.render_widget(panel, area);
    }

    fn draw_history_panel(&self, frame: &mut Frame, area: Rect, history: &[CloseHistoryEntry]) {
        let items: Vec<ListItem> = if history.is_empty() {
            vec![ListItem::new(Span::styled(
                "no closes recorded yet",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            history
                .iter()
                .map(|entry| {
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            entry.formatted_time(),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::raw("  "),
                        Span::styled(
                            entry.sheet_id.clone(),
                            Style::default().fg(Color::White),
                        ),
                        Span::raw("  closed from "),
                        Span::styled(
                            entry.last_snap_point.label(),
                            Style::default().fg(Color::Cyan),
                        ),
                        Span::raw(format!(
                            "  ({} callback{})",
                            entry.callbacks_run,
                            if entry.callbacks_run == 1 { "" } else { "s" }
                        )),
                    ]))
                })
                .collect()
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Close History "),
        );
        frame.render_widget(list, area);
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect, status: Option<&str>) {
        let line = match status {
            Some(msg) => Line::from(Span::styled(
                format!(" {}", msg),
                Style::default().fg(Color::Yellow),
            )),
            None => Line::from(vec![
                Span::styled(
                    " 1 ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Tasks sheet  "),
                Span::styled(
                    " q ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Quit sheet  "),
                Span::styled(
                    " x ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Clear history  "),
                Span::styled(
                    " Ctrl+C ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Force quit"),
            ]),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Default for HomeComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('1') => Some(Action::OpenSheet("tasks".to_string())),
            KeyCode::Char('q') => Some(Action::OpenSheet("quit".to_string())),
            KeyCode::Char('x') => Some(Action::ClearHistory),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawn through `draw_home`, which needs the live registry state.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_home_keys_open_sheets() {
        let mut home = HomeComponent::new();
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('1'))).unwrap(),
            Some(Action::OpenSheet("tasks".to_string()))
        );
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::OpenSheet("quit".to_string()))
        );
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('x'))).unwrap(),
            Some(Action::ClearHistory)
        );
        assert_eq!(home.handle_key_event(key(KeyCode::Esc)).unwrap(), None);
    }
}
