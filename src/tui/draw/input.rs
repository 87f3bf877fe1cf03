//! Input area: message editor with cursor, shortcut hints, status line.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::super::app::App;
use super::super::constants::{ACCENT, SPINNER_FRAMES};

const HINTS: &str =
    "Enter send · Ctrl+K comment · Ctrl+B bugs · Ctrl+O optimize · Ctrl+T tests · Ctrl+Y copy · Ctrl+C quit";

pub(super) fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" Message ", Style::default().fg(ACCENT)));
    let inner = block.inner(area);

    let hint = if app.thinking {
        format!(
            "{} waiting for assistant... (Esc to cancel)",
            SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()]
        )
    } else if let Some(ref status) = app.status {
        status.clone()
    } else {
        HINTS.to_string()
    };

    let mut lines: Vec<Line<'static>> = app
        .input
        .split('\n')
        .map(|l| Line::from(l.to_string()))
        .collect();
    lines.push(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Paragraph::new(lines).block(block), area);

    // Cursor at the edit position (line/column from byte offset).
    if !app.thinking {
        let before = &app.input[..app.input_cursor];
        let row = before.matches('\n').count();
        let col = before
            .rsplit('\n')
            .next()
            .map(|l| l.chars().count())
            .unwrap_or(0);
        let x = inner.x + col.min(inner.width.saturating_sub(1) as usize) as u16;
        let y = inner.y + (row as u16).min(inner.height.saturating_sub(1));
        f.set_cursor_position(Position::new(x, y));
    }
}
