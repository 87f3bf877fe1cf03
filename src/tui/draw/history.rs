//! Chat history: message blocks with prose, highlighted code blocks, scrollbar.

use chrono::Timelike;
use ratatui::Frame;
use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use super::super::app::{App, ChatMessage};
use super::super::constants::{ACCENT, ACCENT_SECONDARY};
use super::super::syntax::highlight_code_line;
use super::super::text::{
    Segment, parse_message_segments, resolve_language, style_prose_line, wrap_message,
};

const PROSE_PREFIX: &str = "  ";
const CODE_PREFIX: &str = "  │ ";

fn label_line(label: &str, time: Option<(u32, u32)>, color: Color) -> Line<'static> {
    let text = match time {
        Some((h, m)) => format!("── {} · {:02}:{:02} ──", label, h, m),
        None => format!("── {} ──", label),
    };
    Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn add_prose_lines(lines: &mut Vec<Line<'static>>, text: &str, width: usize) {
    // Wrap to the width left after the prefix so prefixed lines still fit.
    for chunk in wrap_message(text, width.saturating_sub(PROSE_PREFIX.len())) {
        let mut spans = vec![Span::raw(PROSE_PREFIX)];
        spans.extend(style_prose_line(&chunk));
        lines.push(Line::from(spans));
    }
}

/// Render a code segment: caption with the resolved language, then each code
/// line highlighted. Long lines are clipped by the paragraph, not wrapped, so
/// indentation stays intact.
fn add_code_lines(lines: &mut Vec<Line<'static>>, language: &str, code: &str) {
    let caption_style = Style::default().fg(ACCENT_SECONDARY).add_modifier(Modifier::DIM);
    lines.push(Line::from(Span::styled(
        format!("  ┌─ {} ", language),
        caption_style,
    )));
    for code_line in code.split('\n') {
        let mut spans = vec![Span::styled(
            CODE_PREFIX.to_string(),
            Style::default().fg(ACCENT_SECONDARY),
        )];
        spans.extend(highlight_code_line(language, code_line));
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(Span::styled("  └─".to_string(), caption_style)));
}

/// Render one assistant message: segment it, resolve bare code labels, then
/// style prose and highlight code.
fn add_assistant_lines(lines: &mut Vec<Line<'static>>, content: &str, width: usize) {
    for segment in parse_message_segments(content) {
        match segment {
            Segment::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    add_prose_lines(lines, trimmed, width);
                }
            }
            Segment::Code { language, content } => {
                let label = resolve_language(language, content);
                add_code_lines(lines, label, content);
            }
        }
    }
}

fn build_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in &app.messages {
        match message {
            ChatMessage::User { content, timestamp } => {
                lines.push(label_line(
                    "You",
                    Some((timestamp.hour(), timestamp.minute())),
                    Color::DarkGray,
                ));
                add_prose_lines(&mut lines, content, width);
            }
            ChatMessage::Assistant { content } => {
                lines.push(label_line("Assistant", None, ACCENT));
                add_assistant_lines(&mut lines, content, width);
            }
            ChatMessage::Notice(text) => {
                lines.push(Line::from(Span::styled(
                    format!("  {}", text),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
            ChatMessage::Error(text) => {
                lines.push(Line::from(Span::styled(
                    format!("  {}", text),
                    Style::default().fg(Color::Red),
                )));
            }
        }
        lines.push(Line::from(""));
    }
    lines
}

/// Paragraph scroll takes a u16; longer histories pin to the last page
/// instead of wrapping around.
fn clamped_scroll(offset: usize) -> u16 {
    u16::try_from(offset).unwrap_or(u16::MAX)
}

pub(super) fn draw_history(f: &mut Frame, app: &mut App, area: Rect) {
    let width = area.width.saturating_sub(3) as usize;
    let lines = build_lines(app, width.max(10));

    app.history_line_count = lines.len();
    app.history_viewport_height = area.height as usize;
    let offset = app.scroll_offset();

    let paragraph = Paragraph::new(lines).scroll((clamped_scroll(offset), 0));
    f.render_widget(paragraph, area);

    if app.history_line_count > app.history_viewport_height {
        let mut state = ScrollbarState::new(
            app.history_line_count
                .saturating_sub(app.history_viewport_height),
        )
        .position(offset);
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 0,
                horizontal: 0,
            }),
            &mut state,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_width(line: &Line<'_>) -> usize {
        line.spans.iter().map(|s| s.content.chars().count()).sum()
    }

    #[test]
    fn prose_lines_fit_within_the_render_width() {
        let mut app = App::new(None);
        app.push_user("word ".repeat(40).trim_end().to_string());
        app.push_assistant(
            "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu".into(),
        );
        let width = 24;
        for line in build_lines(&app, width) {
            assert!(
                line_width(&line) <= width,
                "line exceeds {} columns: {:?}",
                width,
                line
            );
        }
    }

    #[test]
    fn scroll_offset_clamps_to_u16() {
        assert_eq!(clamped_scroll(0), 0);
        assert_eq!(clamped_scroll(42), 42);
        assert_eq!(clamped_scroll(usize::from(u16::MAX)), u16::MAX);
        assert_eq!(clamped_scroll(100_000), u16::MAX);
    }
}
