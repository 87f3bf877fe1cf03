//! Header: app identity, loaded code context, token usage.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::app as identity;

use super::super::app::App;
use super::super::constants::{ACCENT, ACCENT_SECONDARY, SPINNER_FRAMES};

pub(super) fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let logo = if app.thinking {
        SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()]
    } else {
        "◆"
    };

    let mut spans = vec![
        Span::styled(
            format!("{} {} ", logo, identity::NAME),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("v{}", identity::VERSION),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(app.backend.clone(), Style::default().fg(Color::DarkGray)),
    ];

    if let Some(ref tokens) = app.tokens {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(
                "tokens in:{} max:{} out:{}",
                tokens.estimated_input_tokens,
                tokens.max_tokens_used,
                tokens.estimated_output_tokens
            ),
            Style::default().fg(ACCENT_SECONDARY),
        ));
    }

    let mut lines = vec![Line::from(spans)];
    if let Some(ref code) = app.code {
        lines.push(Line::from(Span::styled(
            format!("  {} · {}", code.path.display(), code.language),
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}
