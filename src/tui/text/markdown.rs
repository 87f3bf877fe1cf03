//! Light inline markdown for text segments: headings, bullets, **bold**, `code`.

use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::tui::constants::ACCENT;

/// Style a single display line of prose. Headings and bullet markers are
/// recognized at line start; the rest goes through inline styling.
pub(crate) fn style_prose_line(line: &str) -> Vec<Span<'static>> {
    let trimmed = line.trim_start();

    if trimmed.starts_with('#') {
        let heading = trimmed.trim_start_matches('#').trim_start();
        if heading.is_empty() {
            return vec![Span::raw(line.to_string())];
        }
        return vec![Span::styled(
            heading.to_string(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )];
    }

    if let Some(item) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        let mut spans = vec![Span::styled("• ", Style::default().fg(ACCENT))];
        spans.extend(style_inline(item));
        return spans;
    }

    style_inline(line)
}

/// Inline **bold** and `code` spans. Unpaired markers render literally.
fn style_inline(s: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut rest = s;
    loop {
        let next_bold = rest.find("**");
        let next_code = rest.find('`');
        let pos = match (next_bold, next_code) {
            (Some(b), Some(c)) => b.min(c),
            (Some(b), None) => b,
            (None, Some(c)) => c,
            (None, None) => {
                if !rest.is_empty() {
                    spans.push(Span::raw(rest.to_string()));
                }
                break;
            }
        };
        if pos > 0 {
            spans.push(Span::raw(rest[..pos].to_string()));
            rest = &rest[pos..];
        }
        if rest.starts_with("**") {
            match rest[2..].find("**") {
                Some(end) => {
                    spans.push(Span::styled(
                        rest[2..2 + end].to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ));
                    rest = &rest[2 + end + 2..];
                }
                None => {
                    spans.push(Span::raw("**".to_string()));
                    rest = &rest[2..];
                }
            }
        } else if let Some(stripped) = rest.strip_prefix('`') {
            match stripped.find('`') {
                Some(end) => {
                    spans.push(Span::styled(
                        stripped[..end].to_string(),
                        Style::default().fg(ACCENT),
                    ));
                    rest = &stripped[end + 1..];
                }
                None => {
                    spans.push(Span::raw("`".to_string()));
                    rest = stripped;
                }
            }
        }
    }
    if spans.is_empty() {
        spans.push(Span::raw(String::new()));
    }
    spans
}
