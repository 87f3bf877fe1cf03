//! Syntax highlighting for code blocks using syntect, keyed by the
//! classifier's final label.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, ThemeSet};
use syntect::parsing::SyntaxSet;

use super::constants::ACCENT_SECONDARY;

static SYNTAX_SET: std::sync::OnceLock<SyntaxSet> = std::sync::OnceLock::new();
static THEME_SET: std::sync::OnceLock<ThemeSet> = std::sync::OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

/// Convert syntect Color to ratatui Color. Alpha 0 => None (colourless).
fn translate_colour(c: syntect::highlighting::Color) -> Option<Color> {
    let syntect::highlighting::Color { r, g, b, a } = c;
    if a > 0 { Some(Color::Rgb(r, g, b)) } else { None }
}

fn translate_font_style(f: FontStyle) -> Modifier {
    let mut m = Modifier::empty();
    if f.contains(FontStyle::BOLD) {
        m.insert(Modifier::BOLD);
    }
    if f.contains(FontStyle::ITALIC) {
        m.insert(Modifier::ITALIC);
    }
    if f.contains(FontStyle::UNDERLINE) {
        m.insert(Modifier::UNDERLINED);
    }
    m
}

fn translate_style(s: syntect::highlighting::Style) -> Style {
    let fg = translate_colour(s.foreground).unwrap_or(ACCENT_SECONDARY);
    let mut style = Style::default()
        .fg(fg)
        .add_modifier(translate_font_style(s.font_style));
    if let Some(b) = translate_colour(s.background) {
        style = style.bg(b);
    }
    style
}

/// Map a resolved language label to a syntect file extension. The labels are
/// the classifier's closed set plus the common fence tags it trusts as-is.
fn label_to_extension(label: &str) -> &'static str {
    match label.trim().to_lowercase().as_str() {
        "java" => "java",
        "py" | "python" => "py",
        "js" | "javascript" => "js",
        "ts" | "typescript" => "ts",
        "html" => "html",
        "css" => "css",
        "sql" => "sql",
        "json" => "json",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "cs" | "csharp" => "cs",
        "rs" | "rust" => "rs",
        "go" | "golang" => "go",
        "rb" | "ruby" => "rb",
        "php" => "php",
        "sh" | "bash" | "zsh" => "sh",
        "yaml" | "yml" => "yml",
        "xml" => "xml",
        "md" | "markdown" => "md",
        _ => "plain",
    }
}

fn plain_span(line: &str) -> Vec<Span<'static>> {
    vec![Span::styled(
        line.to_string(),
        Style::default().fg(ACCENT_SECONDARY),
    )]
}

/// Highlight one line of code. Unknown labels and highlighter errors fall
/// back to a uniformly styled span; this never fails.
pub(super) fn highlight_code_line(label: &str, line: &str) -> Vec<Span<'static>> {
    let extension = label_to_extension(label);
    if extension == "plain" {
        return plain_span(line);
    }

    let ps = syntax_set();
    let Some(syntax) = ps.find_syntax_by_extension(extension) else {
        return plain_span(line);
    };
    let ts = theme_set();
    let theme = match ts
        .themes
        .get("base16-ocean.dark")
        .or_else(|| ts.themes.values().next())
    {
        Some(theme) => theme,
        None => return plain_span(line),
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    let with_ending = if line.ends_with('\n') {
        line.to_string()
    } else {
        format!("{}\n", line)
    };

    let ranges = match highlighter.highlight_line(&with_ending, ps) {
        Ok(ranges) => ranges,
        Err(_) => return plain_span(line),
    };

    let mut spans = Vec::new();
    for (style, content) in ranges {
        let s = content.trim_end_matches('\n').to_string();
        if s.is_empty() {
            continue;
        }
        spans.push(Span::styled(s, translate_style(style)));
    }
    if spans.is_empty() {
        spans.push(Span::raw(String::new()));
    }
    spans
}
