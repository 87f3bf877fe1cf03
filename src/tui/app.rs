//! TUI application state: messages, input, scroll, code context.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::core::api::{HistoryEntry, HistoryRole, TokensInfo};
use crate::core::languages;
use crate::core::prompts;

use super::text::{Segment, parse_message_segments};

/// Messages displayed in the history.
#[derive(Clone, Debug)]
pub(crate) enum ChatMessage {
    User {
        content: String,
        timestamp: DateTime<Local>,
    },
    Assistant {
        content: String,
    },
    /// Transient status line (quick action progress and similar).
    Notice(String),
    Error(String),
}

/// Source file loaded as "current code" for quick actions and chat context.
#[derive(Clone, Debug)]
pub(crate) struct CodeContext {
    pub path: PathBuf,
    pub language: String,
    pub text: String,
}

impl CodeContext {
    /// Read a file and pick its language from the extension, unless overridden.
    pub fn load(path: PathBuf, language_override: Option<String>) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(&path)?;
        let language = language_override.unwrap_or_else(|| {
            languages::language_for_extension(&path)
                .unwrap_or("text")
                .to_string()
        });
        Ok(Self {
            path,
            language,
            text,
        })
    }
}

/// Scroll position: a specific line offset, or "follow new content".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ScrollPosition {
    Line(usize),
    #[default]
    Bottom,
}

pub(crate) struct App {
    pub(crate) messages: Vec<ChatMessage>,
    pub(crate) input: String,
    /// Byte index of the cursor in `input` (always on a char boundary).
    pub(crate) input_cursor: usize,
    pub(crate) scroll: ScrollPosition,
    pub(crate) thinking: bool,
    pub(crate) spinner_frame: usize,
    /// Token usage from the most recent reply.
    pub(crate) tokens: Option<TokensInfo>,
    pub(crate) code: Option<CodeContext>,
    /// Backend base URL, shown in the header.
    pub(crate) backend: String,
    /// Transient status shown in the input hint line.
    pub(crate) status: Option<String>,
    /// Rendered history height bookkeeping, updated on each draw.
    pub(crate) history_line_count: usize,
    pub(crate) history_viewport_height: usize,
}

impl App {
    pub fn new(code: Option<CodeContext>) -> Self {
        Self {
            messages: Vec::new(),
            input: String::new(),
            input_cursor: 0,
            scroll: ScrollPosition::Bottom,
            thinking: false,
            spinner_frame: 0,
            tokens: None,
            code: None,
            backend: String::new(),
            status: None,
            history_line_count: 0,
            history_viewport_height: 0,
        }
        .with_code(code)
    }

    fn with_code(mut self, code: Option<CodeContext>) -> Self {
        if let Some(ref ctx) = code {
            self.messages.push(ChatMessage::Notice(format!(
                "Loaded {} ({}, {} lines)",
                ctx.path.display(),
                ctx.language,
                ctx.text.lines().count()
            )));
        }
        self.code = code;
        self
    }

    pub fn push_user(&mut self, content: String) {
        self.messages.push(ChatMessage::User {
            content,
            timestamp: Local::now(),
        });
        self.scroll = ScrollPosition::Bottom;
    }

    pub fn push_assistant(&mut self, content: String) {
        self.messages.push(ChatMessage::Assistant { content });
        self.scroll = ScrollPosition::Bottom;
    }

    pub fn push_notice(&mut self, text: String) {
        self.messages.push(ChatMessage::Notice(text));
        self.scroll = ScrollPosition::Bottom;
    }

    pub fn push_error(&mut self, text: String) {
        self.messages.push(ChatMessage::Error(text));
        self.scroll = ScrollPosition::Bottom;
    }

    /// Drop the most recent notice, if any (quick action progress lines).
    pub fn remove_last_notice(&mut self) {
        if matches!(self.messages.last(), Some(ChatMessage::Notice(_))) {
            self.messages.pop();
        }
    }

    pub fn clear_chat(&mut self) {
        self.messages.clear();
        self.tokens = None;
        self.status = None;
        self.scroll = ScrollPosition::Bottom;
    }

    /// Conversation history window for the next request.
    pub fn history_entries(&self) -> Vec<HistoryEntry> {
        let entries: Vec<HistoryEntry> = self
            .messages
            .iter()
            .filter_map(|m| match m {
                ChatMessage::User { content, .. } => Some(HistoryEntry {
                    role: HistoryRole::User,
                    content: content.clone(),
                }),
                ChatMessage::Assistant { content } => Some(HistoryEntry {
                    role: HistoryRole::Bot,
                    content: content.clone(),
                }),
                ChatMessage::Notice(_) | ChatMessage::Error(_) => None,
            })
            .collect();
        prompts::history_window(&entries).to_vec()
    }

    /// Content of the last code block in the last assistant message, for the
    /// clipboard shortcut.
    pub fn last_code_block(&self) -> Option<String> {
        let content = self.messages.iter().rev().find_map(|m| match m {
            ChatMessage::Assistant { content } => Some(content.as_str()),
            _ => None,
        })?;
        parse_message_segments(content)
            .iter()
            .rev()
            .find_map(|seg| match seg {
                Segment::Code { .. } => Some(seg.content().to_string()),
                Segment::Text(_) => None,
            })
    }

    // -- input editing --

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.input_cursor, c);
        self.input_cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        let prev = self.input[..self.input_cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.input.remove(prev);
        self.input_cursor = prev;
    }

    pub fn cursor_left(&mut self) {
        if let Some((i, _)) = self.input[..self.input_cursor].char_indices().last() {
            self.input_cursor = i;
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(c) = self.input[self.input_cursor..].chars().next() {
            self.input_cursor += c.len_utf8();
        }
    }

    pub fn take_input(&mut self) -> String {
        self.input_cursor = 0;
        std::mem::take(&mut self.input)
    }

    // -- scrolling --

    fn max_scroll(&self) -> usize {
        self.history_line_count
            .saturating_sub(self.history_viewport_height)
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let current = match self.scroll {
            ScrollPosition::Line(l) => l,
            ScrollPosition::Bottom => self.max_scroll(),
        };
        self.scroll = ScrollPosition::Line(current.saturating_sub(lines));
    }

    pub fn scroll_down(&mut self, lines: usize) {
        if let ScrollPosition::Line(l) = self.scroll {
            let next = l + lines;
            if next >= self.max_scroll() {
                self.scroll = ScrollPosition::Bottom;
            } else {
                self.scroll = ScrollPosition::Line(next);
            }
        }
    }

    /// Current scroll offset given the latest line/viewport bookkeeping.
    pub fn scroll_offset(&self) -> usize {
        match self.scroll {
            ScrollPosition::Line(l) => l.min(self.max_scroll()),
            ScrollPosition::Bottom => self.max_scroll(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_entries_skip_notices_and_errors() {
        let mut app = App::new(None);
        app.push_user("question".into());
        app.push_notice("Processing your code...".into());
        app.push_assistant("answer".into());
        app.push_error("boom".into());
        let entries = app.history_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, HistoryRole::User);
        assert_eq!(entries[1].role, HistoryRole::Bot);
    }

    #[test]
    fn history_entries_window_to_last_ten() {
        let mut app = App::new(None);
        for i in 0..8 {
            app.push_user(format!("q{}", i));
            app.push_assistant(format!("a{}", i));
        }
        let entries = app.history_entries();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].content, "q3");
    }

    #[test]
    fn last_code_block_finds_trailing_block() {
        let mut app = App::new(None);
        app.push_assistant("one\n```js\nfirst()\n```\ntwo\n```js\nsecond()\n```".into());
        assert_eq!(app.last_code_block().as_deref(), Some("second()"));
    }

    #[test]
    fn last_code_block_none_without_code() {
        let mut app = App::new(None);
        app.push_assistant("no code here".into());
        assert_eq!(app.last_code_block(), None);
    }

    #[test]
    fn input_editing_respects_char_boundaries() {
        let mut app = App::new(None);
        for c in "héllo".chars() {
            app.insert_char(c);
        }
        app.cursor_left();
        app.cursor_left();
        app.backspace(); // removes the second 'l'
        assert_eq!(app.input, "hélo");
        app.cursor_right();
        app.insert_char('!');
        assert_eq!(app.input, "hélo!");
    }

    #[test]
    fn scroll_clamps_and_follows_bottom() {
        let mut app = App::new(None);
        app.history_line_count = 50;
        app.history_viewport_height = 20;
        assert_eq!(app.scroll_offset(), 30);
        app.scroll_up(5);
        assert_eq!(app.scroll_offset(), 25);
        app.scroll_down(100);
        assert_eq!(app.scroll, ScrollPosition::Bottom);
    }
}
