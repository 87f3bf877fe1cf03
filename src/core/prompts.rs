//! Prompt assembly: quick actions and code context for manual chat.

use crate::core::api::HistoryEntry;

/// How many history entries accompany a chat request.
pub const HISTORY_WINDOW: usize = 10;

/// Quick actions operating on the current code. Each one builds a full prompt
/// with the code embedded in a fenced block; the backend returns processed
/// code without surrounding prose when `is_quick_action` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    Comment,
    FindBugs,
    Optimize,
    GenerateTests,
}

impl QuickAction {
    pub fn label(self) -> &'static str {
        match self {
            QuickAction::Comment => "Comment Code",
            QuickAction::FindBugs => "Find Bugs",
            QuickAction::Optimize => "Optimize",
            QuickAction::GenerateTests => "Generate Tests",
        }
    }

    fn instruction(self) -> &'static str {
        match self {
            QuickAction::Comment => "Please add detailed comments to this code:",
            QuickAction::FindBugs => "Please find and fix bugs in this code:",
            QuickAction::Optimize => "Please optimize this code for performance and readability:",
            QuickAction::GenerateTests => "Please generate unit tests for this code:",
        }
    }

    /// Full prompt for this action against the given code.
    pub fn prompt(self, language: &str, code: &str) -> String {
        format!("{}\n\n```{}\n{}\n```", self.instruction(), language, code)
    }
}

/// Append the current code as reference context to a manual chat message.
/// No-op when there is no code or it is blank.
pub fn with_code_context(message: &str, code: Option<(&str, &str)>) -> String {
    match code {
        Some((language, text)) if !text.trim().is_empty() => format!(
            "{}\n\nCurrent code for reference:\n```{}\n{}\n```",
            message, language, text
        ),
        _ => message.to_string(),
    }
}

/// The trailing window of history sent with each request.
pub fn history_window(entries: &[HistoryEntry]) -> &[HistoryEntry] {
    let start = entries.len().saturating_sub(HISTORY_WINDOW);
    &entries[start..]
}
