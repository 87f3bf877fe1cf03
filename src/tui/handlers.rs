//! Event handlers for the TUI: keyboard, mouse, and chat request spawning.

use std::sync::Arc;
use std::sync::mpsc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::core::api::{ApiClient, ApiError, ChatReply, HistoryEntry};
use crate::core::prompts::{self, QuickAction};

use super::app::{App, ScrollPosition};
use super::constants;

/// A chat request in progress: result channel plus cancellation handle.
pub(super) struct PendingChat {
    pub result_rx: mpsc::Receiver<Result<ChatReply, ApiError>>,
    pub cancel_token: CancellationToken,
    /// Set when the request came from a quick action; its progress notice is
    /// removed when the result lands.
    pub quick_action: Option<QuickAction>,
}

/// Result of handling an event: continue the loop or exit.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(super) enum HandleResult {
    Continue,
    Break,
}

pub(super) struct HandleKeyContext<'a> {
    pub app: &'a mut App,
    pub client: &'a Arc<ApiClient>,
    pub pending_chat: &'a mut Option<PendingChat>,
    pub rt: &'a Arc<Runtime>,
}

/// Spawn a chat request on a background thread. The thread drives the async
/// call on the shared runtime and reports through the result channel.
fn spawn_chat(
    rt: &Arc<Runtime>,
    client: Arc<ApiClient>,
    message: String,
    history: Vec<HistoryEntry>,
    quick_action: Option<QuickAction>,
) -> PendingChat {
    let (result_tx, result_rx) = mpsc::channel();
    let cancel_token = CancellationToken::new();
    let cancel = cancel_token.clone();
    let rt_clone = Arc::clone(rt);
    let is_quick_action = quick_action.is_some();

    std::thread::spawn(move || {
        let result = rt_clone.block_on(async {
            tokio::select! {
                _ = cancel.cancelled() => Err(ApiError::Cancelled),
                r = client.chat(&message, &history, is_quick_action) => r,
            }
        });
        let _ = result_tx.send(result);
    });

    PendingChat {
        result_rx,
        cancel_token,
        quick_action,
    }
}

/// Send the typed message. The chat shows the raw input; the request carries
/// the current code appended as reference context.
fn send_manual_message(ctx: &mut HandleKeyContext<'_>) {
    let input = ctx.app.input.trim().to_string();
    if input.is_empty() || ctx.pending_chat.is_some() {
        return;
    }
    ctx.app.take_input();

    let code = ctx
        .app
        .code
        .as_ref()
        .map(|c| (c.language.as_str(), c.text.as_str()));
    let message = prompts::with_code_context(&input, code);
    let history = ctx.app.history_entries();

    ctx.app.push_user(input);
    ctx.app.thinking = true;
    *ctx.pending_chat = Some(spawn_chat(
        ctx.rt,
        Arc::clone(ctx.client),
        message,
        history,
        None,
    ));
}

/// Run a quick action against the loaded code.
fn send_quick_action(ctx: &mut HandleKeyContext<'_>, action: QuickAction) {
    if ctx.pending_chat.is_some() {
        return;
    }
    let Some(code) = ctx.app.code.as_ref() else {
        ctx.app.status = Some("No code loaded, start with `codepal <file>`".to_string());
        return;
    };
    if code.text.trim().is_empty() {
        ctx.app.status = Some("Loaded file is empty".to_string());
        return;
    }

    let message = action.prompt(&code.language, &code.text);
    let history = ctx.app.history_entries();

    ctx.app
        .push_notice(format!("{}: processing your code...", action.label()));
    ctx.app.thinking = true;
    *ctx.pending_chat = Some(spawn_chat(
        ctx.rt,
        Arc::clone(ctx.client),
        message,
        history,
        Some(action),
    ));
}

fn copy_last_code_block(app: &mut App) {
    let Some(code) = app.last_code_block() else {
        app.status = Some("No code block to copy".to_string());
        return;
    };
    match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(code)) {
        Ok(()) => app.status = Some("Copied code block".to_string()),
        Err(e) => app.status = Some(format!("Clipboard error: {}", e)),
    }
}

/// Handle a key event.
pub(super) fn handle_key(key: KeyEvent, mut ctx: HandleKeyContext<'_>) -> HandleResult {
    if key.kind == KeyEventKind::Release {
        return HandleResult::Continue;
    }
    ctx.app.status = None;

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match (key.code, ctrl) {
        (KeyCode::Char('c'), true) | (KeyCode::Char('q'), true) => return HandleResult::Break,
        (KeyCode::Esc, _) => {
            if let Some(pending) = ctx.pending_chat.as_ref() {
                pending.cancel_token.cancel();
                ctx.app.status = Some("Cancelling...".to_string());
            } else {
                ctx.app.take_input();
            }
        }
        (KeyCode::Enter, false) => send_manual_message(&mut ctx),
        (KeyCode::Char('j'), true) | (KeyCode::Enter, true) => ctx.app.insert_char('\n'),
        (KeyCode::Char('k'), true) => send_quick_action(&mut ctx, QuickAction::Comment),
        (KeyCode::Char('b'), true) => send_quick_action(&mut ctx, QuickAction::FindBugs),
        (KeyCode::Char('o'), true) => send_quick_action(&mut ctx, QuickAction::Optimize),
        (KeyCode::Char('t'), true) => send_quick_action(&mut ctx, QuickAction::GenerateTests),
        (KeyCode::Char('y'), true) => copy_last_code_block(ctx.app),
        (KeyCode::Char('l'), true) => ctx.app.clear_chat(),
        (KeyCode::Backspace, _) => ctx.app.backspace(),
        (KeyCode::Left, _) => ctx.app.cursor_left(),
        (KeyCode::Right, _) => ctx.app.cursor_right(),
        (KeyCode::Up, _) => ctx.app.scroll_up(constants::SCROLL_LINES_SMALL),
        (KeyCode::Down, _) => ctx.app.scroll_down(constants::SCROLL_LINES_SMALL),
        (KeyCode::PageUp, _) => ctx.app.scroll_up(constants::SCROLL_LINES_PAGE),
        (KeyCode::PageDown, _) => ctx.app.scroll_down(constants::SCROLL_LINES_PAGE),
        (KeyCode::Home, true) => ctx.app.scroll = ScrollPosition::Line(0),
        (KeyCode::End, true) => ctx.app.scroll = ScrollPosition::Bottom,
        (KeyCode::Char(c), false) => ctx.app.insert_char(c),
        _ => {}
    }
    HandleResult::Continue
}

/// Handle a mouse event (wheel scrolling only).
pub(super) fn handle_mouse(mouse: crossterm::event::MouseEvent, app: &mut App) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(constants::SCROLL_LINES_SMALL),
        MouseEventKind::ScrollDown => app.scroll_down(constants::SCROLL_LINES_SMALL),
        _ => {}
    }
}

/// Fold a finished chat result into the app state.
pub(super) fn handle_chat_result(
    app: &mut App,
    result: Result<ChatReply, ApiError>,
    quick_action: Option<QuickAction>,
) {
    app.thinking = false;
    if quick_action.is_some() {
        app.remove_last_notice();
    }
    match result {
        Ok(reply) => {
            app.tokens = reply.tokens_info.clone();
            app.push_assistant(reply.response);
        }
        Err(ApiError::Cancelled) => app.push_notice("Request cancelled.".to_string()),
        Err(e) => app.push_error(format!("Error: {}", e)),
    }
}
