//! Interactive chat TUI over the helper backend.

mod app;
mod constants;
mod draw;
mod handlers;
mod syntax;
mod text;

pub(crate) use app::CodeContext;

use std::io;
use std::sync::Arc;

use crossterm::event::{self, Event};
use crossterm::execute;
use tokio::runtime::Runtime;

use crate::core::api::ApiClient;

use app::App;
use draw::draw;
use handlers::{HandleKeyContext, HandleResult, PendingChat};

/// Guard that restores terminal state on drop (including on panic).
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), crossterm::event::DisableMouseCapture);
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Run the TUI loop. Uses a dedicated Tokio runtime for backend calls.
pub(crate) fn run(
    client: Arc<ApiClient>,
    backend_label: String,
    code: Option<CodeContext>,
) -> io::Result<()> {
    use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, enable_raw_mode};
    use ratatui::Terminal;
    use ratatui::backend::CrosstermBackend;

    let _guard = TerminalGuard;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    execute!(stdout, Clear(ClearType::All))?;
    execute!(stdout, crossterm::event::EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let rt = Arc::new(
        Runtime::new().map_err(|e| io::Error::other(format!("failed to create runtime: {}", e)))?,
    );

    let mut app = App::new(code);
    app.backend = backend_label;
    let mut pending_chat: Option<PendingChat> = None;

    loop {
        if let Some(ref chat) = pending_chat
            && let Ok(result) = chat.result_rx.try_recv()
        {
            let quick_action = chat.quick_action;
            handlers::handle_chat_result(&mut app, result, quick_action);
            pending_chat = None;
        }

        if app.thinking {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
        }

        terminal.draw(|f| draw(f, &mut app, f.area()))?;

        if event::poll(std::time::Duration::from_millis(
            constants::EVENT_POLL_TIMEOUT_MS,
        ))? {
            match event::read()? {
                Event::Key(key) => {
                    let result = handlers::handle_key(
                        key,
                        HandleKeyContext {
                            app: &mut app,
                            client: &client,
                            pending_chat: &mut pending_chat,
                            rt: &rt,
                        },
                    );
                    if result == HandleResult::Break {
                        break;
                    }
                }
                Event::Mouse(mouse) => handlers::handle_mouse(mouse, &mut app),
                _ => {}
            }
        }
    }

    terminal.show_cursor()?;
    Ok(())
}
