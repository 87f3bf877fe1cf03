//! TUI rendering: layout and widgets for the chat interface.

mod header;
mod history;
mod input;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::app::App;
use super::constants::INPUT_SECTION_HEIGHT;

pub(super) fn draw(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(INPUT_SECTION_HEIGHT),
        ])
        .split(area);

    header::draw_header(f, app, chunks[0]);
    history::draw_history(f, app, chunks[1]);
    input::draw_input(f, app, chunks[2]);
}
