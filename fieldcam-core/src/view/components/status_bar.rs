//! src/view/components/status_bar.rs
//!
//! One line: the current location on the left, key hints on the right.

use crate::{model::app_state::AppState, view::theme};
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget},
};

const BROWSE_HINTS: &str = "Enter open | d delete | Bksp up | a home | n entrance | p photo | q quit";
const CONFIRM_HINTS: &str = "y/Enter confirm | n/Esc cancel";
const PROMPT_HINTS: &str = "Type name | Enter create | Esc cancel";

pub struct StatusBar;

impl StatusBar {
    pub fn hints(app: &AppState) -> &'static str {
        use crate::model::ui_state::UIOverlay;
        match app.ui.overlay {
            UIOverlay::None => BROWSE_HINTS,
            UIOverlay::Confirm(_) => CONFIRM_HINTS,
            UIOverlay::Prompt(_) => PROMPT_HINTS,
        }
    }

    pub fn render(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
        let state = app.navigator.state();
        let relative = state
            .location()
            .strip_prefix(state.base_path())
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let left_text = format!("/{relative}");

        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        Paragraph::new(left_text)
            .style(Style::default().fg(theme::FOREGROUND).bg(theme::BACKGROUND))
            .alignment(Alignment::Left)
            .render(layout[0], frame.buffer_mut());

        Paragraph::new(Self::hints(app))
            .style(Style::default().fg(theme::COMMENT).bg(theme::BACKGROUND))
            .alignment(Alignment::Right)
            .render(layout[1], frame.buffer_mut());
    }
}
