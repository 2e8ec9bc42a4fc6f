//! ``src/view/components/input_prompt_overlay.rs``
//! ============================================================================
//! # `InputPromptOverlay`: single-line name entry

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use crate::model::ui_state::PromptState;
use crate::view::components::dialog::{Dialog, centered_rect};
use crate::view::hit_map::HitMap;
use crate::view::theme;

pub struct InputPromptOverlay;

impl InputPromptOverlay {
    pub fn render(frame: &mut Frame<'_>, prompt: &PromptState, area: Rect, hits: &mut HitMap) {
        let dialog_area = centered_rect(50, 10, area);

        let body = Dialog {
            title: prompt.kind.title(),
            accept: "Create",
            cancel: "Cancel",
            border: Style::default().fg(theme::PURPLE),
        }
        .render(frame, dialog_area, hits);

        let [label, input] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(3)])
            .areas(body);

        frame.render_widget(
            Paragraph::new(prompt.kind.label()).style(theme::hint_style()),
            label,
        );

        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style());
        frame.render_widget(
            Paragraph::new(prompt.input.as_str())
                .block(input_block)
                .style(Style::default().fg(theme::FOREGROUND)),
            input,
        );

        if input.height >= 3 {
            let typed = u16::try_from(prompt.input.chars().count()).unwrap_or(u16::MAX);
            let cursor_x = input.x.saturating_add(1).saturating_add(typed);
            frame.set_cursor_position((cursor_x.min(input.right().saturating_sub(2)), input.y + 1));
        }
    }
}
