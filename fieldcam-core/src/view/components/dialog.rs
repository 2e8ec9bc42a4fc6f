//! src/view/components/dialog.rs
//! ============================================================================
//! # Dialog frame shared by the confirm and prompt overlays
//!
//! Clears a centered box, draws the titled border and an Accept/Cancel
//! button row along the bottom. Returns the area left for the body.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    widgets::{Block, Borders, Clear},
};

use crate::controller::dispatch_table::{DialogButton, Target};
use crate::view::components::button::Button;
use crate::view::hit_map::HitMap;
use crate::view::theme;

const BUTTON_ROW_HEIGHT: u16 = 3;

pub struct Dialog<'a> {
    pub title: &'a str,
    pub accept: &'a str,
    pub cancel: &'a str,
    pub border: Style,
}

impl Dialog<'_> {
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, hits: &mut HitMap) -> Rect {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title)
            .title_alignment(Alignment::Center)
            .title_style(self.border.bold())
            .border_style(self.border)
            .style(Style::default().bg(theme::BACKGROUND));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [body, buttons] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Fill(1), Constraint::Length(BUTTON_ROW_HEIGHT)])
            .areas(inner);

        let [accept, cancel] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Fill(1)])
            .areas(buttons);

        Button::new(self.accept).render(
            frame,
            accept,
            Target::Dialog(DialogButton::Accept),
            hits,
        );
        Button::new(self.cancel).render(
            frame,
            cancel,
            Target::Dialog(DialogButton::Cancel),
            hits,
        );

        body
    }
}

/// Box of `width` x `height` cells centered in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
