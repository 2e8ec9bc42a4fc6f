//! src/view/components/button.rs
//! ============================================================================
//! # Button: bordered, centered caption
//!
//! Drawing a button also registers its area in the frame's [`HitMap`] so the
//! pointer router can attach a press classifier to it.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use crate::controller::dispatch_table::{ControlButton, Target};
use crate::view::hit_map::HitMap;
use crate::view::{icons, theme};

#[derive(Debug, Clone)]
pub struct Button<'a> {
    caption: &'a str,
    style: Style,
    border_style: Style,
}

impl<'a> Button<'a> {
    pub fn new(caption: &'a str) -> Self {
        Self {
            caption,
            style: theme::button_style(),
            border_style: theme::button_border_style(),
        }
    }

    /// Styled per control: destructive ones in red, the shutter in orange.
    pub fn for_control(control: ControlButton) -> Self {
        let button = Self::new(control.caption());
        match control {
            ControlButton::DeleteAll => button.styled(
                theme::danger_button_style(),
                theme::danger_button_border_style(),
            ),
            ControlButton::TakePhoto => {
                button.styled(theme::photo_button_style(), theme::button_border_style())
            }
            _ => button,
        }
    }

    #[must_use]
    pub const fn styled(mut self, style: Style, border_style: Style) -> Self {
        self.style = style;
        self.border_style = border_style;
        self
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, target: Target, hits: &mut HitMap) {
        let caption = if matches!(target, Target::Control(ControlButton::TakePhoto)) {
            format!("{} {}", icons::CAMERA_ICON, self.caption)
        } else {
            self.caption.to_string()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style)
            .style(self.style);

        frame.render_widget(
            Paragraph::new(caption)
                .block(block)
                .style(self.style)
                .alignment(Alignment::Center),
            area,
        );
        hits.push(area, target);
    }
}
