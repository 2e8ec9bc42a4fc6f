//! src/view/components/confirm_overlay.rs
//! ============================================================================
//! # `ConfirmOverlay`: yes/no question before anything is deleted

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Paragraph, Wrap},
};

use crate::model::ui_state::ConfirmRequest;
use crate::view::components::dialog::{Dialog, centered_rect};
use crate::view::hit_map::HitMap;
use crate::view::theme;

pub struct ConfirmOverlay;

impl ConfirmOverlay {
    pub fn render(frame: &mut Frame<'_>, request: &ConfirmRequest, area: Rect, hits: &mut HitMap) {
        let dialog_area = centered_rect(50, 9, area);

        let body = Dialog {
            title: " Confirm ",
            accept: "Yes",
            cancel: "No",
            border: Style::default().fg(theme::RED),
        }
        .render(frame, dialog_area, hits);

        frame.render_widget(
            Paragraph::new(request.message())
                .style(Style::default().fg(theme::FOREGROUND))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            body,
        );
    }
}
