//! src/view/ui.rs
//! ============================================================
//! Frame renderer. Draws the whole screen from `AppState` and
//! returns the hit map of everything pressable in that frame.
//!
//! While a dialog is open only its buttons are registered, so
//! presses cannot reach the controls underneath.

use std::time::{Duration, Instant};

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use tracing::{instrument, trace};

use crate::{
    controller::dispatch_table::{ControlButton, Target},
    model::{app_state::AppState, ui_state::UIOverlay},
    view::{
        components::{
            button::Button, confirm_overlay::ConfirmOverlay, entry_list::EntryList,
            input_prompt_overlay::InputPromptOverlay, notification_overlay::NotificationOverlay,
            status_bar::StatusBar,
        },
        hit_map::HitMap,
        theme,
    },
};

const BAR_HEIGHT: u16 = 3;
const RESET_BUTTON_WIDTH: u16 = 17;

/// ---------------------------------------------------------------------------
/// Renderer struct (stats only)
/// ---------------------------------------------------------------------------
#[derive(Debug, Default)]
pub struct UIRenderer {
    stats: RenderStats,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RenderStats {
    pub frames: u64,
    pub slow: u64,
    pub total: Duration,
}

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScreenLayout {
    title: Rect,
    controls: Rect,
    photo: Rect,
    list: Rect,
    counter: Rect,
    status: Rect,
}

impl ScreenLayout {
    fn split(area: Rect, with_photo: bool) -> Self {
        let photo_height = if with_photo { BAR_HEIGHT } else { 0 };
        let [title, controls, photo, list, counter, status] = Layout::vertical([
            Constraint::Length(BAR_HEIGHT),
            Constraint::Length(BAR_HEIGHT),
            Constraint::Length(photo_height),
            Constraint::Fill(1),
            Constraint::Length(BAR_HEIGHT),
            Constraint::Length(1),
        ])
        .areas(area);

        Self {
            title,
            controls,
            photo,
            list,
            counter,
            status,
        }
    }
}

impl UIRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn stats(&self) -> RenderStats {
        self.stats
    }

    #[instrument(level = "trace", skip_all)]
    pub fn render(&mut self, f: &mut Frame<'_>, app: &AppState) -> HitMap {
        let start = Instant::now();
        let screen = f.area();

        let mut hits = HitMap::new();
        let mut background = HitMap::new();
        let main_hits = if app.ui.overlay.is_open() {
            &mut background
        } else {
            &mut hits
        };

        f.render_widget(Block::default().style(theme::base_style()), screen);

        let layout = ScreenLayout::split(screen, app.listing.can_capture());
        Self::draw_title(f, app, layout.title);
        Self::draw_controls(f, app, layout.controls, main_hits);
        if app.listing.can_capture() {
            Button::for_control(ControlButton::TakePhoto).render(
                f,
                layout.photo,
                Target::Control(ControlButton::TakePhoto),
                main_hits,
            );
        }
        EntryList::render(f, &app.listing, app.ui.selected, layout.list, main_hits);
        Self::draw_counter(f, app, layout.counter, main_hits);
        StatusBar::render(f, app, layout.status);

        match &app.ui.overlay {
            UIOverlay::None => {}
            UIOverlay::Confirm(request) => ConfirmOverlay::render(f, request, screen, &mut hits),
            UIOverlay::Prompt(prompt) => InputPromptOverlay::render(f, prompt, screen, &mut hits),
        }

        if let Some(notification) = &app.ui.notification {
            NotificationOverlay::render(f, notification, screen);
        }

        let dur = start.elapsed();
        self.stats.total += dur;
        if dur.as_millis() > 16 {
            self.stats.slow += 1;
        }
        self.stats.frames += 1;
        trace!(regions = hits.len(), "Frame rendered");

        hits
    }

    fn draw_title(f: &mut Frame<'_>, app: &AppState, area: Rect) {
        let title = Paragraph::new(app.listing.title.as_str())
            .style(theme::title_style())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::border_style()),
            );
        f.render_widget(title, area);
    }

    /// Button row above the list. The shutter and the counter reset live
    /// in their own rows.
    fn draw_controls(f: &mut Frame<'_>, app: &AppState, area: Rect, hits: &mut HitMap) {
        let controls: Vec<ControlButton> = ControlButton::visible(&app.listing)
            .into_iter()
            .filter(|c| !matches!(c, ControlButton::TakePhoto | ControlButton::ResetCounter))
            .collect();

        let areas = Layout::horizontal(controls.iter().map(|_| Constraint::Fill(1))).split(area);
        for (control, cell) in controls.into_iter().zip(areas.iter()) {
            Button::for_control(control).render(f, *cell, Target::Control(control), hits);
        }
    }

    fn draw_counter(f: &mut Frame<'_>, app: &AppState, area: Rect, hits: &mut HitMap) {
        let [label, reset] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(RESET_BUTTON_WIDTH)])
                .areas(area);

        let counter = Paragraph::new(format!("Photos: {}", app.photo_count()))
            .style(theme::counter_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::border_style()),
            );
        f.render_widget(counter, label);

        Button::for_control(ControlButton::ResetCounter).render(
            f,
            reset,
            Target::Control(ControlButton::ResetCounter),
            hits,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::UnavailableCamera;
    use crate::controller::dispatch_table::DialogButton;
    use crate::fs::filesystem::StdFileSystem;
    use crate::model::navigator::Navigator;
    use crate::model::ui_state::{ConfirmRequest, PromptKind, PromptState, UIState};
    use ratatui::{Terminal, backend::TestBackend};
    use tempfile::TempDir;

    fn app() -> (TempDir, AppState) {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("base/home1")).unwrap();
        let nav = Navigator::new(tmp.path().join("base"), Box::new(StdFileSystem));
        let app = AppState::new(nav, Box::new(UnavailableCamera), UIState::default(), "entrance")
            .unwrap();
        (tmp, app)
    }

    fn draw(app: &AppState) -> (String, HitMap) {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut renderer = UIRenderer::new();
        let mut hits = HitMap::new();
        terminal
            .draw(|f| hits = renderer.render(f, app))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        (text, hits)
    }

    fn has(hits: &HitMap, target: &Target) -> bool {
        hits.area_of(target).is_some()
    }

    #[test]
    fn base_screen_hides_inside_only_controls() {
        let (_tmp, app) = app();
        let (text, hits) = draw(&app);

        assert!(text.contains("Add home"));
        assert!(text.contains("home1"));
        assert!(text.contains("Photos: 0"));
        assert!(!text.contains("Take photo"));
        assert!(!text.contains("New entrance"));

        assert!(has(&hits, &Target::Entry("home1".into())));
        assert!(!has(&hits, &Target::Up));
        assert!(!has(&hits, &Target::Control(ControlButton::TakePhoto)));
        assert!(has(&hits, &Target::Control(ControlButton::ResetCounter)));
    }

    #[test]
    fn inside_a_home_shows_up_row_and_shutter() {
        let (_tmp, mut app) = app();
        let listing = app.navigator.descend("home1").unwrap();
        app.set_listing(listing);

        let (text, hits) = draw(&app);
        assert!(text.contains("Take photo"));
        assert!(text.contains("New entrance"));
        assert!(has(&hits, &Target::Up));
        assert!(has(&hits, &Target::Control(ControlButton::TakePhoto)));
    }

    #[test]
    fn open_dialog_only_registers_its_buttons() {
        let (_tmp, mut app) = app();
        app.ui.open_overlay(UIOverlay::Confirm(ConfirmRequest::DeleteAll));

        let (text, hits) = draw(&app);
        assert!(text.contains("Are you sure you want to delete all files?"));
        assert_eq!(hits.len(), 2);
        assert!(has(&hits, &Target::Dialog(DialogButton::Accept)));
        assert!(has(&hits, &Target::Dialog(DialogButton::Cancel)));
    }

    #[test]
    fn error_notification_is_drawn() {
        let (_tmp, mut app) = app();
        app.ui.show_error("Cannot delete home1");
        let (text, _) = draw(&app);
        assert!(text.contains("Cannot delete home1"));
    }

    #[test]
    fn very_long_prompt_input_keeps_cursor_in_the_box() {
        let (_tmp, mut app) = app();
        let mut prompt = PromptState::new(PromptKind::AddHome);
        prompt.input = "x".repeat(70_000);
        app.ui.open_overlay(UIOverlay::Prompt(prompt));

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut renderer = UIRenderer::new();
        terminal
            .draw(|f| {
                renderer.render(f, &app);
            })
            .unwrap();

        let cursor = terminal.get_cursor_position().unwrap();
        assert!(cursor.x < 80 && cursor.y < 30);
    }
}
