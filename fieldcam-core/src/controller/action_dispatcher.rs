// fieldcam-core/src/controller/action_dispatcher.rs
// Applies actions to the app state; every failure ends up as a popup

use std::time::Instant;

use chrono::{DateTime, Local};
use tracing::{debug, error, info};

use crate::camera::capture_photo;
use crate::controller::actions::Action;
use crate::controller::gesture::PressKind;
use crate::error::AppResult;
use crate::model::app_state::AppState;
use crate::model::ui_state::{ConfirmRequest, PromptKind, PromptState, RedrawFlag, UIOverlay};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    Continue,
    Quit,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherStats {
    pub total_actions: u64,
    pub failed_actions: u64,
}

#[derive(Debug, Default)]
pub struct ActionDispatcher {
    stats: DispatcherStats,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn get_stats(&self) -> DispatcherStats {
        self.stats
    }

    pub fn handle(&mut self, app: &mut AppState, action: Action) -> DispatchResult {
        self.handle_at(app, action, Local::now())
    }

    /// `now` names captured photos.
    pub fn handle_at(
        &mut self,
        app: &mut AppState,
        action: Action,
        now: DateTime<Local>,
    ) -> DispatchResult {
        if matches!(action, Action::Quit) {
            return DispatchResult::Quit;
        }

        if !matches!(action, Action::Tick | Action::NoOp) {
            self.stats.total_actions += 1;
            debug!(?action, "Dispatching action");
        }

        if let Err(e) = Self::apply(app, action.clone(), now) {
            self.stats.failed_actions += 1;
            error!(?action, error = %e, "Action failed");
            app.ui.show_error(e.user_message());
        }

        DispatchResult::Continue
    }

    fn apply(app: &mut AppState, action: Action, now: DateTime<Local>) -> AppResult<()> {
        match action {
            Action::Descend(name) => {
                let listing = app.navigator.descend(&name)?;
                app.set_listing(listing);
            }

            Action::Ascend => {
                if let Some(listing) = app.navigator.ascend()? {
                    app.set_listing(listing);
                }
            }

            Action::RequestDelete(name) => {
                let intent = app.navigator.request_delete(&name)?;
                app.ui
                    .open_overlay(UIOverlay::Confirm(ConfirmRequest::DeleteEntry(intent)));
            }

            Action::RequestDeleteAll => {
                app.ui.open_overlay(UIOverlay::Confirm(ConfirmRequest::DeleteAll));
            }

            Action::CreateNumbered => {
                if !app.listing.can_create_numbered() {
                    debug!("New entrance is not offered here");
                    return Ok(());
                }
                let prefix = app.entrance_prefix.clone();
                app.navigator.create_numbered(&prefix)?;
                app.refresh()?;
            }

            Action::ShowHomePrompt => {
                app.ui
                    .open_overlay(UIOverlay::Prompt(PromptState::new(PromptKind::AddHome)));
            }

            Action::CapturePhoto => {
                if !app.listing.can_capture() {
                    debug!("Capture is not offered here");
                    return Ok(());
                }
                capture_photo(&mut app.navigator, app.camera.as_mut(), now)?;
                app.refresh()?;
                app.ui.show_success("Photo saved");
            }

            Action::ResetCounter => {
                app.navigator.state_mut().reset_photo_count();
                app.ui.request_redraw(RedrawFlag::Main);
                app.ui.show_info("Photo counter reset");
                info!("Photo counter reset");
            }

            Action::DialogAccept => Self::accept_dialog(app)?,

            Action::DialogCancel => {
                app.ui.take_overlay();
            }

            Action::PromptInput(ch) => {
                if let Some(prompt) = app.ui.prompt_mut() {
                    prompt.insert_char(ch);
                    app.ui.request_redraw(RedrawFlag::Overlay);
                }
            }

            Action::PromptBackspace => {
                if app.ui.prompt_mut().is_some_and(PromptState::delete_char_before) {
                    app.ui.request_redraw(RedrawFlag::Overlay);
                }
            }

            Action::MoveSelectionUp => {
                app.ui.move_selection_up();
            }

            Action::MoveSelectionDown => {
                let rows = app.rows().len();
                app.ui.move_selection_down(rows);
            }

            Action::ActivateSelected => return Self::press_selected(app, PressKind::Short, now),

            Action::DeleteSelected => return Self::press_selected(app, PressKind::Long, now),

            Action::DismissNotification => {
                app.ui.dismiss_notification();
            }

            Action::ReloadDirectory => app.refresh()?,

            Action::Resize(..) => app.ui.request_redraw(RedrawFlag::All),

            Action::Tick => {
                app.ui.update_notification(Instant::now());
            }

            Action::Quit | Action::NoOp => {}
        }

        Ok(())
    }

    /// Keyboard stand-in for a press on the selected row, resolved through
    /// the same table as mouse presses.
    fn press_selected(app: &mut AppState, kind: PressKind, now: DateTime<Local>) -> AppResult<()> {
        let Some(target) = app.selected_target() else {
            return Ok(());
        };
        match app.table.resolve(&target, kind) {
            Some(action) => Self::apply(app, action, now),
            None => Ok(()),
        }
    }

    fn accept_dialog(app: &mut AppState) -> AppResult<()> {
        match app.ui.take_overlay() {
            UIOverlay::Confirm(ConfirmRequest::DeleteEntry(intent)) => {
                app.navigator.confirm_delete(&intent)?;
                app.refresh()?;
            }

            UIOverlay::Confirm(ConfirmRequest::DeleteAll) => {
                let report = app.navigator.delete_all()?;
                app.refresh()?;
                if !report.is_clean() {
                    app.ui.show_warning(format!(
                        "{} item(s) could not be deleted",
                        report.failed.len()
                    ));
                }
            }

            UIOverlay::Prompt(prompt) => match prompt.kind {
                PromptKind::AddHome => {
                    if let Err(e) = app.navigator.create_directory(&prompt.input) {
                        // the prompt stays up so the name can be fixed
                        app.ui.open_overlay(UIOverlay::Prompt(prompt));
                        return Err(e);
                    }
                    app.refresh()?;
                }
            },

            UIOverlay::None => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraSurface, UnavailableCamera};
    use crate::controller::dispatch_table::Target;
    use crate::error::AppError;
    use crate::fs::filesystem::{StdFileSystem, UnlistableDir};
    use crate::model::navigator::Navigator;
    use crate::model::ui_state::{NotificationLevel, UIState};
    use chrono::TimeZone;
    use tempfile::TempDir;

    struct FixedCamera;

    impl CameraSurface for FixedCamera {
        fn capture(&mut self) -> Result<Vec<u8>, AppError> {
            Ok(b"\x89PNG".to_vec())
        }
    }

    fn app_with(camera: Box<dyn CameraSurface>) -> (TempDir, AppState) {
        let tmp = TempDir::new().unwrap();
        let nav = Navigator::new(tmp.path().join("base"), Box::new(StdFileSystem));
        let app = AppState::new(nav, camera, UIState::default(), "entrance").unwrap();
        (tmp, app)
    }

    fn run(d: &mut ActionDispatcher, app: &mut AppState, actions: Vec<Action>) {
        let now = Local.with_ymd_and_hms(2024, 5, 17, 12, 30, 5).unwrap();
        for action in actions {
            assert_eq!(d.handle_at(app, action, now), DispatchResult::Continue);
        }
    }

    fn names(app: &AppState) -> Vec<String> {
        let mut names: Vec<String> = app.listing.entries.iter().map(|e| e.label.to_string()).collect();
        names.sort();
        names
    }

    fn error_shown(app: &AppState) -> bool {
        app.ui
            .notification
            .as_ref()
            .is_some_and(|n| n.level == NotificationLevel::Error)
    }

    fn add_home(d: &mut ActionDispatcher, app: &mut AppState, name: &str) {
        let mut actions = vec![Action::ShowHomePrompt];
        actions.extend(name.chars().map(Action::PromptInput));
        actions.push(Action::DialogAccept);
        run(d, app, actions);
    }

    #[test]
    fn add_home_via_prompt() {
        let (_tmp, mut app) = app_with(Box::new(UnavailableCamera));
        let mut d = ActionDispatcher::new();

        add_home(&mut d, &mut app, "home1");
        assert_eq!(names(&app), vec!["home1"]);
        assert!(!app.ui.overlay.is_open());
    }

    #[test]
    fn empty_home_name_keeps_prompt_and_shows_error() {
        let (_tmp, mut app) = app_with(Box::new(UnavailableCamera));
        let mut d = ActionDispatcher::new();

        run(&mut d, &mut app, vec![Action::ShowHomePrompt, Action::DialogAccept]);
        assert!(error_shown(&app));
        assert!(matches!(app.ui.overlay, UIOverlay::Prompt(_)));
        assert!(app.listing.entries.is_empty());
        assert_eq!(d.get_stats().failed_actions, 1);

        run(&mut d, &mut app, vec![Action::DialogCancel]);
        assert!(!app.ui.overlay.is_open());
    }

    #[test]
    fn short_and_long_press_on_entry() {
        let (_tmp, mut app) = app_with(Box::new(UnavailableCamera));
        let mut d = ActionDispatcher::new();
        add_home(&mut d, &mut app, "home1");

        let short = app
            .table
            .resolve(&Target::Entry("home1".into()), PressKind::Short)
            .unwrap();
        run(&mut d, &mut app, vec![short]);
        assert_eq!(app.listing.title, "home1");
        assert!(app.listing.show_up());

        run(&mut d, &mut app, vec![Action::Ascend]);
        assert!(app.listing.at_base);

        let long = app
            .table
            .resolve(&Target::Entry("home1".into()), PressKind::Long)
            .unwrap();
        run(&mut d, &mut app, vec![long]);
        assert!(matches!(
            app.ui.overlay,
            UIOverlay::Confirm(ConfirmRequest::DeleteEntry(_))
        ));
        assert_eq!(names(&app), vec!["home1"]);

        run(&mut d, &mut app, vec![Action::DialogAccept]);
        assert!(app.listing.entries.is_empty());
    }

    #[test]
    fn cancelled_delete_keeps_entry() {
        let (_tmp, mut app) = app_with(Box::new(UnavailableCamera));
        let mut d = ActionDispatcher::new();
        add_home(&mut d, &mut app, "home1");

        run(
            &mut d,
            &mut app,
            vec![Action::RequestDelete("home1".into()), Action::DialogCancel],
        );
        assert_eq!(names(&app), vec!["home1"]);
    }

    #[test]
    fn numbered_entrances_only_inside_a_home() {
        let (_tmp, mut app) = app_with(Box::new(UnavailableCamera));
        let mut d = ActionDispatcher::new();

        run(&mut d, &mut app, vec![Action::CreateNumbered]);
        assert!(app.listing.entries.is_empty());

        add_home(&mut d, &mut app, "home1");
        run(
            &mut d,
            &mut app,
            vec![
                Action::Descend("home1".into()),
                Action::CreateNumbered,
                Action::CreateNumbered,
            ],
        );
        assert_eq!(names(&app), vec!["entrance1", "entrance2"]);
    }

    #[test]
    fn capture_counts_and_saves() {
        let (_tmp, mut app) = app_with(Box::new(FixedCamera));
        let mut d = ActionDispatcher::new();
        add_home(&mut d, &mut app, "home1");

        // hidden at base
        run(&mut d, &mut app, vec![Action::CapturePhoto]);
        assert_eq!(app.photo_count(), 0);

        run(
            &mut d,
            &mut app,
            vec![Action::Descend("home1".into()), Action::CapturePhoto],
        );
        assert_eq!(app.photo_count(), 1);
        assert_eq!(names(&app), vec!["IMG_20240517_123005.png"]);
        assert_eq!(
            app.ui.notification.as_ref().map(|n| n.level),
            Some(NotificationLevel::Success)
        );

        run(&mut d, &mut app, vec![Action::ResetCounter]);
        assert_eq!(app.photo_count(), 0);
        assert_eq!(
            app.ui.notification.as_ref().map(|n| n.level),
            Some(NotificationLevel::Info)
        );
    }

    #[test]
    fn failed_capture_shows_error() {
        let (_tmp, mut app) = app_with(Box::new(UnavailableCamera));
        let mut d = ActionDispatcher::new();
        add_home(&mut d, &mut app, "home1");

        run(
            &mut d,
            &mut app,
            vec![Action::Descend("home1".into()), Action::CapturePhoto],
        );
        assert_eq!(app.photo_count(), 0);
        assert!(app.listing.entries.is_empty());
        assert!(error_shown(&app));
    }

    #[test]
    fn descending_into_a_photo_reports_and_stays() {
        let (_tmp, mut app) = app_with(Box::new(FixedCamera));
        let mut d = ActionDispatcher::new();
        add_home(&mut d, &mut app, "home1");
        run(
            &mut d,
            &mut app,
            vec![Action::Descend("home1".into()), Action::CapturePhoto],
        );
        let here = app.listing.location.clone();

        run(
            &mut d,
            &mut app,
            vec![Action::Descend("IMG_20240517_123005.png".into())],
        );
        assert!(error_shown(&app));
        assert_eq!(app.listing.location, here);
    }

    #[test]
    fn keyboard_selection_goes_through_the_table() {
        let (_tmp, mut app) = app_with(Box::new(UnavailableCamera));
        let mut d = ActionDispatcher::new();
        add_home(&mut d, &mut app, "home1");

        run(&mut d, &mut app, vec![Action::ActivateSelected]);
        assert_eq!(app.listing.title, "home1");
        // row 0 is now ".."; a long press on it does nothing
        run(&mut d, &mut app, vec![Action::DeleteSelected]);
        assert!(!app.ui.overlay.is_open());

        run(&mut d, &mut app, vec![Action::ActivateSelected]);
        assert!(app.listing.at_base);
    }

    #[test]
    fn delete_all_empties_location() {
        let (_tmp, mut app) = app_with(Box::new(UnavailableCamera));
        let mut d = ActionDispatcher::new();
        add_home(&mut d, &mut app, "home1");
        add_home(&mut d, &mut app, "home2");

        run(
            &mut d,
            &mut app,
            vec![Action::RequestDeleteAll, Action::DialogAccept],
        );
        assert!(app.listing.entries.is_empty());
        assert!(app.ui.notification.is_none());
    }

    #[test]
    fn failed_ascend_leaves_screen_and_deletes_in_place() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("base");
        let home = base.join("home1");
        std::fs::create_dir_all(home.join("sub")).unwrap();
        std::fs::write(home.join("x"), b"keep").unwrap();
        std::fs::write(home.join("sub/x"), b"drop").unwrap();

        let fs = UnlistableDir::default();
        let nav = Navigator::new(base, Box::new(fs.clone()));
        let mut app =
            AppState::new(nav, Box::new(UnavailableCamera), UIState::default(), "entrance")
                .unwrap();
        let mut d = ActionDispatcher::new();
        run(
            &mut d,
            &mut app,
            vec![Action::Descend("home1".into()), Action::Descend("sub".into())],
        );
        let shown = app.listing.clone();

        *fs.dir.borrow_mut() = Some(home.clone());
        run(&mut d, &mut app, vec![Action::Ascend]);
        assert!(error_shown(&app));
        assert_eq!(app.navigator.state().location(), home.join("sub"));
        assert_eq!(app.listing, shown);

        let long = app
            .table
            .resolve(&Target::Entry("x".into()), PressKind::Long)
            .unwrap();
        run(
            &mut d,
            &mut app,
            vec![Action::DismissNotification, long, Action::DialogAccept],
        );
        assert!(!home.join("sub/x").exists());
        assert!(home.join("x").exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_entry_is_pressable() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (tmp, mut app) = app_with(Box::new(UnavailableCamera));
        let mut d = ActionDispatcher::new();
        let raw = OsStr::from_bytes(b"dom\xff").to_os_string();
        std::fs::create_dir(tmp.path().join("base").join(&raw)).unwrap();
        run(&mut d, &mut app, vec![Action::ReloadDirectory]);

        let target = Target::Entry(raw.clone());
        let short = app.table.resolve(&target, PressKind::Short).unwrap();
        run(&mut d, &mut app, vec![short]);
        assert!(!error_shown(&app));
        assert_eq!(app.listing.location, tmp.path().join("base").join(&raw));

        run(&mut d, &mut app, vec![Action::Ascend]);
        let long = app.table.resolve(&target, PressKind::Long).unwrap();
        run(&mut d, &mut app, vec![long, Action::DialogAccept]);
        assert!(!error_shown(&app));
        assert!(app.listing.entries.is_empty());
    }

    #[test]
    fn quit_stops_the_loop() {
        let (_tmp, mut app) = app_with(Box::new(UnavailableCamera));
        let mut d = ActionDispatcher::new();
        assert_eq!(d.handle(&mut app, Action::Quit), DispatchResult::Quit);
    }
}
