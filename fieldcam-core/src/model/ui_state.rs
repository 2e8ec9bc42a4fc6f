//! UI state: selection, modal dialogs, notifications and redraw flags

use std::time::{Duration, Instant};

use compact_str::CompactString;

use crate::model::nav_state::DeleteIntent;

/// Redraw flags, OR-ed together until the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RedrawFlag {
    Main = 1,
    Overlay = 2,
    Notification = 4,
    All = 7,
}

impl RedrawFlag {
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NotificationLevel {
    Info = 0,
    Success = 1,
    Warning = 2,
    Error = 3,
}

/// Compact notification with timestamp
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: CompactString,
    pub level: NotificationLevel,
    pub timestamp: Instant,
    pub auto_dismiss: Option<Duration>,
}

impl Notification {
    pub fn new(message: impl Into<CompactString>, level: NotificationLevel) -> Self {
        Self {
            message: message.into(),
            level,
            timestamp: Instant::now(),
            auto_dismiss: None,
        }
    }

    #[must_use]
    pub const fn dismiss_after(mut self, delay: Duration) -> Self {
        self.auto_dismiss = Some(delay);
        self
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.auto_dismiss
            .is_some_and(|delay| now.saturating_duration_since(self.timestamp) >= delay)
    }
}

/// Error/info display collaborator. Fire-and-forget.
pub trait DisplaySurface {
    fn show(&mut self, notification: Notification);
}

/// What a confirmation dialog is asking about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmRequest {
    DeleteEntry(DeleteIntent),
    DeleteAll,
}

impl ConfirmRequest {
    pub fn message(&self) -> String {
        match self {
            Self::DeleteEntry(intent) => format!("Are you sure you want to delete {}?", intent.name),
            Self::DeleteAll => "Are you sure you want to delete all files?".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    AddHome,
}

impl PromptKind {
    pub const fn title(self) -> &'static str {
        match self {
            Self::AddHome => " Add home ",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AddHome => "Enter the home name",
        }
    }
}

/// Text prompt contents. The cursor is always at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub kind: PromptKind,
    pub input: String,
}

impl PromptState {
    pub const fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        if !ch.is_control() {
            self.input.push(ch);
        }
    }

    pub fn delete_char_before(&mut self) -> bool {
        self.input.pop().is_some()
    }
}

/// Modal dialogs. At most one is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UIOverlay {
    #[default]
    None,
    Confirm(ConfirmRequest),
    Prompt(PromptState),
}

impl UIOverlay {
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}

#[derive(Debug)]
pub struct UIState {
    pub redraw_flags: u8,

    pub overlay: UIOverlay,

    /// Index into the rows of the entry list ("..", then entries).
    pub selected: usize,

    pub notification: Option<Notification>,

    /// How long info/success/warning notifications stay up.
    pub notification_timeout: Duration,
}

impl Default for UIState {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

impl UIState {
    pub fn new(notification_timeout: Duration) -> Self {
        Self {
            redraw_flags: RedrawFlag::All.bits(),
            overlay: UIOverlay::None,
            selected: 0,
            notification: None,
            notification_timeout,
        }
    }

    #[inline]
    pub fn request_redraw(&mut self, flag: RedrawFlag) {
        self.redraw_flags |= flag.bits();
    }

    #[inline]
    pub const fn needs_redraw(&self) -> bool {
        self.redraw_flags != 0
    }

    #[inline]
    pub fn clear_redraw(&mut self) {
        self.redraw_flags = 0;
    }

    // Selection

    pub fn move_selection_up(&mut self) -> bool {
        if self.selected > 0 {
            self.selected -= 1;
            self.request_redraw(RedrawFlag::Main);
            true
        } else {
            false
        }
    }

    pub fn move_selection_down(&mut self, row_count: usize) -> bool {
        if self.selected + 1 < row_count {
            self.selected += 1;
            self.request_redraw(RedrawFlag::Main);
            true
        } else {
            false
        }
    }

    /// Keep the selection on an existing row after the rows changed.
    pub fn clamp_selection(&mut self, row_count: usize) {
        self.selected = self.selected.min(row_count.saturating_sub(1));
    }

    // Overlays

    pub fn open_overlay(&mut self, overlay: UIOverlay) {
        self.overlay = overlay;
        self.request_redraw(RedrawFlag::All);
    }

    /// Close the dialog and hand back what it was showing.
    pub fn take_overlay(&mut self) -> UIOverlay {
        self.request_redraw(RedrawFlag::All);
        std::mem::take(&mut self.overlay)
    }

    pub fn prompt_mut(&mut self) -> Option<&mut PromptState> {
        match &mut self.overlay {
            UIOverlay::Prompt(prompt) => Some(prompt),
            _ => None,
        }
    }

    // Notifications

    pub fn show_info(&mut self, message: impl Into<CompactString>) {
        let n = Notification::new(message, NotificationLevel::Info)
            .dismiss_after(self.notification_timeout);
        self.show(n);
    }

    pub fn show_success(&mut self, message: impl Into<CompactString>) {
        let n = Notification::new(message, NotificationLevel::Success)
            .dismiss_after(self.notification_timeout);
        self.show(n);
    }

    pub fn show_warning(&mut self, message: impl Into<CompactString>) {
        let n = Notification::new(message, NotificationLevel::Warning)
            .dismiss_after(self.notification_timeout * 2);
        self.show(n);
    }

    /// Errors stay until dismissed.
    pub fn show_error(&mut self, message: impl Into<CompactString>) {
        self.show(Notification::new(message, NotificationLevel::Error));
    }

    pub fn dismiss_notification(&mut self) -> bool {
        if self.notification.take().is_some() {
            self.request_redraw(RedrawFlag::All);
            true
        } else {
            false
        }
    }

    /// Auto-dismiss expired notifications.
    pub fn update_notification(&mut self, now: Instant) -> bool {
        if self.notification.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notification = None;
            self.request_redraw(RedrawFlag::All);
            return true;
        }
        false
    }
}

impl DisplaySurface for UIState {
    fn show(&mut self, notification: Notification) {
        self.notification = Some(notification);
        self.request_redraw(RedrawFlag::Notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redraw_flags() {
        let mut ui = UIState::default();
        assert!(ui.needs_redraw());
        ui.clear_redraw();
        assert!(!ui.needs_redraw());
        ui.request_redraw(RedrawFlag::Main);
        assert!(ui.needs_redraw());
    }

    #[test]
    fn selection_stays_in_range() {
        let mut ui = UIState::default();
        assert!(!ui.move_selection_up());
        assert!(ui.move_selection_down(3));
        assert!(ui.move_selection_down(3));
        assert!(!ui.move_selection_down(3));
        assert_eq!(ui.selected, 2);

        ui.clamp_selection(1);
        assert_eq!(ui.selected, 0);
        ui.clamp_selection(0);
        assert_eq!(ui.selected, 0);
    }

    #[test]
    fn notifications_expire_except_errors() {
        let mut ui = UIState::new(Duration::from_millis(100));
        let later = Instant::now() + Duration::from_secs(1);

        ui.show_info("Photo saved");
        assert!(ui.update_notification(later));
        assert!(ui.notification.is_none());

        ui.show_error("boom");
        assert!(!ui.update_notification(later));
        assert!(ui.dismiss_notification());
        assert!(!ui.dismiss_notification());
    }

    #[test]
    fn overlay_take_closes_it() {
        let mut ui = UIState::default();
        ui.open_overlay(UIOverlay::Prompt(PromptState::new(PromptKind::AddHome)));
        ui.prompt_mut().unwrap().insert_char('h');
        ui.prompt_mut().unwrap().insert_char('\n');

        match ui.take_overlay() {
            UIOverlay::Prompt(p) => assert_eq!(p.input, "h"),
            other => panic!("unexpected overlay {other:?}"),
        }
        assert!(!ui.overlay.is_open());
        assert!(ui.prompt_mut().is_none());
    }

    #[test]
    fn confirm_messages() {
        let intent = DeleteIntent {
            name: "home1".into(),
            target: "/b/home1".into(),
        };
        assert_eq!(
            ConfirmRequest::DeleteEntry(intent).message(),
            "Are you sure you want to delete home1?"
        );
    }
}
