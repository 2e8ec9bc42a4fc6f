//! ``src/controller/event_loop.rs``
//! ============================================================================
//! # Event loop: terminal events and ticks in, actions out
//!
//! [`InputTranslator`] is the pure part (keys and mouse to [`Action`]) and
//! owns the [`PointerRouter`]. [`EventLoop`] adds the async sources.

use std::time::{Duration, Instant};

use crossterm::event::{
    Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::controller::actions::Action;
use crate::controller::pointer_router::PointerRouter;
use crate::model::app_state::AppState;
use crate::model::ui_state::{UIOverlay, UIState};
use crate::view::hit_map::HitMap;

/// Keyboard map for the current UI state.
pub fn map_key(key: KeyEvent, ui: &UIState) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::NoOp;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    // a visible notification eats the next key
    if ui.notification.is_some() {
        return Action::DismissNotification;
    }

    match &ui.overlay {
        UIOverlay::Confirm(_) => match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Action::DialogAccept,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Action::DialogCancel,
            _ => Action::NoOp,
        },

        UIOverlay::Prompt(_) => match key.code {
            KeyCode::Enter => Action::DialogAccept,
            KeyCode::Esc => Action::DialogCancel,
            KeyCode::Backspace => Action::PromptBackspace,
            KeyCode::Char(ch) => Action::PromptInput(ch),
            _ => Action::NoOp,
        },

        UIOverlay::None => match key.code {
            KeyCode::Up => Action::MoveSelectionUp,
            KeyCode::Down => Action::MoveSelectionDown,
            KeyCode::Enter => Action::ActivateSelected,
            KeyCode::Char('d') | KeyCode::Delete => Action::DeleteSelected,
            KeyCode::Backspace => Action::Ascend,
            KeyCode::Char('n') => Action::CreateNumbered,
            KeyCode::Char('a') => Action::ShowHomePrompt,
            KeyCode::Char('p') => Action::CapturePhoto,
            KeyCode::Char('r') => Action::ResetCounter,
            KeyCode::Char('D') => Action::RequestDeleteAll,
            KeyCode::F(5) => Action::ReloadDirectory,
            KeyCode::Char('q') => Action::Quit,
            _ => Action::NoOp,
        },
    }
}

/// Turns terminal events into actions. Mouse presses go through the
/// pointer router so short and long presses are told apart.
#[derive(Debug, Default)]
pub struct InputTranslator {
    router: PointerRouter,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up the regions of the frame just drawn.
    pub fn sync(&mut self, hits: &HitMap) {
        self.router.sync(hits);
    }

    pub fn translate(&mut self, event: TermEvent, app: &AppState, at: Instant) -> Action {
        match event {
            TermEvent::Key(key) => {
                trace!(code = ?key.code, modifiers = ?key.modifiers, "Key event");
                let action = map_key(key, &app.ui);
                if matches!(action, Action::DismissNotification | Action::DialogAccept | Action::DialogCancel) {
                    self.router.cancel_all();
                }
                action
            }

            TermEvent::Mouse(mouse) => self.translate_mouse(mouse, app, at),

            TermEvent::Resize(w, h) => {
                info!("Terminal resize: {}x{}", w, h);
                self.router.cancel_all();
                Action::Resize(w, h)
            }

            _ => Action::NoOp,
        }
    }

    fn translate_mouse(&mut self, mouse: MouseEvent, app: &AppState, at: Instant) -> Action {
        match mouse.kind {
            MouseEventKind::Down(_) if app.ui.notification.is_some() => {
                self.router.cancel_all();
                Action::DismissNotification
            }

            MouseEventKind::Down(_) | MouseEventKind::Up(_) => self
                .router
                .route(mouse, at, &app.table)
                .unwrap_or(Action::NoOp),

            MouseEventKind::ScrollUp if !app.ui.overlay.is_open() => Action::MoveSelectionUp,
            MouseEventKind::ScrollDown if !app.ui.overlay.is_open() => Action::MoveSelectionDown,

            _ => Action::NoOp,
        }
    }
}

/// Async side of the loop: the crossterm event stream plus a tick.
pub struct EventLoop {
    events: EventStream,
    ticker: Interval,
    translator: InputTranslator,
    event_count: u64,
}

impl EventLoop {
    pub fn new(tick_rate: Duration) -> Self {
        let mut ticker = tokio::time::interval(tick_rate);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            events: EventStream::new(),
            ticker,
            translator: InputTranslator::new(),
            event_count: 0,
        }
    }

    pub fn sync(&mut self, hits: &HitMap) {
        self.translator.sync(hits);
    }

    pub const fn event_count(&self) -> u64 {
        self.event_count
    }

    /// `None` once the terminal event stream is closed.
    pub async fn next_action(&mut self, app: &AppState) -> Option<Action> {
        tokio::select! {
            maybe_event = self.events.next() => match maybe_event {
                Some(Ok(event)) => {
                    self.event_count += 1;
                    let action = self.translator.translate(event, app, Instant::now());
                    if !matches!(action, Action::NoOp) {
                        debug!(?action, "Terminal event mapped to action");
                    }
                    Some(action)
                }
                Some(Err(e)) => {
                    debug!("Terminal event error: {}", e);
                    Some(Action::NoOp)
                }
                None => {
                    info!("Event loop terminated - no more events");
                    None
                }
            },

            _ = self.ticker.tick() => Some(Action::Tick),
        }
    }
}
