// fieldcam-core/src/controller/gesture.rs
// Short/long press classification for one pressable control

use std::collections::HashMap;
use std::time::{Duration, Instant};

use compact_str::CompactString;
use crossterm::event::MouseButton;
use ratatui::layout::{Position, Rect};
use tracing::trace;

/// Holds shorter than this are short presses.
pub const LONG_PRESS_THRESHOLD: Duration = Duration::from_secs(1);

/// Which pointer produced a press. Each mouse button is tracked on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    Primary,
    Secondary,
    Middle,
}

impl From<MouseButton> for PointerId {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::Primary,
            MouseButton::Right => Self::Secondary,
            MouseButton::Middle => Self::Middle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    Short,
    Long,
}

impl PressKind {
    #[must_use]
    pub fn from_hold(held: Duration) -> Self {
        if held < LONG_PRESS_THRESHOLD {
            Self::Short
        } else {
            Self::Long
        }
    }
}

/// The single event a completed press produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PressEvent {
    pub kind: PressKind,
    pub label: CompactString,
}

/// One control's press tracker.
///
/// A press-down inside the bounds records a start time for that pointer; the
/// matching press-up inside the bounds yields exactly one [`PressEvent`].
/// A press-up outside the bounds aborts the gesture.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    label: CompactString,
    bounds: Rect,
    press_start: HashMap<PointerId, Instant>,
}

impl GestureClassifier {
    pub fn new(label: impl Into<CompactString>, bounds: Rect) -> Self {
        Self {
            label: label.into(),
            bounds,
            press_start: HashMap::new(),
        }
    }

    /// Layout moved; pending presses are kept.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    #[inline]
    pub fn contains(&self, point: Position) -> bool {
        self.bounds.contains(point)
    }

    pub fn is_pressed_by(&self, pointer: PointerId) -> bool {
        self.press_start.contains_key(&pointer)
    }

    /// Returns `true` when the press was inside and has been consumed. A
    /// second down from the same pointer replaces the earlier start.
    pub fn press_down_at(&mut self, pointer: PointerId, point: Position, at: Instant) -> bool {
        if !self.contains(point) {
            return false;
        }

        self.press_start.insert(pointer, at);
        trace!(label = %self.label, ?pointer, "Press down");
        true
    }

    pub fn press_up_at(
        &mut self,
        pointer: PointerId,
        point: Position,
        at: Instant,
    ) -> Option<PressEvent> {
        let started = self.press_start.remove(&pointer);

        if !self.contains(point) {
            if started.is_some() {
                trace!(label = %self.label, ?pointer, "Press aborted outside bounds");
            }
            return None;
        }

        let held = at.saturating_duration_since(started?);
        let kind = PressKind::from_hold(held);
        trace!(label = %self.label, ?pointer, ?kind, held_ms = held.as_millis() as u64, "Press up");

        Some(PressEvent {
            kind,
            label: self.label.clone(),
        })
    }

    /// Forget every pending press (e.g. a modal opened over the control).
    pub fn cancel(&mut self) {
        self.press_start.clear();
    }
}
