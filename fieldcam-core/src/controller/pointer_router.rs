// fieldcam-core/src/controller/pointer_router.rs
// One gesture classifier per visible control, fed from raw mouse events

use std::collections::HashMap;
use std::time::Instant;

use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use tracing::debug;

use crate::controller::actions::Action;
use crate::controller::dispatch_table::{DispatchTable, Target};
use crate::controller::gesture::{GestureClassifier, PointerId, PressEvent};
use crate::view::hit_map::HitMap;

#[derive(Debug, Default)]
pub struct PointerRouter {
    classifiers: HashMap<Target, GestureClassifier>,
}

impl PointerRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match the classifiers to the controls of the last frame. Controls
    /// that are still on screen keep their pending presses.
    pub fn sync(&mut self, hits: &HitMap) {
        self.classifiers
            .retain(|target, _| hits.area_of(target).is_some());

        for (area, target) in hits.iter() {
            self.classifiers
                .entry(target.clone())
                .and_modify(|c| c.set_bounds(*area))
                .or_insert_with(|| GestureClassifier::new(target.label(), *area));
        }
    }

    /// Drop every pending press.
    pub fn cancel_all(&mut self) {
        self.classifiers.values_mut().for_each(GestureClassifier::cancel);
    }

    /// Feed a mouse event. Only a button release can complete a gesture.
    pub fn handle_mouse(&mut self, event: MouseEvent, at: Instant) -> Option<(Target, PressEvent)> {
        let point = Position::new(event.column, event.row);

        match event.kind {
            MouseEventKind::Down(button) => {
                let pointer = PointerId::from(button);
                for (target, classifier) in &mut self.classifiers {
                    if classifier.press_down_at(pointer, point, at) {
                        debug!(?target, ?pointer, "Press started");
                        break;
                    }
                }
                None
            }
            MouseEventKind::Up(button) => {
                let pointer = PointerId::from(button);
                let mut fired = None;

                for (target, classifier) in &mut self.classifiers {
                    if !classifier.is_pressed_by(pointer) {
                        continue;
                    }
                    if let Some(event) = classifier.press_up_at(pointer, point, at) {
                        fired = Some((target.clone(), event));
                    }
                }

                fired
            }
            _ => None,
        }
    }

    /// Mouse event straight to action, through the dispatch table.
    pub fn route(&mut self, event: MouseEvent, at: Instant, table: &DispatchTable) -> Option<Action> {
        let (target, press) = self.handle_mouse(event, at)?;
        let action = table.resolve(&target, press.kind);
        debug!(?target, kind = ?press.kind, ?action, "Press classified");
        action
    }
}
