//! src/view/hit_map.rs
//! Screen regions of the pressable controls drawn in the last frame.

use ratatui::layout::Rect;

use crate::controller::dispatch_table::Target;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    regions: Vec<(Rect, Target)>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, area: Rect, target: Target) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, target));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Rect, Target)> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn area_of(&self, target: &Target) -> Option<Rect> {
        self.regions
            .iter()
            .find(|(_, t)| t == target)
            .map(|(area, _)| *area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::dispatch_table::DialogButton;

    #[test]
    fn empty_regions_are_skipped() {
        let mut hits = HitMap::new();
        assert!(hits.is_empty());
        hits.push(Rect::new(0, 0, 40, 20), Target::Entry("home1".into()));
        hits.push(Rect::new(10, 5, 10, 3), Target::Dialog(DialogButton::Accept));
        hits.push(Rect::new(0, 0, 0, 3), Target::Up);

        assert_eq!(hits.len(), 2);
        assert_eq!(
            hits.area_of(&Target::Dialog(DialogButton::Accept)),
            Some(Rect::new(10, 5, 10, 3))
        );
        assert!(hits.area_of(&Target::Up).is_none());
    }
}
