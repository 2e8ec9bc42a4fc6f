// fieldcam-core/src/controller/dispatch_table.rs
// Maps each pressable control to its (short, long) action pair

use std::collections::HashMap;
use std::ffi::OsString;

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::controller::actions::Action;
use crate::controller::gesture::PressKind;
use crate::model::nav_state::Listing;

/// Label of the row that goes one level up.
pub const UP_LABEL: &str = "..";

/// Plain buttons around the entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlButton {
    DeleteAll,
    NewEntrance,
    AddHome,
    TakePhoto,
    ResetCounter,
}

impl ControlButton {
    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self {
            Self::DeleteAll => "Delete all",
            Self::NewEntrance => "New entrance",
            Self::AddHome => "Add home",
            Self::TakePhoto => "Take photo",
            Self::ResetCounter => "Reset counter",
        }
    }

    #[must_use]
    pub const fn action(self) -> Action {
        match self {
            Self::DeleteAll => Action::RequestDeleteAll,
            Self::NewEntrance => Action::CreateNumbered,
            Self::AddHome => Action::ShowHomePrompt,
            Self::TakePhoto => Action::CapturePhoto,
            Self::ResetCounter => Action::ResetCounter,
        }
    }

    /// Controls shown for `listing`, in layout order. "New entrance" and
    /// "Take photo" only exist away from the base folder.
    #[must_use]
    pub fn visible(listing: &Listing) -> SmallVec<[Self; 5]> {
        let mut controls = SmallVec::new();
        controls.push(Self::DeleteAll);
        if listing.can_create_numbered() {
            controls.push(Self::NewEntrance);
        }
        controls.push(Self::AddHome);
        if listing.can_capture() {
            controls.push(Self::TakePhoto);
        }
        controls.push(Self::ResetCounter);
        controls
    }
}

/// Buttons inside a modal dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogButton {
    Accept,
    Cancel,
}

/// Identity of a pressable control.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Up,
    /// Keyed by the raw OS name.
    Entry(OsString),
    Control(ControlButton),
    Dialog(DialogButton),
}

impl Target {
    #[must_use]
    pub fn label(&self) -> CompactString {
        match self {
            Self::Up => CompactString::const_new(UP_LABEL),
            Self::Entry(name) => CompactString::from(name.to_string_lossy()),
            Self::Control(button) => CompactString::const_new(button.caption()),
            Self::Dialog(DialogButton::Accept) => CompactString::const_new("OK"),
            Self::Dialog(DialogButton::Cancel) => CompactString::const_new("Cancel"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPair {
    pub on_short: Action,
    pub on_long: Option<Action>,
}

impl ActionPair {
    /// A plain button fires the same action however long it is held.
    fn plain(action: Action) -> Self {
        Self {
            on_long: Some(action.clone()),
            on_short: action,
        }
    }
}

/// Rows of the entry list, top to bottom.
#[must_use]
pub fn row_targets(listing: &Listing) -> Vec<Target> {
    let mut rows = Vec::with_capacity(listing.entries.len() + 1);
    if listing.show_up() {
        rows.push(Target::Up);
    }
    rows.extend(listing.entries.iter().map(|e| Target::Entry(e.name.clone())));
    rows
}

/// Data-driven replacement for per-button callbacks: each visible control
/// gets an explicit action pair, rebuilt whenever the listing changes.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    routes: HashMap<Target, ActionPair>,
}

impl DispatchTable {
    #[must_use]
    pub fn from_listing(listing: &Listing) -> Self {
        let mut routes = HashMap::with_capacity(listing.entries.len() + 8);

        if listing.show_up() {
            routes.insert(
                Target::Up,
                ActionPair {
                    on_short: Action::Ascend,
                    on_long: None,
                },
            );
        }

        for entry in &listing.entries {
            routes.insert(
                Target::Entry(entry.name.clone()),
                ActionPair {
                    on_short: Action::Descend(entry.name.clone()),
                    on_long: Some(Action::RequestDelete(entry.name.clone())),
                },
            );
        }

        for button in ControlButton::visible(listing) {
            routes.insert(Target::Control(button), ActionPair::plain(button.action()));
        }

        routes.insert(
            Target::Dialog(DialogButton::Accept),
            ActionPair::plain(Action::DialogAccept),
        );
        routes.insert(
            Target::Dialog(DialogButton::Cancel),
            ActionPair::plain(Action::DialogCancel),
        );

        Self { routes }
    }

    #[must_use]
    pub fn resolve(&self, target: &Target, kind: PressKind) -> Option<Action> {
        let pair = self.routes.get(target)?;
        match kind {
            PressKind::Short => Some(pair.on_short.clone()),
            PressKind::Long => pair.on_long.clone(),
        }
    }

    #[must_use]
    pub fn contains(&self, target: &Target) -> bool {
        self.routes.contains_key(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::entry::{Entry, EntryKind};
    use std::path::PathBuf;

    fn listing(at_base: bool) -> Listing {
        let location = PathBuf::from("/b/home1");
        Listing {
            entries: vec![Entry::new(
                "entrance1".into(),
                location.join("entrance1"),
                EntryKind::Directory,
            )],
            location,
            title: "home1".into(),
            at_base,
        }
    }

    #[test]
    fn entries_map_to_descend_and_delete() {
        let table = DispatchTable::from_listing(&listing(false));
        let target = Target::Entry("entrance1".into());

        assert_eq!(
            table.resolve(&target, PressKind::Short),
            Some(Action::Descend("entrance1".into()))
        );
        assert_eq!(
            table.resolve(&target, PressKind::Long),
            Some(Action::RequestDelete("entrance1".into()))
        );
    }

    #[test]
    fn up_row_has_no_long_action() {
        let table = DispatchTable::from_listing(&listing(false));
        assert_eq!(table.resolve(&Target::Up, PressKind::Short), Some(Action::Ascend));
        assert_eq!(table.resolve(&Target::Up, PressKind::Long), None);
    }

    #[test]
    fn base_hides_up_and_gated_controls() {
        let table = DispatchTable::from_listing(&listing(true));
        assert!(!table.contains(&Target::Up));
        assert!(!table.contains(&Target::Control(ControlButton::NewEntrance)));
        assert!(!table.contains(&Target::Control(ControlButton::TakePhoto)));
        assert!(table.contains(&Target::Control(ControlButton::AddHome)));
        assert!(table.contains(&Target::Control(ControlButton::DeleteAll)));
    }

    #[test]
    fn plain_buttons_ignore_hold_length() {
        let table = DispatchTable::from_listing(&listing(false));
        let photo = Target::Control(ControlButton::TakePhoto);
        assert_eq!(table.resolve(&photo, PressKind::Short), Some(Action::CapturePhoto));
        assert_eq!(table.resolve(&photo, PressKind::Long), Some(Action::CapturePhoto));
    }

    #[test]
    fn rows_start_with_up_away_from_base() {
        assert_eq!(
            row_targets(&listing(false)),
            vec![Target::Up, Target::Entry("entrance1".into())]
        );
        assert_eq!(
            row_targets(&listing(true)),
            vec![Target::Entry("entrance1".into())]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn entries_are_keyed_by_raw_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        // two names that look the same once made printable
        let a = OsStr::from_bytes(b"dom\xff").to_os_string();
        let b = OsStr::from_bytes(b"dom\xfe").to_os_string();
        let mut listing = listing(false);
        listing.entries = vec![
            Entry::new(a.clone(), PathBuf::from("/b/home1").join(&a), EntryKind::Directory),
            Entry::new(b.clone(), PathBuf::from("/b/home1").join(&b), EntryKind::Directory),
        ];

        let table = DispatchTable::from_listing(&listing);
        assert_eq!(
            table.resolve(&Target::Entry(b.clone()), PressKind::Long),
            Some(Action::RequestDelete(b.clone()))
        );
        assert_eq!(Target::Entry(a).label(), Target::Entry(b).label());
    }
}
