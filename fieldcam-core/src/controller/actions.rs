//! src/controller/actions.rs
//! ============================================================================
//! # Actions: Centralized Application Commands
//!
//! Every input, whether a classified press on a control, a key, or a timer
//! tick, is turned into one `Action` before anything changes state.

use std::ffi::OsString;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Short press on an entry.
    Descend(OsString),

    /// Short press on "..".
    Ascend,

    /// Long press on an entry; asks for confirmation first.
    RequestDelete(OsString),

    /// Ask to remove everything in the current location.
    RequestDeleteAll,

    /// Create the next numbered entrance in the current location.
    CreateNumbered,

    /// Open the "add home" name prompt.
    ShowHomePrompt,

    /// Take a photo into the current location.
    CapturePhoto,

    ResetCounter,

    /// "Yes" / "Create" in the open dialog.
    DialogAccept,

    /// "No" / "Cancel" in the open dialog.
    DialogCancel,

    PromptInput(char),

    PromptBackspace,

    MoveSelectionUp,

    MoveSelectionDown,

    /// Keyboard equivalent of a short press on the selected row.
    ActivateSelected,

    /// Keyboard equivalent of a long press on the selected row.
    DeleteSelected,

    DismissNotification,

    ReloadDirectory,

    /// Terminal resized; hit regions move with the next frame.
    Resize(u16, u16),

    /// Periodic tick (notification expiry).
    Tick,

    Quit,

    /// Input consumed, nothing to do.
    NoOp,
}
