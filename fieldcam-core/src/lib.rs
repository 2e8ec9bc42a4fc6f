pub mod error;

pub mod config;

pub mod camera;
pub use camera::{CameraSurface, CommandCamera, UnavailableCamera};

pub mod controller {

    pub mod actions;
    pub use actions::Action;

    pub mod gesture;
    pub use gesture::{GestureClassifier, LONG_PRESS_THRESHOLD, PointerId, PressEvent, PressKind};

    pub mod dispatch_table;
    pub use dispatch_table::{ActionPair, ControlButton, DialogButton, DispatchTable, Target};

    pub mod pointer_router;
    pub use pointer_router::PointerRouter;

    pub mod action_dispatcher;
    pub use action_dispatcher::{ActionDispatcher, DispatchResult};

    pub mod event_loop;
    pub use event_loop::{EventLoop, InputTranslator};
}

pub mod model {
    pub mod app_state;

    pub mod nav_state;
    pub use nav_state::{DeleteAllReport, DeleteIntent, Listing, NavigatorState};

    pub mod navigator;
    pub use navigator::Navigator;

    pub mod ui_state;
    pub use ui_state::{
        ConfirmRequest, DisplaySurface, Notification, NotificationLevel, PromptKind, PromptState,
        RedrawFlag, UIOverlay, UIState,
    };
}

pub mod view {
    pub mod icons;

    pub mod theme;

    pub mod hit_map;
    pub use hit_map::HitMap;

    pub mod ui;
    pub use ui::UIRenderer;

    pub mod components {
        pub mod button;
        pub use button::Button;
        pub mod dialog;
        pub mod confirm_overlay;
        pub use confirm_overlay::ConfirmOverlay;
        pub mod input_prompt_overlay;
        pub use input_prompt_overlay::InputPromptOverlay;
        pub mod entry_list;
        pub use entry_list::EntryList;
        pub mod notification_overlay;
        pub use notification_overlay::NotificationOverlay;
        pub mod status_bar;
        pub use status_bar::StatusBar;
    }

    pub use components::*;
}

pub mod fs {
    pub mod entry;
    pub use entry::{Entry, EntryKind, scan_entries};

    pub mod filesystem;
    pub use filesystem::{FileSystem, StdFileSystem};
}

pub mod logging;
pub use logging::Logger;

pub use error::AppError;

pub use model::{app_state::AppState, navigator::Navigator, ui_state::UIState};
