//! ``src/model/app_state.rs``
//! ============================================================================
//! # `AppState`: everything the dispatcher mutates and the renderer reads
//!
//! Owned by `main` on the single event thread, so no locks are involved.

use compact_str::CompactString;
use tracing::debug;

use crate::camera::CameraSurface;
use crate::controller::dispatch_table::{DispatchTable, Target, row_targets};
use crate::error::AppResult;
use crate::model::nav_state::Listing;
use crate::model::navigator::Navigator;
use crate::model::ui_state::{RedrawFlag, UIState};

pub struct AppState {
    pub navigator: Navigator,

    pub camera: Box<dyn CameraSurface>,

    pub ui: UIState,

    /// Last successful render of the current location.
    pub listing: Listing,

    /// Rebuilt together with `listing`.
    pub table: DispatchTable,

    pub entrance_prefix: CompactString,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("navigator", &self.navigator)
            .field("ui", &self.ui)
            .field("listing", &self.listing)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Renders the base location once; fails if even that is impossible.
    pub fn new(
        mut navigator: Navigator,
        camera: Box<dyn CameraSurface>,
        ui: UIState,
        entrance_prefix: impl Into<CompactString>,
    ) -> AppResult<Self> {
        let listing = navigator.render()?;
        let table = DispatchTable::from_listing(&listing);

        Ok(Self {
            navigator,
            camera,
            ui,
            listing,
            table,
            entrance_prefix: entrance_prefix.into(),
        })
    }

    /// Replace the listing wholesale. Selection goes back to the top when
    /// the location changed.
    pub fn set_listing(&mut self, listing: Listing) {
        if listing.location != self.listing.location {
            self.ui.selected = 0;
        }
        self.table = DispatchTable::from_listing(&listing);
        self.listing = listing;

        let rows = self.rows().len();
        self.ui.clamp_selection(rows);
        self.ui.request_redraw(RedrawFlag::All);
        debug!(location = %self.listing.location.display(), rows, "Listing updated");
    }

    /// Re-render the current location.
    pub fn refresh(&mut self) -> AppResult<()> {
        let listing = self.navigator.render()?;
        self.set_listing(listing);
        Ok(())
    }

    pub fn rows(&self) -> Vec<Target> {
        row_targets(&self.listing)
    }

    pub fn selected_target(&self) -> Option<Target> {
        self.rows().into_iter().nth(self.ui.selected)
    }

    #[inline]
    pub fn photo_count(&self) -> u64 {
        self.navigator.state().photo_count()
    }
}
