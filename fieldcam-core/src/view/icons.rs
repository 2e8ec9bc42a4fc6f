//! src/view/icons.rs
//! ============================================================================
//! # Filesystem Icons (Nerd Fonts)

pub const FOLDER_ICON: &str = "";
pub const FILE_ICON: &str = "";
pub const UP_ICON: &str = "";
pub const CAMERA_ICON: &str = "";
