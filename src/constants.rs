//! Application-wide constants
//!
//! Single source of truth for storage locations and the fixed strings the
//! two lists are keyed by.

/// Persistent storage locations
pub mod config {
    /// Directory under the user config dir where the order document lives
    pub const APP_DIR: &str = "icon-shelf";

    /// Order document filename
    pub const FILENAME: &str = "order.json";
}

/// List slot keys and the anchor row
pub mod list {
    /// Storage key for the primary list order
    pub const PRIMARY_KEY: &str = "primary-order";

    /// Storage key for the secondary list order
    pub const SECONDARY_KEY: &str = "secondary-order";

    /// Rendered title of the fixed anchor row in the secondary list
    pub const ANCHOR_TITLE: &str = "-- placeholder --";
}
