//! Application-wide constants
//!
//! Persistence key layout, theme names and user-facing strings live here so the
//! wire format of stored preferences has a single source of truth.

/// Persistence key layout shared with previously stored preferences
pub mod keys {
    /// Library-wide auto switch flag (hide the English LNMTL text after loading)
    pub const LIB_AUTO_SWITCH: &str = "autoSwitchLNMTL";

    /// Per-provider key suffixes, joined to the provider's CSS class as `{class}-{suffix}`
    pub const ENABLED: &str = "enabled";
    pub const AUTO_SWITCH_ON: &str = "autoSwitchOn";
    pub const SELECTED_THEME: &str = "selectedTheme";
    pub const BORDER_COLOR: &str = "borderColor";
    pub const CUSTOM_STYLESHEET: &str = "customStyleSheet";
}

/// Theme catalog names
pub mod theme {
    /// Theme used when nothing (or something unrecognized) is stored
    pub const DEFAULT: &str = "Default";

    /// Sentinel theme deferring to the user's stored stylesheet text
    pub const CUSTOM: &str = "Custom";

    pub const LNMTL_EN: &str = "LNMTL_EN";
    pub const LNMTL_ZN: &str = "LNMTL_ZN";
}

/// Text shown on the settings surface
pub mod ui {
    pub const LIBRARY_TITLE: &str = "TranslateLib Settings";
    pub const LIBRARY_AUTO_SWITCH_LABEL: &str =
        "Automatically hide English LNMTL Translation after loading";
    pub const RELOAD_NOTICE: &str = "Please refresh for settings to apply.";
    pub const CUSTOM_STYLESHEET_LABEL: &str =
        "Custom Stylesheet(choose the theme Custom to use):";
}

/// Persistent store file location
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "translatelib";

    /// Flat JSON object holding every stored preference
    pub const FILENAME: &str = "settings.json";
}
