//! GUI-specific constants for layout and colors

use egui;

/// Settings window dimensions
pub const WINDOW_WIDTH: f32 = 560.0;
pub const WINDOW_HEIGHT: f32 = 760.0;
pub const WINDOW_MIN_WIDTH: f32 = 420.0;
pub const WINDOW_MIN_HEIGHT: f32 = 480.0;

/// Layout spacing
pub const PADDING: f32 = 10.0;
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Reload advisory banner color
pub const NOTICE_COLOR: egui::Color32 = egui::Color32::from_rgb(200, 160, 0);

/// Accent color text field width
pub const COLOR_FIELD_WIDTH: f32 = 120.0;
