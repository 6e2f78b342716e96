//! egui settings panel hosting the settings manager

pub mod components;
pub mod constants;
pub mod manager;

pub use manager::{PanelHost, run_gui};
