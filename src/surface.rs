//! Bridge between the settings core and whatever renders it
//!
//! The core hands the host plain render views, receives typed change events
//! back, and asks the host to publish stylesheets and show the reload advisory.

use anyhow::Result;
use tracing::info;

use crate::config::{LibraryConfig, ProviderEntry, ProviderRegistry};
use crate::constants::ui;

/// A single user edit coming back from the surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    /// Library-wide "hide English LNMTL text after loading"
    LibraryAutoSwitch(bool),
    ProviderEnabled { provider: String, enabled: bool },
    /// Show this provider's translation automatically after loading
    ProviderAutoSwitch { provider: String, enabled: bool },
    ThemeSelected { provider: String, theme: String },
    AccentColorChanged { provider: String, color: String },
    CustomStylesheetEdited { provider: String, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderToggleView {
    pub provider: String,
    pub short_label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySectionView {
    pub title: &'static str,
    pub auto_switch_label: &'static str,
    pub auto_switch_on_load: bool,
    /// One enable toggle per provider, in registration order
    pub toggles: Vec<ProviderToggleView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSectionView {
    pub provider: String,
    pub title: String,
    pub auto_switch_label: String,
    pub auto_switch_on: bool,
    /// Theme selector options; `selected_theme` is pre-selected
    pub themes: Vec<&'static str>,
    pub selected_theme: String,
    pub accent_color: String,
    pub custom_stylesheet: String,
    pub custom_stylesheet_editable: bool,
    pub custom_stylesheet_placeholder: &'static str,
}

/// Everything needed to render the settings surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceView {
    pub library: LibrarySectionView,
    pub providers: Vec<ProviderSectionView>,
}

impl SurfaceView {
    pub fn build(library: &LibraryConfig, registry: &ProviderRegistry) -> Self {
        let toggles = registry
            .iter()
            .map(|entry| ProviderToggleView {
                provider: entry.config.provider_id.clone(),
                short_label: entry.descriptor.short_label,
                enabled: entry.config.enabled,
            })
            .collect();

        Self {
            library: LibrarySectionView {
                title: ui::LIBRARY_TITLE,
                auto_switch_label: ui::LIBRARY_AUTO_SWITCH_LABEL,
                auto_switch_on_load: library.auto_switch_on_load,
                toggles,
            },
            providers: registry.iter().map(ProviderSectionView::from_entry).collect(),
        }
    }
}

impl ProviderSectionView {
    pub fn from_entry(entry: &ProviderEntry) -> Self {
        let ProviderEntry { descriptor, config } = entry;
        Self {
            provider: config.provider_id.clone(),
            title: format!("{} Settings", descriptor.display_name),
            auto_switch_label: format!("Automatically show {} after loading", descriptor.display_name),
            auto_switch_on: config.auto_switch_on,
            themes: descriptor.theme_names().collect(),
            selected_theme: config.selected_theme.clone(),
            accent_color: config.accent_color.clone(),
            custom_stylesheet: config.custom_stylesheet.clone(),
            custom_stylesheet_editable: config.custom_stylesheet_editable(),
            custom_stylesheet_placeholder: descriptor.stylesheet_placeholder(),
        }
    }
}

/// Host-side capabilities the settings manager drives
#[allow(async_fn_in_trait)]
pub trait SettingsHost {
    /// Render the settings surface. Runs once; failures are logged by the caller.
    async fn build_surface(&mut self, view: SurfaceView) -> Result<()>;

    /// Replace any previously published stylesheet with `stylesheet`
    fn replace_stylesheet(&mut self, stylesheet: &str);

    /// Show a one-shot advisory banner
    fn show_advisory(&mut self, message: &str);
}

/// Host without a rendering toolkit; keeps the latest published artifacts
#[derive(Debug, Default)]
pub struct HeadlessHost {
    pub surface: Option<SurfaceView>,
    pub stylesheet: String,
    pub publish_count: usize,
    pub advisories: Vec<String>,
}

impl SettingsHost for HeadlessHost {
    async fn build_surface(&mut self, view: SurfaceView) -> Result<()> {
        info!(providers = view.providers.len(), "Built headless settings surface");
        self.surface = Some(view);
        Ok(())
    }

    fn replace_stylesheet(&mut self, stylesheet: &str) {
        self.stylesheet = stylesheet.to_string();
        self.publish_count += 1;
    }

    fn show_advisory(&mut self, message: &str) {
        info!(message = %message, "Advisory");
        self.advisories.push(message.to_string());
    }
}
