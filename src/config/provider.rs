//! Mutable per-provider and library-wide preferences

use serde::Serialize;
use tracing::{info, warn};

use super::descriptor::{ProviderDescriptor, ThemeStyle};
use crate::constants::{keys, theme};
use crate::persistence::PersistenceStore;

/// Persisted state for one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub provider_id: String,
    pub enabled: bool,
    pub auto_switch_on: bool,
    /// Always a key of the descriptor's theme catalog
    pub selected_theme: String,
    /// Accepted verbatim, no color validation
    pub accent_color: String,
    pub custom_stylesheet: String,
}

/// Single preference shared by the whole library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryConfig {
    pub auto_switch_on_load: bool,
}

impl ProviderConfig {
    /// Descriptor defaults with nothing restored
    pub fn defaults(descriptor: &ProviderDescriptor) -> Self {
        Self {
            provider_id: descriptor.id.to_string(),
            enabled: false,
            auto_switch_on: false,
            selected_theme: theme::DEFAULT.to_string(),
            accent_color: descriptor.default_accent_color.to_string(),
            custom_stylesheet: String::new(),
        }
    }

    /// Merge descriptor defaults with whatever `store` holds for this provider
    pub fn restore<S: PersistenceStore>(descriptor: &ProviderDescriptor, store: &S) -> Self {
        let defaults = Self::defaults(descriptor);

        let stored_theme: String = store.get(&descriptor.key(keys::SELECTED_THEME), defaults.selected_theme.clone());
        let selected_theme = match descriptor.theme(&stored_theme) {
            Ok(_) => stored_theme,
            Err(err) => {
                warn!(error = %err, fallback = theme::DEFAULT, "Stored theme not recognized, using fallback");
                defaults.selected_theme.clone()
            }
        };

        let config = Self {
            enabled: store.get(&descriptor.key(keys::ENABLED), defaults.enabled),
            auto_switch_on: store.get(&descriptor.key(keys::AUTO_SWITCH_ON), defaults.auto_switch_on),
            selected_theme,
            accent_color: store.get(&descriptor.key(keys::BORDER_COLOR), defaults.accent_color.clone()),
            custom_stylesheet: store.get(&descriptor.key(keys::CUSTOM_STYLESHEET), defaults.custom_stylesheet.clone()),
            provider_id: defaults.provider_id,
        };
        info!(
            provider = %config.provider_id,
            enabled = config.enabled,
            theme = %config.selected_theme,
            "Restored provider settings"
        );
        config
    }

    /// The custom stylesheet field is only editable while the Custom theme is selected
    pub fn custom_stylesheet_editable(&self) -> bool {
        self.selected_theme == theme::CUSTOM
    }

    /// Whether the selected theme resolves to the custom stylesheet text
    pub fn uses_custom_stylesheet(&self, descriptor: &ProviderDescriptor) -> bool {
        matches!(descriptor.theme(&self.selected_theme), Ok(ThemeStyle::Custom))
    }
}

impl LibraryConfig {
    pub fn restore<S: PersistenceStore>(store: &S) -> Self {
        let auto_switch_on_load = store.get(keys::LIB_AUTO_SWITCH, false);
        info!(auto_switch_on_load, "Restored library settings");
        Self { auto_switch_on_load }
    }
}
