//! Compiled-in facts about each translation provider

use crate::constants::theme;
use crate::error::{SettingsError, SettingsResult};

/// What a theme name resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeStyle {
    /// Literal CSS fragment
    Css(&'static str),
    /// Use the provider's stored custom stylesheet text instead
    Custom,
}

/// Immutable description of one provider
///
/// Provider specialization is pure data: display strings, the CSS class the
/// overlay uses for its translated text, a default accent color and an ordered
/// theme catalog that always contains `Default` and the `Custom` sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub short_label: &'static str,
    /// CSS class of injected text; also the namespace of persisted keys
    pub class_name: &'static str,
    pub default_accent_color: &'static str,
    pub themes: &'static [(&'static str, ThemeStyle)],
}

pub const GOOGLE: ProviderDescriptor = ProviderDescriptor {
    id: "google",
    display_name: "Google Translate",
    short_label: "GT",
    class_name: "gt",
    default_accent_color: "lightblue",
    themes: &[
        (
            theme::DEFAULT,
            ThemeStyle::Css(".gt { color:white; font-size: 2.3rem; margin-bottom:42px; font-family: Roboto }"),
        ),
        (theme::LNMTL_EN, ThemeStyle::Css("")),
        (theme::LNMTL_ZN, ThemeStyle::Css(".gt {font-size: 150%;}")),
        (theme::CUSTOM, ThemeStyle::Custom),
    ],
};

pub const REVERSO: ProviderDescriptor = ProviderDescriptor {
    id: "reverso",
    display_name: "Reverso Translate",
    short_label: "RV",
    class_name: "rv",
    default_accent_color: "lightcoral",
    themes: &[
        (
            theme::DEFAULT,
            ThemeStyle::Css(".rv { color:white; font-size: 2.3rem; margin-bottom:42px; font-family: Roboto }"),
        ),
        (theme::LNMTL_EN, ThemeStyle::Css("")),
        (theme::LNMTL_ZN, ThemeStyle::Css(".rv {font-size: 150%;}")),
        (theme::CUSTOM, ThemeStyle::Custom),
    ],
};

/// Providers shipped with the library, in display order
pub fn builtin_providers() -> Vec<ProviderDescriptor> {
    vec![GOOGLE, REVERSO]
}

impl ProviderDescriptor {
    /// Resolve a theme name against this provider's catalog
    pub fn theme(&self, name: &str) -> SettingsResult<ThemeStyle> {
        self.themes
            .iter()
            .find(|(theme_name, _)| *theme_name == name)
            .map(|(_, style)| *style)
            .ok_or_else(|| SettingsError::UnrecognizedTheme {
                provider: self.id.to_string(),
                theme: name.to_string(),
            })
    }

    pub fn has_theme(&self, name: &str) -> bool {
        self.theme(name).is_ok()
    }

    /// Theme names in catalog order
    pub fn theme_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.themes.iter().map(|(name, _)| *name)
    }

    /// Persistence key for one of this provider's fields
    pub fn key(&self, field: &str) -> String {
        format!("{}-{}", self.class_name, field)
    }

    /// Placeholder for the custom stylesheet field: the Default theme text
    pub fn stylesheet_placeholder(&self) -> &'static str {
        match self.theme(theme::DEFAULT) {
            Ok(ThemeStyle::Css(css)) => css,
            _ => "",
        }
    }
}
