//! Stylesheet composition
//!
//! Pure functions from provider state to CSS text. The composed sheet is always
//! published whole, replacing whatever was injected before.

use tracing::debug;

use crate::config::{ProviderConfig, ProviderDescriptor, ProviderRegistry, ThemeStyle};

/// Accent border, translucent overlay and sentence indentation for one provider class
pub fn structural_rules(class: &str, color: &str) -> String {
    format!(
        ".{class} {{border-left: 3px solid {color};position:relative;}}
            .{class}.translateLib::before {{
                content: '';
                width: 100%;
                height: 100%;
                display: block;
                position: absolute;
                background-color: {color};
                opacity: 0.2;
                z-index: -1;
            }}
            {class} sentence {{
                margin-left:15px;
            }}
            "
    )
}

/// CSS for one provider.
///
/// The Custom theme yields the stored stylesheet text verbatim with no
/// structural rules; any other theme yields its catalog fragment followed by
/// [`structural_rules`].
pub fn compose_provider(config: &ProviderConfig, descriptor: &ProviderDescriptor) -> String {
    match descriptor.theme(&config.selected_theme) {
        Ok(ThemeStyle::Custom) => config.custom_stylesheet.clone(),
        Ok(ThemeStyle::Css(css)) => {
            let mut fragment = String::from(css);
            fragment.push_str(&structural_rules(descriptor.class_name, &config.accent_color));
            fragment
        }
        Err(err) => {
            // Restore and edits keep the selection valid; compose as Default regardless.
            debug!(error = %err, "Composing unrecognized theme as Default");
            let css = match descriptor.theme(crate::constants::theme::DEFAULT) {
                Ok(ThemeStyle::Css(css)) => css,
                _ => "",
            };
            format!("{css}{}", structural_rules(descriptor.class_name, &config.accent_color))
        }
    }
}

/// Concatenate every provider's fragment in registration order, enabled or not
pub fn compose_all(registry: &ProviderRegistry) -> String {
    let stylesheet: String = registry
        .iter()
        .map(|entry| compose_provider(&entry.config, &entry.descriptor))
        .collect();
    debug!(len = stylesheet.len(), stylesheet = %stylesheet, "Composed stylesheet");
    stylesheet
}
