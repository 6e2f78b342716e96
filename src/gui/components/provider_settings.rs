//! Per-provider section: auto switch, theme selector, accent color, custom stylesheet

use eframe::egui;
use tokio::sync::mpsc::UnboundedSender;

use crate::constants::ui::CUSTOM_STYLESHEET_LABEL;
use crate::gui::constants::{COLOR_FIELD_WIDTH, ITEM_SPACING};
use crate::surface::{ProviderSectionView, SettingsEvent};

pub fn ui(ui: &mut egui::Ui, view: &ProviderSectionView, events: &UnboundedSender<SettingsEvent>) {
    let send = |event: SettingsEvent| {
        let _ = events.send(event);
    };

    ui.group(|ui| {
        ui.label(egui::RichText::new(&view.title).heading().strong());
        ui.add_space(ITEM_SPACING);

        let mut auto_switch = view.auto_switch_on;
        if ui.checkbox(&mut auto_switch, view.auto_switch_label.as_str()).changed() {
            send(SettingsEvent::ProviderAutoSwitch {
                provider: view.provider.clone(),
                enabled: auto_switch,
            });
        }

        ui.add_space(ITEM_SPACING);

        ui.horizontal(|ui| {
            ui.label("Theme:");
            let mut selected = view.selected_theme.clone();
            egui::ComboBox::from_id_salt(format!("{}-selectTheme", view.provider))
                .selected_text(view.selected_theme.as_str())
                .show_ui(ui, |ui| {
                    for theme in &view.themes {
                        ui.selectable_value(&mut selected, theme.to_string(), *theme);
                    }
                });
            if selected != view.selected_theme {
                send(SettingsEvent::ThemeSelected {
                    provider: view.provider.clone(),
                    theme: selected,
                });
            }
        });

        ui.horizontal(|ui| {
            ui.label("Accent Color:");
            let mut color = view.accent_color.clone();
            let text_edit = egui::TextEdit::singleline(&mut color).desired_width(COLOR_FIELD_WIDTH);
            let mut changed = ui.add(text_edit).changed();

            // Picker only for hex colors; named CSS colors are edited as text
            if let Some(mut rgb) = parse_hex_rgb(&color) {
                if ui.color_edit_button_srgb(&mut rgb).changed() {
                    color = format_hex_rgb(rgb);
                    changed = true;
                }
            }

            if changed {
                send(SettingsEvent::AccentColorChanged {
                    provider: view.provider.clone(),
                    color,
                });
            }
        });

        ui.add_space(ITEM_SPACING);
        ui.label(CUSTOM_STYLESHEET_LABEL);

        let mut text = view.custom_stylesheet.clone();
        let editor = egui::TextEdit::multiline(&mut text)
            .hint_text(view.custom_stylesheet_placeholder)
            .desired_rows(2)
            .desired_width(f32::INFINITY)
            .code_editor();
        if ui.add_enabled(view.custom_stylesheet_editable, editor).changed() {
            send(SettingsEvent::CustomStylesheetEdited {
                provider: view.provider.clone(),
                text,
            });
        }
    });
}

/// Parse `#RRGGBB`
fn parse_hex_rgb(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

fn format_hex_rgb([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}
