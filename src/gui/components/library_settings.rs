//! Library-wide section: auto switch checkbox and per-provider enable toggles

use eframe::egui;
use tokio::sync::mpsc::UnboundedSender;

use crate::gui::constants::ITEM_SPACING;
use crate::surface::{LibrarySectionView, SettingsEvent};

/// Renders the library section, sending an event for every changed control
pub fn ui(ui: &mut egui::Ui, view: &LibrarySectionView, events: &UnboundedSender<SettingsEvent>) {
    ui.group(|ui| {
        ui.label(egui::RichText::new(view.title).heading().strong());
        ui.add_space(ITEM_SPACING);

        let mut auto_switch = view.auto_switch_on_load;
        if ui.checkbox(&mut auto_switch, view.auto_switch_label).changed() {
            let _ = events.send(SettingsEvent::LibraryAutoSwitch(auto_switch));
        }

        ui.add_space(ITEM_SPACING);

        // Enabled translators
        ui.horizontal(|ui| {
            for toggle in &view.toggles {
                let mut enabled = toggle.enabled;
                if ui.toggle_value(&mut enabled, toggle.short_label).changed() {
                    let _ = events.send(SettingsEvent::ProviderEnabled {
                        provider: toggle.provider.clone(),
                        enabled,
                    });
                }
            }
        });
    });
}
