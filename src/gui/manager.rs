//! Settings window implemented with egui/eframe
//!
//! Controls send `SettingsEvent`s into a channel; each frame drains the channel
//! into the settings manager and re-renders from its state.

use anyhow::{Context, Result, anyhow};
use eframe::{CreationContext, NativeOptions, egui};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

use super::components::{library_settings, provider_settings};
use super::constants::*;
use crate::config::builtin_providers;
use crate::manager::SettingsManager;
use crate::persistence::PersistenceStore;
use crate::surface::{SettingsEvent, SettingsHost, SurfaceView};

/// Host side of the settings window: the stylesheet preview and the advisory banner
#[derive(Debug, Default)]
pub struct PanelHost {
    ready: bool,
    stylesheet: String,
    advisory: Option<String>,
}

impl SettingsHost for PanelHost {
    async fn build_surface(&mut self, view: SurfaceView) -> Result<()> {
        // Sections are re-rendered every frame from manager state
        info!(sections = view.providers.len() + 1, "Settings panel ready");
        self.ready = true;
        Ok(())
    }

    fn replace_stylesheet(&mut self, stylesheet: &str) {
        self.stylesheet = stylesheet.to_string();
    }

    fn show_advisory(&mut self, message: &str) {
        self.advisory = Some(message.to_string());
    }
}

struct SettingsApp<S> {
    manager: SettingsManager<S, PanelHost>,
    events_tx: UnboundedSender<SettingsEvent>,
    events_rx: UnboundedReceiver<SettingsEvent>,
}

impl<S: PersistenceStore> SettingsApp<S> {
    fn new(_cc: &CreationContext<'_>, manager: SettingsManager<S, PanelHost>) -> Self {
        info!("Initializing egui settings panel");
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            manager,
            events_tx,
            events_rx,
        }
    }

    /// Apply queued edits; true if any were processed
    fn drain_events(&mut self) -> bool {
        let mut processed = false;
        while let Ok(event) = self.events_rx.try_recv() {
            processed = true;
            if let Err(err) = self.manager.handle_event(event) {
                warn!(error = %err, "Rejected settings edit");
            }
        }
        processed
    }
}

impl<S: PersistenceStore> eframe::App for SettingsApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        let view = self.manager.surface_view();
        let host = self.manager.host();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(PADDING);

                if !host.ready {
                    ui.colored_label(NOTICE_COLOR, "Settings surface unavailable");
                }
                if let Some(advisory) = &host.advisory {
                    ui.colored_label(NOTICE_COLOR, format!("\u{26A0} {advisory}"));
                    ui.add_space(ITEM_SPACING);
                }

                library_settings::ui(ui, &view.library, &self.events_tx);
                ui.add_space(SECTION_SPACING);

                for provider in &view.providers {
                    provider_settings::ui(ui, provider, &self.events_tx);
                    ui.add_space(SECTION_SPACING);
                }

                ui.separator();
                egui::CollapsingHeader::new("Composed Stylesheet").show(ui, |ui| {
                    ui.label(egui::RichText::new(host.stylesheet.as_str()).monospace());
                });
            });
        });

        if self.drain_events() {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.drain_events();
        info!("Settings panel exiting");
    }
}

/// Restore settings from `store` and open the settings window
pub fn run_gui<S: PersistenceStore + 'static>(store: S) -> Result<()> {
    let mut manager = SettingsManager::new(store, PanelHost::default(), builtin_providers());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("Failed to build async runtime")?;
    runtime.block_on(manager.attach_surface());

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("TranslateLib Settings"),
        ..Default::default()
    };

    eframe::run_native(
        "TranslateLib Settings",
        options,
        Box::new(|cc| Ok(Box::new(SettingsApp::new(cc, manager)))),
    )
    .map_err(|err| anyhow!("Failed to launch settings panel: {err}"))
}
