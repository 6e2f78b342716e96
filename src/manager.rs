//! Settings manager: restore, compose, publish, then apply user edits
//!
//! Lifecycle: `Uninitialized -> Restoring -> Composed -> Interactive`. The
//! manager owns the provider registry and library config for the whole
//! session; every edit is written to memory first, then persisted, then either
//! restyles the page or raises the one-shot reload advisory.

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info, warn};

use crate::config::{LibraryConfig, ProviderConfig, ProviderDescriptor, ProviderRegistry};
use crate::constants::{keys, ui};
use crate::error::{SettingsError, SettingsResult};
use crate::persistence::PersistenceStore;
use crate::style::compose_all;
use crate::surface::{SettingsEvent, SettingsHost, SurfaceView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    Uninitialized,
    Restoring,
    Composed,
    Interactive,
}

/// What an accepted edit caused beyond being stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Stylesheet recomposed and republished
    Restyled,
    /// Takes effect after reload; `first_notice` is true when this edit raised the advisory
    ReloadRequired { first_notice: bool },
    /// Stored only (custom stylesheet text while another theme is selected)
    Persisted,
}

enum Effect {
    Restyle,
    Reload,
    None,
}

pub struct SettingsManager<S, H> {
    store: S,
    host: H,
    library: LibraryConfig,
    registry: ProviderRegistry,
    stylesheet: String,
    reload_notice_shown: bool,
    state: ManagerState,
}

impl<S: PersistenceStore, H: SettingsHost> SettingsManager<S, H> {
    /// Restore every preference from `store` and publish the initial stylesheet
    pub fn new(store: S, host: H, descriptors: impl IntoIterator<Item = ProviderDescriptor>) -> Self {
        let mut state = ManagerState::Uninitialized;
        debug!(?state, "Creating settings manager");

        state = ManagerState::Restoring;
        debug!(?state, "Restoring settings");
        let library = LibraryConfig::restore(&store);
        let registry = ProviderRegistry::restore(descriptors, &store);

        let mut manager = Self {
            store,
            host,
            library,
            registry,
            stylesheet: String::new(),
            reload_notice_shown: false,
            state,
        };
        manager.publish_stylesheet();
        manager.state = ManagerState::Composed;
        info!(providers = manager.registry.len(), "Settings initialized");
        manager
    }

    /// Build the settings surface and start accepting edits.
    ///
    /// A failing surface is logged and otherwise ignored: the stylesheet is
    /// already published and the manager still becomes interactive.
    pub async fn attach_surface(&mut self) {
        let view = self.surface_view();
        if let Err(e) = self.host.build_surface(view).await {
            let err = SettingsError::SurfaceInitialization(e);
            error!(error = ?err, "Settings surface unavailable, continuing without it");
        }
        self.state = ManagerState::Interactive;
        debug!(state = ?self.state, "Settings manager interactive");
    }

    /// Process edits until every sender is dropped, one at a time
    pub async fn run(&mut self, mut events: UnboundedReceiver<SettingsEvent>) {
        while let Some(event) = events.recv().await {
            if let Err(err) = self.handle_event(event) {
                warn!(error = %err, "Rejected settings edit");
            }
        }
        debug!("Settings event channel closed");
    }

    /// Apply one edit: update memory, persist, then restyle or raise the reload advisory
    pub fn handle_event(&mut self, event: SettingsEvent) -> SettingsResult<EditOutcome> {
        debug!(?event, "Handling settings edit");
        let effect = match event {
            SettingsEvent::LibraryAutoSwitch(enabled) => {
                self.library.auto_switch_on_load = enabled;
                self.store.set(keys::LIB_AUTO_SWITCH, enabled);
                info!(enabled, "Set library auto switch");
                Effect::Reload
            }
            SettingsEvent::ProviderEnabled { provider, enabled } => {
                let entry = self.registry.get_mut(&provider)?;
                entry.config.enabled = enabled;
                self.store.set(&entry.descriptor.key(keys::ENABLED), enabled);
                info!(provider = %provider, enabled, "Set provider enabled");
                Effect::Reload
            }
            SettingsEvent::ProviderAutoSwitch { provider, enabled } => {
                let entry = self.registry.get_mut(&provider)?;
                entry.config.auto_switch_on = enabled;
                self.store.set(&entry.descriptor.key(keys::AUTO_SWITCH_ON), enabled);
                info!(provider = %provider, enabled, "Set provider auto switch");
                Effect::Reload
            }
            SettingsEvent::ThemeSelected { provider, theme } => {
                let entry = self.registry.get_mut(&provider)?;
                entry.descriptor.theme(&theme)?;
                self.store.set(&entry.descriptor.key(keys::SELECTED_THEME), &theme);
                info!(provider = %provider, theme = %theme, "Selected theme");
                entry.config.selected_theme = theme;
                Effect::Restyle
            }
            SettingsEvent::AccentColorChanged { provider, color } => {
                let entry = self.registry.get_mut(&provider)?;
                self.store.set(&entry.descriptor.key(keys::BORDER_COLOR), &color);
                info!(provider = %provider, color = %color, "Set accent color");
                entry.config.accent_color = color;
                Effect::Restyle
            }
            SettingsEvent::CustomStylesheetEdited { provider, text } => {
                let entry = self.registry.get_mut(&provider)?;
                self.store.set(&entry.descriptor.key(keys::CUSTOM_STYLESHEET), &text);
                entry.config.custom_stylesheet = text;
                if entry.config.uses_custom_stylesheet(&entry.descriptor) {
                    Effect::Restyle
                } else {
                    debug!(provider = %provider, "Custom stylesheet stored, inactive until Custom theme is selected");
                    Effect::None
                }
            }
        };

        Ok(match effect {
            Effect::Restyle => {
                self.publish_stylesheet();
                EditOutcome::Restyled
            }
            Effect::Reload => EditOutcome::ReloadRequired { first_notice: self.notify_reload() },
            Effect::None => EditOutcome::Persisted,
        })
    }

    /// Recompose from current state and fully replace the published stylesheet
    fn publish_stylesheet(&mut self) {
        self.stylesheet = compose_all(&self.registry);
        self.host.replace_stylesheet(&self.stylesheet);
    }

    /// Show the reload advisory once per session; true if shown by this call
    fn notify_reload(&mut self) -> bool {
        if self.reload_notice_shown {
            return false;
        }
        self.host.show_advisory(ui::RELOAD_NOTICE);
        self.reload_notice_shown = true;
        true
    }

    pub fn surface_view(&self) -> SurfaceView {
        SurfaceView::build(&self.library, &self.registry)
    }

    pub fn state(&self) -> ManagerState {
        self.state
    }

    /// Last published stylesheet
    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    pub fn library(&self) -> &LibraryConfig {
        &self.library
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn provider(&self, id: &str) -> SettingsResult<&ProviderConfig> {
        self.registry.get(id).map(|entry| &entry.config)
    }

    pub fn reload_notice_shown(&self) -> bool {
        self.reload_notice_shown
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::descriptor::{GOOGLE, REVERSO};
    use crate::persistence::MemoryStore;
    use crate::style::{compose_provider, structural_rules};
    use crate::surface::HeadlessHost;
    use anyhow::anyhow;
    use serde_json::Value;

    type TestManager = SettingsManager<MemoryStore, HeadlessHost>;

    fn manager_with(store: MemoryStore) -> TestManager {
        SettingsManager::new(store, HeadlessHost::default(), [GOOGLE, REVERSO])
    }

    fn fragment(manager: &TestManager, id: &str) -> String {
        let entry = manager.registry().get(id).unwrap();
        compose_provider(&entry.config, &entry.descriptor)
    }

    fn theme(provider: &str, theme: &str) -> SettingsEvent {
        SettingsEvent::ThemeSelected { provider: provider.to_string(), theme: theme.to_string() }
    }

    fn enable(provider: &str, enabled: bool) -> SettingsEvent {
        SettingsEvent::ProviderEnabled { provider: provider.to_string(), enabled }
    }

    #[test]
    fn test_empty_store_end_to_end() {
        let manager = manager_with(MemoryStore::new());

        assert_eq!(manager.state(), ManagerState::Composed);
        for id in ["google", "reverso"] {
            let config = manager.provider(id).unwrap();
            assert_eq!(config.selected_theme, "Default");
            assert!(!config.enabled);
        }

        let expected = format!(
            "{}{}{}{}",
            ".gt { color:white; font-size: 2.3rem; margin-bottom:42px; font-family: Roboto }",
            structural_rules("gt", "lightblue"),
            ".rv { color:white; font-size: 2.3rem; margin-bottom:42px; font-family: Roboto }",
            structural_rules("rv", "lightcoral"),
        );
        assert_eq!(manager.stylesheet(), expected);
        assert_eq!(manager.host().stylesheet, expected);
        assert_eq!(manager.host().publish_count, 1);
    }

    #[test]
    fn test_accent_color_changes_only_that_provider() {
        let mut manager = manager_with(MemoryStore::new());
        let google_before = fragment(&manager, "google");
        let reverso_before = fragment(&manager, "reverso");

        let outcome = manager
            .handle_event(SettingsEvent::AccentColorChanged {
                provider: "google".to_string(),
                color: "#123456".to_string(),
            })
            .unwrap();
        assert_eq!(outcome, EditOutcome::Restyled);

        let google_after = fragment(&manager, "google");
        assert_eq!(google_after, google_before.replace("lightblue", "#123456"));
        assert_eq!(google_after.matches("#123456").count(), 2);
        assert_eq!(fragment(&manager, "reverso"), reverso_before);
        assert_eq!(manager.stylesheet(), format!("{google_after}{reverso_before}"));
        assert_eq!(manager.store().load("gt-borderColor"), Some(Value::from("#123456")));
    }

    #[test]
    fn test_custom_theme_round_trip() {
        let mut manager = manager_with(MemoryStore::new());

        manager.handle_event(theme("google", "Custom")).unwrap();
        let outcome = manager
            .handle_event(SettingsEvent::CustomStylesheetEdited {
                provider: "google".to_string(),
                text: ".gt{color:red}".to_string(),
            })
            .unwrap();
        assert_eq!(outcome, EditOutcome::Restyled);
        assert_eq!(fragment(&manager, "google"), ".gt{color:red}");

        manager.handle_event(theme("google", "Default")).unwrap();
        assert_ne!(fragment(&manager, "google"), ".gt{color:red}");

        manager.handle_event(theme("google", "Custom")).unwrap();
        assert_eq!(fragment(&manager, "google"), ".gt{color:red}");

        // Restoring from the same keys reproduces the fragment
        let restored = manager_with(manager.store().clone());
        assert_eq!(fragment(&restored, "google"), ".gt{color:red}");
        assert_eq!(restored.stylesheet(), manager.stylesheet());
    }

    #[test]
    fn test_custom_text_while_inactive_is_only_persisted() {
        let mut manager = manager_with(MemoryStore::new());
        let before = manager.stylesheet().to_string();

        let outcome = manager
            .handle_event(SettingsEvent::CustomStylesheetEdited {
                provider: "reverso".to_string(),
                text: ".rv{}".to_string(),
            })
            .unwrap();

        assert_eq!(outcome, EditOutcome::Persisted);
        assert_eq!(manager.stylesheet(), before);
        assert_eq!(manager.host().publish_count, 1);
        assert!(!manager.reload_notice_shown());
        assert_eq!(manager.store().load("rv-customStyleSheet"), Some(Value::from(".rv{}")));
    }

    #[test]
    fn test_enable_toggle_notice_shown_once() {
        let mut manager = manager_with(MemoryStore::new());
        let before = manager.stylesheet().to_string();

        assert_eq!(
            manager.handle_event(enable("google", true)).unwrap(),
            EditOutcome::ReloadRequired { first_notice: true }
        );
        assert_eq!(
            manager.handle_event(enable("google", false)).unwrap(),
            EditOutcome::ReloadRequired { first_notice: false }
        );
        assert_eq!(
            manager.handle_event(SettingsEvent::LibraryAutoSwitch(true)).unwrap(),
            EditOutcome::ReloadRequired { first_notice: false }
        );

        assert_eq!(manager.stylesheet(), before);
        assert_eq!(manager.host().advisories, vec!["Please refresh for settings to apply."]);
        assert_eq!(manager.store().load("gt-enabled"), Some(Value::Bool(false)));
        assert_eq!(manager.store().load("autoSwitchLNMTL"), Some(Value::Bool(true)));
        assert!(manager.library().auto_switch_on_load);
    }

    #[test]
    fn test_provider_auto_switch_requires_reload() {
        let mut manager = manager_with(MemoryStore::new());
        let outcome = manager
            .handle_event(SettingsEvent::ProviderAutoSwitch { provider: "reverso".to_string(), enabled: true })
            .unwrap();

        assert_eq!(outcome, EditOutcome::ReloadRequired { first_notice: true });
        assert!(manager.provider("reverso").unwrap().auto_switch_on);
        assert_eq!(manager.store().load("rv-autoSwitchOn"), Some(Value::Bool(true)));
    }

    #[test]
    fn test_unknown_theme_edit_rejected() {
        let mut manager = manager_with(MemoryStore::new());

        let result = manager.handle_event(theme("google", "Solarized"));
        assert!(matches!(result, Err(SettingsError::UnrecognizedTheme { .. })));
        assert_eq!(manager.provider("google").unwrap().selected_theme, "Default");
        assert!(manager.store().is_empty());
    }

    #[test]
    fn test_unknown_provider_edit_rejected() {
        let mut manager = manager_with(MemoryStore::new());
        let result = manager.handle_event(enable("deepl", true));

        assert!(matches!(result, Err(SettingsError::UnknownProvider { .. })));
        assert!(!manager.reload_notice_shown());
    }

    #[test]
    fn test_disabling_keeps_persisted_fields() {
        let store = MemoryStore::new()
            .with("gt-enabled", true)
            .with("gt-selectedTheme", "LNMTL_ZN")
            .with("gt-borderColor", "red");
        let mut manager = manager_with(store);

        manager.handle_event(enable("google", false)).unwrap();

        assert_eq!(manager.store().load("gt-selectedTheme"), Some(Value::from("LNMTL_ZN")));
        assert_eq!(manager.store().load("gt-borderColor"), Some(Value::from("red")));
        assert!(fragment(&manager, "google").starts_with(".gt {font-size: 150%;}"));
    }

    struct FailingStore;

    impl PersistenceStore for FailingStore {
        fn load(&self, _key: &str) -> Option<Value> {
            None
        }

        fn store(&mut self, _key: &str, _value: Value) -> anyhow::Result<()> {
            Err(anyhow!("disk full"))
        }
    }

    #[test]
    fn test_failed_write_keeps_in_memory_value() {
        let mut manager = SettingsManager::new(FailingStore, HeadlessHost::default(), [GOOGLE]);

        let outcome = manager
            .handle_event(SettingsEvent::AccentColorChanged { provider: "google".to_string(), color: "teal".to_string() })
            .unwrap();

        assert_eq!(outcome, EditOutcome::Restyled);
        assert_eq!(manager.provider("google").unwrap().accent_color, "teal");
        assert!(manager.stylesheet().contains("border-left: 3px solid teal;"));
    }

    #[derive(Default)]
    struct BrokenHost {
        stylesheet: String,
    }

    impl SettingsHost for BrokenHost {
        async fn build_surface(&mut self, _view: SurfaceView) -> anyhow::Result<()> {
            Err(anyhow!("modal body not found"))
        }

        fn replace_stylesheet(&mut self, stylesheet: &str) {
            self.stylesheet = stylesheet.to_string();
        }

        fn show_advisory(&mut self, _message: &str) {}
    }

    #[tokio::test]
    async fn test_surface_failure_still_interactive() {
        let mut manager = SettingsManager::new(MemoryStore::new(), BrokenHost::default(), [GOOGLE, REVERSO]);
        let composed = manager.stylesheet().to_string();

        manager.attach_surface().await;

        assert_eq!(manager.state(), ManagerState::Interactive);
        assert_eq!(manager.host().stylesheet, composed);
        assert_eq!(
            manager.handle_event(theme("reverso", "LNMTL_EN")).unwrap(),
            EditOutcome::Restyled
        );
    }

    #[tokio::test]
    async fn test_attach_surface_renders_current_state() {
        let mut manager = manager_with(MemoryStore::new().with("rv-selectedTheme", "Custom"));
        manager.attach_surface().await;

        let view = manager.host().surface.as_ref().unwrap();
        assert_eq!(view.providers.len(), 2);
        assert!(view.providers[1].custom_stylesheet_editable);
        assert_eq!(manager.state(), ManagerState::Interactive);
    }

    #[tokio::test]
    async fn test_run_processes_events_in_order() {
        let mut manager = manager_with(MemoryStore::new());
        manager.attach_surface().await;

        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        tx.send(theme("google", "Custom")).unwrap();
        tx.send(theme("google", "Bogus")).unwrap();
        tx.send(SettingsEvent::CustomStylesheetEdited {
            provider: "google".to_string(),
            text: ".gt{color:red}".to_string(),
        })
        .unwrap();
        tx.send(enable("reverso", true)).unwrap();
        drop(tx);

        manager.run(rx).await;

        assert_eq!(manager.provider("google").unwrap().selected_theme, "Custom");
        assert!(manager.stylesheet().starts_with(".gt{color:red}.rv "));
        assert!(manager.provider("reverso").unwrap().enabled);
        assert_eq!(manager.host().advisories.len(), 1);
    }
}
