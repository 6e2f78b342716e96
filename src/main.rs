#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use translatelib_settings::constants::ui::RELOAD_NOTICE;
use translatelib_settings::gui::run_gui;
use translatelib_settings::{
    EditOutcome, HeadlessHost, JsonFileStore, MemoryStore, PersistenceStore, SettingsEvent, SettingsManager,
    builtin_providers,
};

#[derive(Debug, Parser)]
#[command(name = "translatelib-settings", about = "Manage TranslateLib provider settings and styles")]
struct Cli {
    /// Preference file (defaults to the platform config dir)
    #[arg(long, global = true, conflicts_with = "ephemeral")]
    store: Option<PathBuf>,

    /// Keep preferences in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// trace, debug, info, warn or error (overrides LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the composed stylesheet
    Stylesheet,
    /// Print restored preferences as JSON
    Show,
    /// Open the settings window
    Gui,
    SetTheme { provider: String, theme: String },
    SetColor { provider: String, color: String },
    SetCustomCss { provider: String, text: String },
    Enable {
        provider: String,
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
    AutoSwitch {
        provider: String,
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
    LibAutoSwitch {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
}

impl Command {
    /// The settings edit this command performs, if any
    fn edit(&self) -> Option<SettingsEvent> {
        let event = match self {
            Command::Stylesheet | Command::Show | Command::Gui => return None,
            Command::SetTheme { provider, theme } => SettingsEvent::ThemeSelected {
                provider: provider.clone(),
                theme: theme.clone(),
            },
            Command::SetColor { provider, color } => SettingsEvent::AccentColorChanged {
                provider: provider.clone(),
                color: color.clone(),
            },
            Command::SetCustomCss { provider, text } => SettingsEvent::CustomStylesheetEdited {
                provider: provider.clone(),
                text: text.clone(),
            },
            Command::Enable { provider, enabled } => SettingsEvent::ProviderEnabled {
                provider: provider.clone(),
                enabled: *enabled,
            },
            Command::AutoSwitch { provider, enabled } => SettingsEvent::ProviderAutoSwitch {
                provider: provider.clone(),
                enabled: *enabled,
            },
            Command::LibAutoSwitch { enabled } => SettingsEvent::LibraryAutoSwitch(*enabled),
        };
        Some(event)
    }
}

fn log_level(cli_level: Option<&str>) -> TraceLevel {
    let level = cli_level
        .map(str::to_string)
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .unwrap_or_else(|| "info".to_string());
    match level.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn run<S: PersistenceStore + 'static>(command: Command, store: S) -> Result<()> {
    if matches!(command, Command::Gui) {
        return run_gui(store);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("Failed to build async runtime")?;
    let mut manager = SettingsManager::new(store, HeadlessHost::default(), builtin_providers());
    runtime.block_on(manager.attach_surface());

    match command.edit() {
        Some(event) => {
            let outcome = manager.handle_event(event)?;
            info!(?outcome, "Applied settings edit");
            if let EditOutcome::ReloadRequired { .. } = outcome {
                println!("{RELOAD_NOTICE}");
            }
        }
        None if matches!(command, Command::Show) => {
            let providers: Vec<_> = manager.registry().iter().map(|entry| &entry.config).collect();
            let snapshot = serde_json::json!({
                "library": manager.library(),
                "providers": providers,
            });
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        None => print!("{}", manager.stylesheet()),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.log_level.as_deref()))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if cli.ephemeral {
        info!("Using in-memory preference store");
        run(cli.command, MemoryStore::new())
    } else {
        let path = cli.store.unwrap_or_else(JsonFileStore::default_path);
        run(cli.command, JsonFileStore::open(path))
    }
}
