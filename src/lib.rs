#![forbid(unsafe_code)]
//! Per-provider settings and stylesheet composition for the TranslateLib overlay

pub mod config;
pub mod constants;
pub mod error;
pub mod gui;
pub mod manager;
pub mod persistence;
pub mod style;
pub mod surface;

pub use config::{LibraryConfig, ProviderConfig, ProviderDescriptor, ProviderRegistry, ThemeStyle, builtin_providers};
pub use error::{SettingsError, SettingsResult};
pub use manager::{EditOutcome, ManagerState, SettingsManager};
pub use persistence::{JsonFileStore, MemoryStore, PersistenceStore};
pub use surface::{HeadlessHost, SettingsEvent, SettingsHost, SurfaceView};
