//! Error taxonomy for the settings core
//!
//! None of these are fatal to the host: callers resolve them with a fallback
//! value or log them and keep going.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    /// No usable value stored under `key`; resolved silently with a default
    #[error("no stored preference for key '{key}'")]
    MissingPreference { key: String },

    /// Theme name that is not part of the provider's catalog
    #[error("provider '{provider}' has no theme named '{theme}'")]
    UnrecognizedTheme { provider: String, theme: String },

    /// Edit addressed to a provider that was never registered
    #[error("no provider registered with id '{provider}'")]
    UnknownProvider { provider: String },

    /// Building or attaching the settings surface failed
    #[error("failed to initialize settings surface")]
    SurfaceInitialization(#[source] anyhow::Error),

    /// Store rejected a write; the in-memory value is kept regardless
    #[error("failed to persist preference '{key}'")]
    Persistence {
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type SettingsResult<T> = std::result::Result<T, SettingsError>;
