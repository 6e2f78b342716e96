//! Configuration model for translation providers
//!
//! This module provides:
//! - **descriptor**: compiled-in provider facts and theme catalogs
//! - **provider**: persisted per-provider and library-wide preferences
//! - **registry**: the ordered set of providers owned by the settings manager

pub mod descriptor;
pub mod provider;
pub mod registry;

// Re-export commonly used types
pub use descriptor::{ProviderDescriptor, ThemeStyle, builtin_providers};
pub use provider::{LibraryConfig, ProviderConfig};
pub use registry::{ProviderEntry, ProviderRegistry};
