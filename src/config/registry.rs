//! Ordered provider registry
//!
//! Registration order is display order and stylesheet concatenation order.
//! Membership is fixed once built.

use indexmap::IndexMap;

use super::descriptor::ProviderDescriptor;
use super::provider::ProviderConfig;
use crate::error::{SettingsError, SettingsResult};
use crate::persistence::PersistenceStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEntry {
    pub descriptor: ProviderDescriptor,
    pub config: ProviderConfig,
}

#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    entries: IndexMap<&'static str, ProviderEntry>,
}

impl ProviderRegistry {
    /// Restore a config for each descriptor, keeping the given order
    pub fn restore<S: PersistenceStore>(descriptors: impl IntoIterator<Item = ProviderDescriptor>, store: &S) -> Self {
        let entries = descriptors
            .into_iter()
            .map(|descriptor| {
                let config = ProviderConfig::restore(&descriptor, store);
                (descriptor.id, ProviderEntry { descriptor, config })
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, id: &str) -> SettingsResult<&ProviderEntry> {
        self.entries.get(id).ok_or_else(|| unknown(id))
    }

    pub fn get_mut(&mut self, id: &str) -> SettingsResult<&mut ProviderEntry> {
        self.entries.get_mut(id).ok_or_else(|| unknown(id))
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ProviderEntry> {
        self.entries.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn unknown(id: &str) -> SettingsError {
    SettingsError::UnknownProvider { provider: id.to_string() }
}
