pub mod library_settings;
pub mod provider_settings;
