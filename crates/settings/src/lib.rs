//! Auto-add settings: storage, typed configuration, admin schema.

pub mod config;
pub mod error;
pub mod keys;
pub mod schema;
pub mod service;
pub mod store;

pub use config::Configuration;
pub use error::SettingsError;
pub use schema::{AllowedValue, SettingDescriptor, SettingKind, SettingsSection, settings_section};
pub use service::SettingsService;
pub use store::{InMemorySettingsStore, SettingsStore};
