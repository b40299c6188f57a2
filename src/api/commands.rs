//! Command modules
//!
//! Entry points the settings UI calls. Each command works against a
//! [`SettingsStore`](crate::shared::settings::SettingsStore) and reports key
//! changes on the [`EventBus`](crate::shared::emit::EventBus).

pub mod settings;
