//! Settings command module
//!
//! API key management for the settings page: status, save, view, delete.

use serde::Serialize;
use tracing::{error, info};

use crate::shared::emit::{emit_event, EventBus};
use crate::shared::error::{AppError, AppResult};
use crate::shared::events::AppEvent;
use crate::shared::settings::SettingsStore;

/// Shortest key accepted by `save_api_key`.
pub const MIN_API_KEY_LENGTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeyStatus {
    Active,
    Inactive,
    CheckFailed,
}

impl ApiKeyStatus {
    pub fn status_text(&self) -> &'static str {
        match self {
            ApiKeyStatus::Active => "DeepSeek translation enabled",
            ApiKeyStatus::Inactive => "Please set a DeepSeek API key",
            ApiKeyStatus::CheckFailed => "Configuration check failed",
        }
    }

    /// CSS class of the status banner.
    pub fn css_class(&self) -> &'static str {
        match self {
            ApiKeyStatus::Active => "status active",
            ApiKeyStatus::Inactive | ApiKeyStatus::CheckFailed => "status inactive",
        }
    }
}

/// What the settings page renders for a given status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsView {
    pub status: ApiKeyStatus,
    pub status_text: &'static str,
    pub show_set_button: bool,
    pub show_view_button: bool,
}

impl From<ApiKeyStatus> for SettingsView {
    fn from(status: ApiKeyStatus) -> Self {
        let (show_set_button, show_view_button) = match status {
            ApiKeyStatus::Active => (false, true),
            ApiKeyStatus::Inactive => (true, false),
            // Same buttons as when no key is stored.
            ApiKeyStatus::CheckFailed => (true, false),
        };
        Self {
            status,
            status_text: status.status_text(),
            show_set_button,
            show_view_button,
        }
    }
}

/// Stored key for the "view key" dialog. `full` backs the copy button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskedKey {
    pub masked: String,
    pub full: String,
}

/// Check whether a usable key is stored.
pub async fn api_key_status(store: &dyn SettingsStore) -> ApiKeyStatus {
    match store.get_api_key().await {
        Ok(Some(key)) if !key.trim().is_empty() => ApiKeyStatus::Active,
        Ok(_) => ApiKeyStatus::Inactive,
        Err(e) => {
            error!(error = %e, "failed to check API key status");
            ApiKeyStatus::CheckFailed
        }
    }
}

pub async fn settings_view(store: &dyn SettingsStore) -> SettingsView {
    api_key_status(store).await.into()
}

/// Validate, store and announce a new key.
pub async fn save_api_key(store: &dyn SettingsStore, bus: &EventBus, key: &str) -> AppResult<()> {
    let key = key.trim();
    if key.is_empty() {
        return Err(AppError::Validation("Please enter an API key".to_string()));
    }
    if key.chars().count() < MIN_API_KEY_LENGTH {
        return Err(AppError::Validation("API key length is incorrect".to_string()));
    }

    store.set_api_key(key).await?;
    info!("API key saved");
    emit_event(bus, AppEvent::ApiKeyUpdated);
    Ok(())
}

pub async fn delete_api_key(store: &dyn SettingsStore, bus: &EventBus) -> AppResult<()> {
    store.remove_api_key().await?;
    info!("API key deleted");
    emit_event(bus, AppEvent::ApiKeyUpdated);
    Ok(())
}

/// Masked form of the stored key, or `None` when nothing is stored.
pub async fn view_api_key(store: &dyn SettingsStore) -> AppResult<Option<MaskedKey>> {
    let key = store.get_api_key().await?;
    Ok(key.filter(|k| !k.is_empty()).map(|full| MaskedKey {
        masked: mask_api_key(&full),
        full,
    }))
}

/// First 8 characters, one `*` per character beyond 16, then the tail
/// starting at `max(8, len - 8)`. Keys of 16 characters or fewer come back
/// unmasked.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let len = chars.len();
    let head: String = chars.iter().take(8).collect();
    let stars = "*".repeat(len.saturating_sub(16));
    let tail_start = 8.max(len.saturating_sub(8));
    let tail: String = chars.iter().skip(tail_start).collect();
    format!("{}{}{}", head, stars, tail)
}
