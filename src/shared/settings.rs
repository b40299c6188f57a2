use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

use super::error::{AppError, AppResult};

/// Field the key is stored under.
pub const API_KEY_FIELD: &str = "deepseek_api_key";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub api_keys: ApiKeys,
    #[serde(default)]
    pub preferences: UserPreferences,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deepseek_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    pub target_lang: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            target_lang: "zh".to_string(),
        }
    }
}

/// Key-value bridge for the single API key string.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_api_key(&self) -> AppResult<Option<String>>;
    async fn set_api_key(&self, key: &str) -> AppResult<()>;
    async fn remove_api_key(&self) -> AppResult<()>;
}

/// JSON settings file in the platform config directory.
///
/// Readers share the lock, writers take it exclusively, and every write lands
/// through a rename so the file on disk is always complete.
pub struct FileSettingsStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn default_location() -> AppResult<Self> {
        let path = ProjectDirs::from("com", "antigravity", "select-translate")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or_else(|| AppError::Settings("Failed to determine config directory".to_string()))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current settings, or the defaults when no file exists yet.
    pub async fn load(&self) -> AppResult<AppSettings> {
        let _guard = self.lock.read().await;
        self.read_from_disk().await
    }

    async fn read_from_disk(&self) -> AppResult<AppSettings> {
        if !fs::try_exists(&self.path).await? {
            debug!(path = %self.path.display(), "no settings file, using defaults");
            return Ok(AppSettings::default());
        }

        let content = fs::read_to_string(&self.path).await?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::Settings(format!("Failed to parse settings: {}", e)))
    }

    async fn save_to_disk(&self, settings: &AppSettings) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), "settings written");
        Ok(())
    }

    async fn update<F>(&self, apply: F) -> AppResult<()>
    where
        F: FnOnce(&mut AppSettings) + Send,
    {
        let _guard = self.lock.write().await;
        let mut settings = self.read_from_disk().await?;
        apply(&mut settings);
        self.save_to_disk(&settings).await
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn get_api_key(&self) -> AppResult<Option<String>> {
        Ok(self.load().await?.api_keys.deepseek_api_key)
    }

    async fn set_api_key(&self, key: &str) -> AppResult<()> {
        let key = key.to_string();
        self.update(move |settings| {
            settings.api_keys.deepseek_api_key = Some(key);
            settings.api_keys.updated_at = Some(Utc::now());
        })
        .await
    }

    async fn remove_api_key(&self) -> AppResult<()> {
        self.update(|settings| {
            settings.api_keys.deepseek_api_key = None;
            settings.api_keys.updated_at = Some(Utc::now());
        })
        .await
    }
}

/// Process-local store, used when no file backing is wanted.
#[derive(Default)]
pub struct MemorySettingsStore {
    api_key: Mutex<Option<String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Mutex::new(Some(key.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        match self.api_key.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get_api_key(&self) -> AppResult<Option<String>> {
        Ok(self.slot().clone())
    }

    async fn set_api_key(&self, key: &str) -> AppResult<()> {
        *self.slot() = Some(key.to_string());
        Ok(())
    }

    async fn remove_api_key(&self) -> AppResult<()> {
        *self.slot() = None;
        Ok(())
    }
}
