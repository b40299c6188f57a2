use serde::{Serialize, Deserialize};

/// Cross-component notifications between the settings side and the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AppEvent {
    /// The stored API key was saved, replaced or removed.
    #[serde(rename = "API_KEY_UPDATED")]
    ApiKeyUpdated,
}
