//! Tooltip and translator configuration
//!
//! Centralised constants for placement, timing and the chat-completion
//! endpoint. The two tooltip presets correspond to the plain selection
//! tooltip and the translation tooltip.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tooltip layout and timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    /// Characters of the selection shown before the `...` suffix.
    pub max_text_length: usize,
    #[serde(with = "millis")]
    pub hide_delay: Duration,
    #[serde(with = "millis")]
    pub animation_delay: Duration,
    /// Delay between pointer release and reading the selection.
    #[serde(with = "millis")]
    pub selection_settle_delay: Duration,
    /// Gap between the cursor and the tooltip's bottom edge.
    pub tooltip_offset: f64,
    /// Height estimate used before the element is laid out.
    pub estimated_height: f64,
    /// Offset below the cursor when there is no room above.
    pub below_offset: f64,
    pub viewport_padding: f64,
    pub max_width: f64,
    pub char_width: f64,
    pub base_width: f64,
    /// Whether the tooltip carries a translation line at all.
    pub translation_enabled: bool,
}

impl TooltipConfig {
    /// Selection tooltip without translation.
    pub fn simple() -> Self {
        Self {
            max_text_length: 100,
            hide_delay: Duration::from_secs(4),
            animation_delay: Duration::from_millis(200),
            selection_settle_delay: Duration::from_millis(10),
            tooltip_offset: 15.0,
            estimated_height: 80.0,
            below_offset: 25.0,
            viewport_padding: 10.0,
            max_width: 300.0,
            char_width: 8.0,
            base_width: 40.0,
            translation_enabled: false,
        }
    }

    /// Selection tooltip with a translation line; stays up longer so the
    /// result can be read.
    pub fn translation() -> Self {
        Self {
            hide_delay: Duration::from_secs(40),
            translation_enabled: true,
            ..Self::simple()
        }
    }
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self::translation()
    }
}

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Chat-completion translation endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub base_url: String,
    pub model: String,
    #[serde(with = "millis")]
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Longest accepted input, in characters, after trimming.
    pub max_input_chars: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(15),
            temperature: 0.3,
            max_tokens: 1000,
            max_input_chars: 150,
        }
    }
}

impl TranslatorConfig {
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ_only_in_translation() {
        let simple = TooltipConfig::simple();
        let translation = TooltipConfig::translation();
        assert_eq!(simple.hide_delay, Duration::from_secs(4));
        assert_eq!(translation.hide_delay, Duration::from_secs(40));
        assert!(!simple.translation_enabled);
        assert!(translation.translation_enabled);
        assert_eq!(simple.max_text_length, translation.max_text_length);
        assert_eq!(simple.animation_delay, Duration::from_millis(200));
    }

    #[test]
    fn test_completions_url() {
        let config = TranslatorConfig {
            base_url: "http://localhost:1234/".to_string(),
            ..TranslatorConfig::default()
        };
        assert_eq!(config.completions_url(), "http://localhost:1234/chat/completions");
        assert_eq!(
            TranslatorConfig::default().completions_url(),
            "https://api.deepseek.com/chat/completions"
        );
    }

    #[test]
    fn test_durations_serialize_as_millis() {
        let json = serde_json::to_value(TooltipConfig::simple()).unwrap();
        assert_eq!(json["hide_delay"], 4000);
        assert_eq!(json["selection_settle_delay"], 10);

        let parsed: TooltipConfig = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, TooltipConfig::simple());
    }
}
