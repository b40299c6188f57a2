//! Target-language names and prompt text.

const LANGUAGES: &[(&str, &str)] = &[
    ("zh", "Chinese"),
    ("zh-cn", "Chinese"),
    ("en", "English"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("fr", "French"),
    ("de", "German"),
    ("es", "Spanish"),
    ("it", "Italian"),
    ("ru", "Russian"),
];

pub const SYSTEM_PROMPT: &str = "You are a professional translation assistant focused on accurate, \
natural translations. Reply with the translation only, without any explanation or commentary.";

/// Human-readable name for a language code; unknown codes pass through.
pub fn language_name(code: &str) -> String {
    let lower = code.to_lowercase();
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == lower)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.to_string())
}

pub fn build_prompt(text: &str, target_lang: &str) -> String {
    format!(
        "Translate the following text into {}. Return only the translation, without any explanation or other content: {}",
        language_name(target_lang),
        text
    )
}
