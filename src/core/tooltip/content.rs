//! Tooltip markup
//!
//! Every piece of user or server text goes through [`escape_html`] before it
//! is placed in the markup handed to the surface.

const ELLIPSIS: &str = "...";

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// First `max_chars` characters followed by `...`, or the text unchanged.
pub fn truncate_for_display(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Third line of the tooltip.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationLine {
    Loading,
    Disabled,
    Translated(String),
    Failed(String),
}

impl TranslationLine {
    fn class(&self) -> &'static str {
        match self {
            TranslationLine::Loading => "translation-loading",
            TranslationLine::Disabled => "translation-disabled",
            TranslationLine::Translated(_) => "translation-text",
            TranslationLine::Failed(_) => "translation-error",
        }
    }

    fn text(&self) -> String {
        match self {
            TranslationLine::Loading => "Translating with DeepSeek...".to_string(),
            TranslationLine::Disabled => "API key not set, translation disabled".to_string(),
            TranslationLine::Translated(text) => text.clone(),
            TranslationLine::Failed(reason) => format!("Translation failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub display_text: String,
    /// Length of the untruncated, trimmed selection.
    pub char_count: usize,
    pub translation: Option<TranslationLine>,
}

impl TooltipContent {
    pub fn new(clean_text: &str, max_chars: usize) -> Self {
        Self {
            display_text: truncate_for_display(clean_text, max_chars),
            char_count: clean_text.chars().count(),
            translation: None,
        }
    }

    pub fn with_translation(mut self, line: TranslationLine) -> Self {
        self.translation = Some(line);
        self
    }

    fn lines(&self) -> Vec<(&'static str, String)> {
        let mut lines = vec![
            ("selected-text", self.display_text.clone()),
            ("text-info", format!("{} characters", self.char_count)),
        ];
        if let Some(line) = &self.translation {
            lines.push((line.class(), line.text()));
        }
        lines
    }

    /// Visible text length, used for the width estimate.
    pub fn text_len(&self) -> usize {
        self.lines().iter().map(|(_, text)| text.chars().count()).sum()
    }

    pub fn render(&self) -> String {
        self.lines()
            .iter()
            .map(|(class, text)| format!(r#"<div class="{}">{}</div>"#, class, escape_html(text)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
