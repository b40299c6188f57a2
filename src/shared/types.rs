use serde::{Deserialize, Serialize};

/// Pointer position in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CursorPosition {
    pub x: f64,
    pub y: f64,
}

impl CursorPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the host viewport (`innerWidth` / `innerHeight`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

/// Top-left corner of the tooltip, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPlacement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
}

/// Selected text and the cursor position at pointer release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub text: String,
    pub cursor: CursorPosition,
}

impl SelectionSnapshot {
    /// Returns `None` when the selection is blank.
    pub fn capture(raw: &str, cursor: CursorPosition) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            cursor,
        })
    }
}
