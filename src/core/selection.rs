//! Selection tracker
//!
//! Turns raw page events into "read the selection" or "hide" decisions.
//! Pure state, no timers: the session performs the settle delay.

use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::shared::types::CursorPosition;

/// Events forwarded from the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    PointerMove { x: f64, y: f64 },
    PointerUp,
    KeyDown { key: String },
    Click { inside_tooltip: bool },
    Scroll,
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackerIntent {
    /// Read the page selection once `after` has elapsed.
    ReadSelection {
        after: Duration,
        cursor: CursorPosition,
    },
    Hide,
}

/// Source of the page's current text selection.
pub trait SelectionSource: Send + Sync {
    fn current_selection(&self) -> String;
}

/// Selection source fed by the host, or by tests.
#[derive(Default)]
pub struct StaticSelection {
    text: Mutex<String>,
}

impl StaticSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, text: impl Into<String>) {
        let mut guard = match self.text.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = text.into();
    }
}

impl SelectionSource for StaticSelection {
    fn current_selection(&self) -> String {
        match self.text.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

pub struct SelectionTracker {
    last_cursor: CursorPosition,
    settle_delay: Duration,
}

impl SelectionTracker {
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            last_cursor: CursorPosition::default(),
            settle_delay,
        }
    }

    pub fn last_cursor(&self) -> CursorPosition {
        self.last_cursor
    }

    pub fn handle(&mut self, event: &PageEvent) -> Option<TrackerIntent> {
        match event {
            PageEvent::PointerMove { x, y } => {
                self.last_cursor = CursorPosition::new(*x, *y);
                None
            }
            PageEvent::PointerUp => Some(TrackerIntent::ReadSelection {
                after: self.settle_delay,
                cursor: self.last_cursor,
            }),
            PageEvent::KeyDown { key } if key == "Escape" => Some(TrackerIntent::Hide),
            PageEvent::KeyDown { .. } => None,
            PageEvent::Click { inside_tooltip: true } => None,
            PageEvent::Click { inside_tooltip: false } => Some(TrackerIntent::Hide),
            PageEvent::Scroll | PageEvent::Resize => Some(TrackerIntent::Hide),
        }
    }
}
