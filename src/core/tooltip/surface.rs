use std::fmt;

use tracing::info;

use crate::shared::types::{TooltipPlacement, ViewportSize};

/// Handle for one tooltip element; a fresh id is issued per `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TooltipId(pub(crate) u64);

impl fmt::Display for TooltipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tooltip-{}", self.0)
    }
}

/// Host-side drawing surface for the floating element.
///
/// The presenter guarantees at most one attached id at a time and never
/// touches an id after `remove`.
pub trait TooltipSurface: Send {
    fn viewport(&self) -> ViewportSize;
    fn attach(&mut self, id: TooltipId, markup: &str, placement: TooltipPlacement);
    /// Toggles the `show` class that drives the fade animation.
    fn set_visible(&mut self, id: TooltipId, visible: bool);
    fn set_content(&mut self, id: TooltipId, markup: &str);
    fn remove(&mut self, id: TooltipId);
}

/// Surface that renders into the log, for headless runs.
pub struct LogSurface {
    viewport: ViewportSize,
}

impl LogSurface {
    pub fn new(viewport: ViewportSize) -> Self {
        Self { viewport }
    }
}

impl TooltipSurface for LogSurface {
    fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    fn attach(&mut self, id: TooltipId, markup: &str, placement: TooltipPlacement) {
        info!(%id, left = placement.left, top = placement.top, width = placement.width, "attach\n{}", markup);
    }

    fn set_visible(&mut self, id: TooltipId, visible: bool) {
        info!(%id, visible, "visibility");
    }

    fn set_content(&mut self, id: TooltipId, markup: &str) {
        info!(%id, "content\n{}", markup);
    }

    fn remove(&mut self, id: TooltipId) {
        info!(%id, "remove");
    }
}
