use crate::config::TooltipConfig;
use crate::shared::types::{CursorPosition, TooltipPlacement, ViewportSize};

/// Calculate the tooltip position for the given cursor and viewport.
///
/// Centred horizontally on the cursor and kept `viewport_padding` away from
/// both edges; above the cursor unless that would cross the top padding, in
/// which case it drops below.
pub fn compute_placement(
    cursor: CursorPosition,
    viewport: ViewportSize,
    text_len: usize,
    config: &TooltipConfig,
) -> TooltipPlacement {
    let padding = config.viewport_padding;
    let width = config
        .max_width
        .min(text_len as f64 * config.char_width + config.base_width);

    let mut left = cursor.x - width / 2.0;

    // Check right boundary
    let max_left = viewport.width - width - padding;
    if left > max_left {
        left = max_left;
    }

    // Check left boundary (wins on viewports narrower than the tooltip)
    if left < padding {
        left = padding;
    }

    let mut top = cursor.y - config.estimated_height - config.tooltip_offset;
    if top < padding {
        top = cursor.y + config.below_offset;
    }

    TooltipPlacement { left, top, width }
}
