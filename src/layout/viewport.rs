use crate::chrome::ChromeState;
use crate::config::ViewportConfig;
use crate::ir::Point;

use super::{Rect, Viewport};

/// Screen-space point the framed content should be centered on.
///
/// An expanded chat overlay pushes the center away from the side it docks
/// to, a visible bottom panel pushes it up.
pub fn biased_center(area: &Rect, chrome: &ChromeState, config: &ViewportConfig) -> Point {
    let mut center = area.center();
    if chrome.chat.is_expanded() {
        center.x -= chrome.chat.side.sign() * chrome.chat.width * config.chat_bias_ratio;
    }
    if chrome.bottom_panel.visible {
        center.y -= chrome.bottom_panel.height * config.bottom_bias_ratio;
    }
    center
}

/// Zoom that fits `target` into `area`, never above `zoom_cap`.
///
/// Degenerate axes impose no constraint; when both are degenerate the zoom is 1.
/// A configured `min_zoom` is applied last and may let a huge target spill
/// past the area.
pub fn fit_zoom(target: &Rect, area: &Rect, config: &ViewportConfig) -> f32 {
    let mut zoom = f32::INFINITY;
    if target.width > 0.0 {
        zoom = zoom.min(area.width / target.width);
    }
    if target.height > 0.0 {
        zoom = zoom.min(area.height / target.height);
    }
    if !zoom.is_finite() {
        zoom = 1.0;
    }
    let zoom = zoom.min(config.zoom_cap);
    match config.min_zoom {
        Some(floor) => zoom.max(floor),
        None => zoom,
    }
}

/// Camera end state framing `target` inside `area`.
pub fn fit_viewport(
    target: &Rect,
    area: &Rect,
    chrome: &ChromeState,
    config: &ViewportConfig,
) -> Viewport {
    let zoom = fit_zoom(target, area, config);
    let screen_center = biased_center(area, chrome, config);
    let target_center = target.center();
    Viewport {
        x: screen_center.x - target_center.x * zoom,
        y: screen_center.y - target_center.y * zoom,
        zoom,
    }
}
