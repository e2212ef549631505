use serde::{Deserialize, Serialize};

use crate::chrome::{ChromeState, DockSide};
use crate::config::ChromeMetrics;

use super::Rect;

/// Which logical canvas an area is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanvasSelector {
    #[default]
    Primary,
    Secondary,
    Full,
}

impl CanvasSelector {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "primary" => Some(Self::Primary),
            "secondary" => Some(Self::Secondary),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

/// Drawing rectangle left over once every occluding surface is subtracted.
///
/// Subtraction order is fixed: top bar, rails, chat overlay, bottom panel,
/// split. The result is inset by `metrics.margin` and never smaller than
/// `metrics.min_width` x `metrics.min_height`.
pub fn resolve_area(chrome: &ChromeState, selector: CanvasSelector, metrics: &ChromeMetrics) -> Rect {
    let top = chrome.top_bar.occluded_height();
    let mut x = 0.0;
    let mut y = top;
    let mut width = chrome.screen.width.max(0.0);
    let mut height = (chrome.screen.height - top).max(0.0);

    let left_rail = chrome.left_rail.occluded_width();
    x += left_rail;
    width -= left_rail;
    width -= chrome.right_rail.occluded_width();

    let chat = chrome.chat.occluded_width();
    if chat > 0.0 {
        if chrome.chat.side == DockSide::Left {
            x += chat;
        }
        width -= chat;
    }

    height -= chrome.bottom_panel.occluded_height();
    width = width.max(0.0);
    height = height.max(0.0);

    if chrome.dual_canvas {
        let primary_width = width * chrome.split_fraction();
        match selector {
            CanvasSelector::Primary => width = primary_width,
            CanvasSelector::Secondary => {
                x += primary_width;
                width -= primary_width;
            }
            CanvasSelector::Full => {}
        }
    }

    let margin = metrics.margin.max(0.0);
    Rect::new(
        x + margin,
        y + margin,
        (width - margin * 2.0).max(metrics.min_width),
        (height - margin * 2.0).max(metrics.min_height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> ChromeMetrics {
        ChromeMetrics::default()
    }

    #[test]
    fn bare_screen_is_margin_inset() {
        let chrome = ChromeState::bare(1600.0, 900.0);
        let area = resolve_area(&chrome, CanvasSelector::Full, &metrics());
        assert_eq!(area, Rect::new(20.0, 20.0, 1560.0, 860.0));
    }

    #[test]
    fn default_chrome_subtracts_top_bar_and_left_rail() {
        let chrome = ChromeState::default();
        let area = resolve_area(&chrome, CanvasSelector::Primary, &metrics());
        assert_eq!(area, Rect::new(300.0, 84.0, 1600.0, 976.0));
    }

    #[test]
    fn left_docked_chat_shifts_origin() {
        let mut chrome = ChromeState::bare(1600.0, 900.0);
        chrome.chat.visible = true;
        chrome.chat.side = DockSide::Left;
        let area = resolve_area(&chrome, CanvasSelector::Full, &metrics());
        assert_eq!(area.x, 470.0);
        assert_eq!(area.width, 1110.0);

        chrome.chat.collapsed = true;
        let area = resolve_area(&chrome, CanvasSelector::Full, &metrics());
        assert_eq!(area.x, 68.0);
        assert_eq!(area.width, 1512.0);
    }

    #[test]
    fn right_docked_chat_keeps_origin() {
        let mut chrome = ChromeState::bare(1600.0, 900.0);
        chrome.chat.visible = true;
        let area = resolve_area(&chrome, CanvasSelector::Full, &metrics());
        assert_eq!(area.x, 20.0);
        assert_eq!(area.width, 1110.0);
    }

    #[test]
    fn bottom_panel_reduces_height() {
        let mut chrome = ChromeState::bare(1600.0, 900.0);
        chrome.bottom_panel.visible = true;
        let area = resolve_area(&chrome, CanvasSelector::Full, &metrics());
        assert_eq!(area.height, 560.0);
    }

    #[test]
    fn split_divides_remaining_width() {
        let mut chrome = ChromeState::bare(1640.0, 900.0);
        chrome.dual_canvas = true;
        chrome.split_ratio = 25.0;
        let primary = resolve_area(&chrome, CanvasSelector::Primary, &metrics());
        let secondary = resolve_area(&chrome, CanvasSelector::Secondary, &metrics());
        let full = resolve_area(&chrome, CanvasSelector::Full, &metrics());
        assert_eq!(primary, Rect::new(20.0, 20.0, 370.0, 860.0));
        assert_eq!(secondary, Rect::new(430.0, 20.0, 1190.0, 860.0));
        assert_eq!(full.width, 1600.0);
    }

    #[test]
    fn single_canvas_ignores_selector() {
        let chrome = ChromeState::default();
        let primary = resolve_area(&chrome, CanvasSelector::Primary, &metrics());
        let secondary = resolve_area(&chrome, CanvasSelector::Secondary, &metrics());
        assert_eq!(primary, secondary);
    }

    #[test]
    fn tiny_screens_clamp_to_minimum() {
        let mut chrome = ChromeState::default();
        chrome.screen.width = 300.0;
        chrome.screen.height = 100.0;
        chrome.chat.visible = true;
        let area = resolve_area(&chrome, CanvasSelector::Full, &metrics());
        assert_eq!(area.width, 200.0);
        assert_eq!(area.height, 150.0);
    }
}
