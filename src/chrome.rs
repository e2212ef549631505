//! Snapshot of every occluding surface around the canvas.
//!
//! The host pushes a fresh [`ChromeState`] (or a partial [`ChromeUpdate`])
//! whenever a rail, overlay or split changes. Layout functions receive it as
//! an explicit argument and never look it up on their own.

use serde::{Deserialize, Deserializer, Serialize};

use crate::ir::{Orientation, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DockSide {
    Left,
    #[default]
    Right,
}

impl DockSide {
    /// +1 for the right edge, -1 for the left edge.
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopBar {
    pub visible: bool,
    pub height: f32,
}

impl Default for TopBar {
    fn default() -> Self {
        Self {
            visible: true,
            height: 64.0,
        }
    }
}

impl TopBar {
    pub fn occluded_height(&self) -> f32 {
        if self.visible { self.height.max(0.0) } else { 0.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rail {
    pub visible: bool,
    pub expanded: bool,
    pub expanded_width: f32,
    pub collapsed_width: f32,
}

impl Rail {
    fn left() -> Self {
        Self {
            visible: true,
            expanded: true,
            expanded_width: 280.0,
            collapsed_width: 64.0,
        }
    }

    fn right() -> Self {
        Self {
            visible: false,
            expanded: true,
            expanded_width: 320.0,
            collapsed_width: 64.0,
        }
    }

    pub fn occluded_width(&self) -> f32 {
        if !self.visible {
            return 0.0;
        }
        let width = if self.expanded {
            self.expanded_width
        } else {
            self.collapsed_width
        };
        width.max(0.0)
    }
}

/// Partial rail as sent by the host, merged over the side's defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RailPatch {
    visible: Option<bool>,
    expanded: Option<bool>,
    expanded_width: Option<f32>,
    collapsed_width: Option<f32>,
}

impl RailPatch {
    fn merge_into(self, rail: &mut Rail) {
        if let Some(v) = self.visible {
            rail.visible = v;
        }
        if let Some(v) = self.expanded {
            rail.expanded = v;
        }
        if let Some(v) = self.expanded_width {
            rail.expanded_width = v;
        }
        if let Some(v) = self.collapsed_width {
            rail.collapsed_width = v;
        }
    }
}

fn left_rail<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rail, D::Error> {
    let mut rail = Rail::left();
    RailPatch::deserialize(deserializer)?.merge_into(&mut rail);
    Ok(rail)
}

fn right_rail<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rail, D::Error> {
    let mut rail = Rail::right();
    RailPatch::deserialize(deserializer)?.merge_into(&mut rail);
    Ok(rail)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatOverlay {
    pub visible: bool,
    pub collapsed: bool,
    pub width: f32,
    pub collapsed_width: f32,
    pub side: DockSide,
}

impl Default for ChatOverlay {
    fn default() -> Self {
        Self {
            visible: false,
            collapsed: false,
            width: 450.0,
            collapsed_width: 48.0,
            side: DockSide::Right,
        }
    }
}

impl ChatOverlay {
    pub fn occluded_width(&self) -> f32 {
        if !self.visible {
            return 0.0;
        }
        let width = if self.collapsed {
            self.collapsed_width
        } else {
            self.width
        };
        width.max(0.0)
    }

    pub fn is_expanded(&self) -> bool {
        self.visible && !self.collapsed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BottomPanel {
    pub visible: bool,
    pub height: f32,
}

impl Default for BottomPanel {
    fn default() -> Self {
        Self {
            visible: false,
            height: 300.0,
        }
    }
}

impl BottomPanel {
    pub fn occluded_height(&self) -> f32 {
        if self.visible { self.height.max(0.0) } else { 0.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChromeState {
    pub screen: Size,
    pub top_bar: TopBar,
    #[serde(deserialize_with = "left_rail")]
    pub left_rail: Rail,
    #[serde(deserialize_with = "right_rail")]
    pub right_rail: Rail,
    pub chat: ChatOverlay,
    pub bottom_panel: BottomPanel,
    pub dual_canvas: bool,
    /// Share of the split width given to the primary canvas, in percent.
    pub split_ratio: f32,
    pub orientation: Orientation,
}

impl Default for ChromeState {
    fn default() -> Self {
        Self {
            screen: Size::new(1920.0, 1080.0),
            top_bar: TopBar::default(),
            left_rail: Rail::left(),
            right_rail: Rail::right(),
            chat: ChatOverlay::default(),
            bottom_panel: BottomPanel::default(),
            dual_canvas: false,
            split_ratio: 50.0,
            orientation: Orientation::Vertical,
        }
    }
}

impl ChromeState {
    /// A screen with nothing drawn around the canvas.
    pub fn bare(width: f32, height: f32) -> Self {
        let mut state = Self {
            screen: Size::new(width, height),
            ..Self::default()
        };
        state.top_bar.visible = false;
        state.left_rail.visible = false;
        state.right_rail.visible = false;
        state
    }

    pub fn split_fraction(&self) -> f32 {
        self.split_ratio.clamp(10.0, 90.0) / 100.0
    }

    /// Merges every field present in `update` onto this snapshot.
    pub fn apply(&mut self, update: &ChromeUpdate) {
        if let Some(v) = update.screen_width {
            self.screen.width = v;
        }
        if let Some(v) = update.screen_height {
            self.screen.height = v;
        }
        if let Some(v) = update.top_bar_visible {
            self.top_bar.visible = v;
        }
        if let Some(v) = update.top_bar_height {
            self.top_bar.height = v;
        }
        if let Some(v) = update.left_rail_visible {
            self.left_rail.visible = v;
        }
        if let Some(v) = update.left_rail_expanded {
            self.left_rail.expanded = v;
        }
        if let Some(v) = update.left_rail_width {
            self.left_rail.expanded_width = v;
        }
        if let Some(v) = update.right_rail_visible {
            self.right_rail.visible = v;
        }
        if let Some(v) = update.right_rail_expanded {
            self.right_rail.expanded = v;
        }
        if let Some(v) = update.right_rail_width {
            self.right_rail.expanded_width = v;
        }
        if let Some(v) = update.chat_visible {
            self.chat.visible = v;
        }
        if let Some(v) = update.chat_collapsed {
            self.chat.collapsed = v;
        }
        if let Some(v) = update.chat_width {
            self.chat.width = v;
        }
        if let Some(v) = update.chat_side {
            self.chat.side = v;
        }
        if let Some(v) = update.bottom_panel_visible {
            self.bottom_panel.visible = v;
        }
        if let Some(v) = update.bottom_panel_height {
            self.bottom_panel.height = v;
        }
        if let Some(v) = update.dual_canvas {
            self.dual_canvas = v;
        }
        if let Some(v) = update.split_ratio {
            self.split_ratio = v;
        }
        if let Some(v) = update.orientation {
            self.orientation = v;
        }
    }
}

/// Field-by-field change to a [`ChromeState`]; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChromeUpdate {
    pub screen_width: Option<f32>,
    pub screen_height: Option<f32>,
    pub top_bar_visible: Option<bool>,
    pub top_bar_height: Option<f32>,
    pub left_rail_visible: Option<bool>,
    pub left_rail_expanded: Option<bool>,
    pub left_rail_width: Option<f32>,
    pub right_rail_visible: Option<bool>,
    pub right_rail_expanded: Option<bool>,
    pub right_rail_width: Option<f32>,
    pub chat_visible: Option<bool>,
    pub chat_collapsed: Option<bool>,
    pub chat_width: Option<f32>,
    pub chat_side: Option<DockSide>,
    pub bottom_panel_visible: Option<bool>,
    pub bottom_panel_height: Option<f32>,
    pub dual_canvas: Option<bool>,
    pub split_ratio: Option<f32>,
    pub orientation: Option<Orientation>,
}
