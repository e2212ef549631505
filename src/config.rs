use crate::ir::{NodeArchetype, Size};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootprintTable {
    pub agent: Size,
    pub manager: Size,
    pub task: Size,
    pub flow_step: Size,
    pub other: Size,
}

impl Default for FootprintTable {
    fn default() -> Self {
        Self {
            agent: Size::new(250.0, 120.0),
            manager: Size::new(280.0, 120.0),
            task: Size::new(250.0, 120.0),
            flow_step: Size::new(220.0, 80.0),
            other: Size::new(200.0, 80.0),
        }
    }
}

impl FootprintTable {
    pub fn get(&self, archetype: NodeArchetype) -> Size {
        match archetype {
            NodeArchetype::Agent => self.agent,
            NodeArchetype::Manager => self.manager,
            NodeArchetype::Task => self.task,
            NodeArchetype::FlowStep => self.flow_step,
            NodeArchetype::Other => self.other,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChromeMetrics {
    pub margin: f32,
    pub min_width: f32,
    pub min_height: f32,
}

impl Default for ChromeMetrics {
    fn default() -> Self {
        Self {
            margin: 20.0,
            min_width: 200.0,
            min_height: 150.0,
        }
    }
}

/// Thresholds of the layout-drift heuristic. Empirical values, tune freely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AlignmentThresholds {
    pub tolerance: f32,
    pub separation: f32,
}

impl Default for AlignmentThresholds {
    fn default() -> Self {
        Self {
            tolerance: 10.0,
            separation: 150.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementConfig {
    pub spacing: f32,
    pub anchor_inset: f32,
    pub narrow_width_threshold: f32,
    pub narrow_spacing_factor: f32,
    pub column_tolerance: f32,
    pub row_tolerance: f32,
    pub manager_spacing_multiplier: f32,
    pub collision_margin: f32,
    pub alignment: AlignmentThresholds,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            spacing: 50.0,
            anchor_inset: 20.0,
            narrow_width_threshold: 600.0,
            narrow_spacing_factor: 0.5,
            column_tolerance: 50.0,
            row_tolerance: 50.0,
            manager_spacing_multiplier: 2.0,
            collision_margin: 10.0,
            alignment: AlignmentThresholds::default(),
        }
    }
}

impl PlacementConfig {
    /// Spacing for an area of the given width; narrow canvases get a tighter grid.
    pub fn spacing_for_width(&self, width: f32) -> f32 {
        if width < self.narrow_width_threshold {
            self.spacing * self.narrow_spacing_factor
        } else {
            self.spacing
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorganizeConfig {
    pub task_gap: f32,
    pub min_task_pitch: f32,
    pub column_gap: f32,
    pub row_gap: f32,
    pub group_gap: f32,
    pub lane_gap: f32,
    pub flow_gap: f32,
    pub balance_offset_x: f32,
    pub balance_offset_y: f32,
}

impl Default for ReorganizeConfig {
    fn default() -> Self {
        Self {
            task_gap: 40.0,
            min_task_pitch: 100.0,
            column_gap: 120.0,
            row_gap: 100.0,
            group_gap: 60.0,
            lane_gap: 120.0,
            flow_gap: 60.0,
            balance_offset_x: -10.0,
            balance_offset_y: -10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub zoom_cap: f32,
    pub focus_zoom_cap: f32,
    /// Renderer floor applied after fitting. Unset, a fit never zooms past the area.
    pub min_zoom: Option<f32>,
    pub chat_bias_ratio: f32,
    pub bottom_bias_ratio: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom_cap: 1.5,
            focus_zoom_cap: 2.5,
            min_zoom: None,
            chat_bias_ratio: 0.25,
            bottom_bias_ratio: 0.25,
        }
    }
}

impl ViewportConfig {
    pub fn with_zoom_cap(&self, zoom_cap: f32) -> Self {
        Self {
            zoom_cap,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub footprints: FootprintTable,
    pub chrome: ChromeMetrics,
    pub placement: PlacementConfig,
    pub reorganize: ReorganizeConfig,
    pub viewport: ViewportConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SizeFile {
    width: Option<f32>,
    height: Option<f32>,
}

impl SizeFile {
    fn merge_into(&self, size: &mut Size) {
        if let Some(v) = self.width {
            size.width = v;
        }
        if let Some(v) = self.height {
            size.height = v;
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FootprintsFile {
    agent: Option<SizeFile>,
    manager: Option<SizeFile>,
    task: Option<SizeFile>,
    flow_step: Option<SizeFile>,
    other: Option<SizeFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChromeMetricsFile {
    margin: Option<f32>,
    min_width: Option<f32>,
    min_height: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlacementFile {
    spacing: Option<f32>,
    anchor_inset: Option<f32>,
    narrow_width_threshold: Option<f32>,
    narrow_spacing_factor: Option<f32>,
    column_tolerance: Option<f32>,
    row_tolerance: Option<f32>,
    manager_spacing_multiplier: Option<f32>,
    collision_margin: Option<f32>,
    alignment_tolerance: Option<f32>,
    alignment_separation: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReorganizeFile {
    task_gap: Option<f32>,
    min_task_pitch: Option<f32>,
    column_gap: Option<f32>,
    row_gap: Option<f32>,
    group_gap: Option<f32>,
    lane_gap: Option<f32>,
    flow_gap: Option<f32>,
    balance_offset_x: Option<f32>,
    balance_offset_y: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewportFile {
    zoom_cap: Option<f32>,
    focus_zoom_cap: Option<f32>,
    min_zoom: Option<f32>,
    chat_bias_ratio: Option<f32>,
    bottom_bias_ratio: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    footprints: Option<FootprintsFile>,
    chrome: Option<ChromeMetricsFile>,
    placement: Option<PlacementFile>,
    reorganize: Option<ReorganizeFile>,
    viewport: Option<ViewportFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a JSON5 config document and merges it onto the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<LayoutConfig> {
    let mut config = LayoutConfig::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(footprints) = parsed.footprints {
        if let Some(v) = footprints.agent {
            v.merge_into(&mut config.footprints.agent);
        }
        if let Some(v) = footprints.manager {
            v.merge_into(&mut config.footprints.manager);
        }
        if let Some(v) = footprints.task {
            v.merge_into(&mut config.footprints.task);
        }
        if let Some(v) = footprints.flow_step {
            v.merge_into(&mut config.footprints.flow_step);
        }
        if let Some(v) = footprints.other {
            v.merge_into(&mut config.footprints.other);
        }
    }

    if let Some(chrome) = parsed.chrome {
        if let Some(v) = chrome.margin {
            config.chrome.margin = v;
        }
        if let Some(v) = chrome.min_width {
            config.chrome.min_width = v;
        }
        if let Some(v) = chrome.min_height {
            config.chrome.min_height = v;
        }
    }

    if let Some(placement) = parsed.placement {
        if let Some(v) = placement.spacing {
            config.placement.spacing = v;
        }
        if let Some(v) = placement.anchor_inset {
            config.placement.anchor_inset = v;
        }
        if let Some(v) = placement.narrow_width_threshold {
            config.placement.narrow_width_threshold = v;
        }
        if let Some(v) = placement.narrow_spacing_factor {
            config.placement.narrow_spacing_factor = v;
        }
        if let Some(v) = placement.column_tolerance {
            config.placement.column_tolerance = v;
        }
        if let Some(v) = placement.row_tolerance {
            config.placement.row_tolerance = v;
        }
        if let Some(v) = placement.manager_spacing_multiplier {
            config.placement.manager_spacing_multiplier = v;
        }
        if let Some(v) = placement.collision_margin {
            config.placement.collision_margin = v;
        }
        if let Some(v) = placement.alignment_tolerance {
            config.placement.alignment.tolerance = v;
        }
        if let Some(v) = placement.alignment_separation {
            config.placement.alignment.separation = v;
        }
    }

    if let Some(reorganize) = parsed.reorganize {
        if let Some(v) = reorganize.task_gap {
            config.reorganize.task_gap = v;
        }
        if let Some(v) = reorganize.min_task_pitch {
            config.reorganize.min_task_pitch = v;
        }
        if let Some(v) = reorganize.column_gap {
            config.reorganize.column_gap = v;
        }
        if let Some(v) = reorganize.row_gap {
            config.reorganize.row_gap = v;
        }
        if let Some(v) = reorganize.group_gap {
            config.reorganize.group_gap = v;
        }
        if let Some(v) = reorganize.lane_gap {
            config.reorganize.lane_gap = v;
        }
        if let Some(v) = reorganize.flow_gap {
            config.reorganize.flow_gap = v;
        }
        if let Some(v) = reorganize.balance_offset_x {
            config.reorganize.balance_offset_x = v;
        }
        if let Some(v) = reorganize.balance_offset_y {
            config.reorganize.balance_offset_y = v;
        }
    }

    if let Some(viewport) = parsed.viewport {
        if let Some(v) = viewport.zoom_cap {
            config.viewport.zoom_cap = v;
        }
        if let Some(v) = viewport.focus_zoom_cap {
            config.viewport.focus_zoom_cap = v;
        }
        if let Some(v) = viewport.min_zoom {
            config.viewport.min_zoom = Some(v);
        }
        if let Some(v) = viewport.chat_bias_ratio {
            config.viewport.chat_bias_ratio = v;
        }
        if let Some(v) = viewport.bottom_bias_ratio {
            config.viewport.bottom_bias_ratio = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_gives_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.chrome.min_width, 200.0);
        assert_eq!(config.viewport.zoom_cap, 1.5);
        assert_eq!(config.viewport.min_zoom, None);
    }

    #[test]
    fn merges_json5_overrides() {
        let config = parse_config(
            r#"{
                // tighter grid for small screens
                placement: { spacing: 30, alignmentTolerance: 4 },
                footprints: { task: { height: 90 } },
                viewport: { zoomCap: 2.0, minZoom: 0.2 },
            }"#,
        )
        .unwrap();
        assert_eq!(config.placement.spacing, 30.0);
        assert_eq!(config.placement.alignment.tolerance, 4.0);
        assert_eq!(config.placement.alignment.separation, 150.0);
        assert_eq!(config.footprints.task, Size::new(250.0, 90.0));
        assert_eq!(config.viewport.zoom_cap, 2.0);
        assert_eq!(config.viewport.focus_zoom_cap, 2.5);
        assert_eq!(config.viewport.min_zoom, Some(0.2));
    }

    #[test]
    fn narrow_areas_halve_spacing() {
        let placement = PlacementConfig::default();
        assert_eq!(placement.spacing_for_width(599.0), 25.0);
        assert_eq!(placement.spacing_for_width(600.0), 50.0);
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(parse_config("{ placement: ").is_err());
    }
}
