mod alignment;
mod area;
mod overlap;
mod placement;
mod reorganize;
mod viewport;
pub(crate) mod types;
pub use types::*;

pub use alignment::{Alignment, detect_alignment, effective_orientation};
pub use area::{CanvasSelector, resolve_area};
pub use overlap::{find_overlaps, overlaps, overlaps_any};
pub use placement::{agents_in_placement_order, assign_agent_index, place_next, reposition_manager};
pub use reorganize::{reorganize, task_ownership};
pub use viewport::{biased_center, fit_viewport, fit_zoom};

use crate::chrome::{ChromeState, ChromeUpdate};
use crate::config::LayoutConfig;
use crate::ir::{Edge, NodeArchetype, Orientation, Point, PositionedNode};

/// Stateful front of the layout functions.
///
/// Holds the configuration and the host's latest chrome snapshot. Every call
/// is a synchronous function of its arguments plus that snapshot.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
    chrome: ChromeState,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            chrome: ChromeState::default(),
        }
    }

    pub fn with_chrome(config: LayoutConfig, chrome: ChromeState) -> Self {
        Self { config, chrome }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn chrome(&self) -> &ChromeState {
        &self.chrome
    }

    pub fn set_chrome(&mut self, chrome: ChromeState) {
        self.chrome = chrome;
    }

    pub fn update_chrome(&mut self, update: &ChromeUpdate) {
        self.chrome.apply(update);
    }

    pub fn orientation(&self) -> Orientation {
        self.chrome.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.chrome.orientation = orientation;
    }

    pub fn resolve_area(&self, selector: CanvasSelector) -> Rect {
        resolve_area(&self.chrome, selector, &self.config.chrome)
    }

    pub fn place_next(
        &self,
        existing: &[PositionedNode],
        archetype: NodeArchetype,
        selector: CanvasSelector,
    ) -> Point {
        let area = self.resolve_area(selector);
        place_next(existing, archetype, self.orientation(), &area, &self.config)
    }

    pub fn reorganize(
        &self,
        nodes: &[PositionedNode],
        edges: &[Edge],
        selector: CanvasSelector,
    ) -> Vec<PositionedNode> {
        let area = self.resolve_area(selector);
        reorganize(nodes, edges, self.orientation(), &area, &self.config)
    }

    pub fn reposition_manager(
        &self,
        nodes: &[PositionedNode],
        selector: CanvasSelector,
    ) -> Vec<PositionedNode> {
        let area = self.resolve_area(selector);
        reposition_manager(nodes, self.orientation(), &area, &self.config)
    }

    pub fn fit_bounds(&self, bounds: &Rect, selector: CanvasSelector) -> Viewport {
        let area = self.resolve_area(selector);
        fit_viewport(bounds, &area, &self.chrome, &self.config.viewport)
    }

    /// Frames the whole node set; `None` when there is nothing to frame.
    pub fn fit_nodes(&self, nodes: &[PositionedNode], selector: CanvasSelector) -> Option<Viewport> {
        let bounds = bounding_box(nodes, &self.config.footprints)?;
        Some(self.fit_bounds(&bounds, selector))
    }

    /// Frames a single node with the tighter focus zoom cap.
    pub fn focus_node(&self, node: &PositionedNode, selector: CanvasSelector) -> Viewport {
        let area = self.resolve_area(selector);
        let config = self
            .config
            .viewport
            .with_zoom_cap(self.config.viewport.focus_zoom_cap);
        let bounds = node_rect(node, &self.config.footprints);
        fit_viewport(&bounds, &area, &self.chrome, &config)
    }

    /// Full relayout for the current orientation: reorganize, re-seat the
    /// manager, then frame the result.
    pub fn relayout(
        &self,
        nodes: &[PositionedNode],
        edges: &[Edge],
        selector: CanvasSelector,
    ) -> Relayout {
        let area = self.resolve_area(selector);
        let orientation = self.orientation();
        let reorganized = reorganize(nodes, edges, orientation, &area, &self.config);
        let nodes = reposition_manager(&reorganized, orientation, &area, &self.config);
        let viewport = bounding_box(&nodes, &self.config.footprints)
            .map(|bounds| fit_viewport(&bounds, &area, &self.chrome, &self.config.viewport));
        Relayout {
            orientation,
            nodes,
            viewport,
        }
    }

    /// Flips the orientation and relayouts for it.
    pub fn toggle_orientation(
        &mut self,
        nodes: &[PositionedNode],
        edges: &[Edge],
        selector: CanvasSelector,
    ) -> Relayout {
        let orientation = self.orientation().flipped();
        log::debug!("orientation toggled to {orientation:?}");
        self.set_orientation(orientation);
        self.relayout(nodes, edges, selector)
    }

    /// Pairs of nodes whose footprints collide within the collision margin.
    pub fn collisions(&self, nodes: &[PositionedNode]) -> Vec<(usize, usize)> {
        let rects: Vec<Rect> = nodes
            .iter()
            .map(|node| node_rect(node, &self.config.footprints))
            .collect();
        find_overlaps(&rects, self.config.placement.collision_margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chrome::DockSide;

    #[test]
    fn chrome_updates_change_the_area() {
        let mut engine = LayoutEngine::default();
        let before = engine.resolve_area(CanvasSelector::Primary);
        engine.update_chrome(&ChromeUpdate {
            chat_visible: Some(true),
            chat_side: Some(DockSide::Left),
            ..Default::default()
        });
        let after = engine.resolve_area(CanvasSelector::Primary);
        assert_eq!(after.x, before.x + 450.0);
        assert_eq!(after.width, before.width - 450.0);
    }

    #[test]
    fn placement_uses_the_resolved_area() {
        let engine = LayoutEngine::default();
        let point = engine.place_next(&[], NodeArchetype::Agent, CanvasSelector::Primary);
        // rail 280 + margin 20 + inset 20, top bar 64 + margin 20 + inset 20
        assert_eq!(point, Point::new(320.0, 104.0));
    }

    #[test]
    fn toggle_flips_orientation_and_seats_manager() {
        let mut engine = LayoutEngine::default();
        let nodes = vec![
            PositionedNode::new("m", NodeArchetype::Manager, 0.0, 0.0),
            PositionedNode::new("a0", NodeArchetype::Agent, 0.0, 0.0),
            PositionedNode::new("a1", NodeArchetype::Agent, 0.0, 0.0),
        ];
        let result = engine.toggle_orientation(&nodes, &[], CanvasSelector::Primary);
        assert_eq!(result.orientation, Orientation::Horizontal);
        assert_eq!(engine.orientation(), Orientation::Horizontal);
        let manager = &result.nodes[0];
        let agent = &result.nodes[1];
        assert!(manager.position.x + 280.0 < agent.position.x);
        assert!(result.viewport.is_some());
        assert!(engine.collisions(&result.nodes).is_empty());
    }

    #[test]
    fn fit_nodes_needs_nodes() {
        let engine = LayoutEngine::default();
        assert!(engine.fit_nodes(&[], CanvasSelector::Full).is_none());
    }

    #[test]
    fn focus_uses_its_own_cap() {
        let engine = LayoutEngine::default();
        let node = PositionedNode::new("t", NodeArchetype::Task, 0.0, 0.0);
        let viewport = engine.focus_node(&node, CanvasSelector::Primary);
        assert_eq!(viewport.zoom, engine.config().viewport.focus_zoom_cap);
    }
}
