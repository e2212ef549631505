use serde::{Deserialize, Serialize};

use crate::config::FootprintTable;
use crate::ir::{NodeArchetype, Orientation, Point, PositionedNode, Size};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

/// Camera end state for the renderer: `screen = canvas * zoom + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

impl Viewport {
    pub fn to_screen(&self, point: Point) -> Point {
        Point::new(point.x * self.zoom + self.x, point.y * self.zoom + self.y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Result of a full relayout: new node positions plus the camera that frames them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relayout {
    pub orientation: Orientation,
    pub nodes: Vec<PositionedNode>,
    pub viewport: Option<Viewport>,
}

pub fn node_size(node: &PositionedNode, footprints: &FootprintTable) -> Size {
    let fallback = footprints.get(node.archetype);
    Size::new(
        node.width.unwrap_or(fallback.width),
        node.height.unwrap_or(fallback.height),
    )
}

pub fn node_rect(node: &PositionedNode, footprints: &FootprintTable) -> Rect {
    Rect::from_origin(node.position, node_size(node, footprints))
}

pub fn nodes_of<'a>(
    nodes: &'a [PositionedNode],
    archetype: NodeArchetype,
) -> impl Iterator<Item = &'a PositionedNode> + 'a {
    nodes.iter().filter(move |node| node.archetype == archetype)
}

/// Bounding box of the node footprints, `None` for an empty set.
pub fn bounding_box(nodes: &[PositionedNode], footprints: &FootprintTable) -> Option<Rect> {
    nodes
        .iter()
        .map(|node| node_rect(node, footprints))
        .reduce(|acc, rect| acc.union(&rect))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_uses_footprints_and_explicit_sizes() {
        let footprints = FootprintTable::default();
        let nodes = vec![
            PositionedNode::new("a", NodeArchetype::Agent, 10.0, 20.0),
            PositionedNode::new("b", NodeArchetype::Other, 400.0, 300.0).with_size(50.0, 40.0),
        ];
        let bounds = bounding_box(&nodes, &footprints).unwrap();
        assert_eq!(bounds, Rect::new(10.0, 20.0, 440.0, 320.0));
        assert!(bounding_box(&[], &footprints).is_none());
    }

    #[test]
    fn viewport_maps_canvas_to_screen() {
        let viewport = Viewport {
            x: 100.0,
            y: 50.0,
            zoom: 2.0,
        };
        assert_eq!(viewport.to_screen(Point::new(10.0, 10.0)), Point::new(120.0, 70.0));
    }
}
