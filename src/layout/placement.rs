use crate::config::LayoutConfig;
use crate::ir::{NodeArchetype, Orientation, Point, PositionedNode, Size};

use super::alignment::effective_orientation;
use super::overlap::{overlaps, overlaps_any};
use super::{Rect, node_rect, node_size, nodes_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Shared state for one placement call.
struct Placement<'a> {
    existing: &'a [PositionedNode],
    area: Rect,
    config: &'a LayoutConfig,
    spacing: f32,
}

impl<'a> Placement<'a> {
    fn new(existing: &'a [PositionedNode], area: Rect, config: &'a LayoutConfig) -> Self {
        Self {
            existing,
            area,
            config,
            spacing: config.placement.spacing_for_width(area.width),
        }
    }

    fn anchor(&self) -> Point {
        let inset = self.config.placement.anchor_inset;
        Point::new(self.area.x + inset, self.area.y + inset)
    }

    fn footprint(&self, archetype: NodeArchetype) -> Size {
        self.config.footprints.get(archetype)
    }

    fn rects(&self, archetype: NodeArchetype) -> Vec<Rect> {
        nodes_of(self.existing, archetype)
            .map(|node| node_rect(node, &self.config.footprints))
            .collect()
    }

    fn obstacles(&self) -> Vec<Rect> {
        self.existing
            .iter()
            .map(|node| node_rect(node, &self.config.footprints))
            .collect()
    }

    fn orientation_for(&self, requested: Orientation, rects: &[Rect]) -> Orientation {
        let origins: Vec<Point> = rects.iter().map(Rect::origin).collect();
        effective_orientation(requested, &origins, &self.config.placement.alignment)
    }

    /// Slides `origin` along `axis` until a node of `size` clears every obstacle.
    fn nudge_clear(&self, origin: Point, size: Size, axis: Axis) -> Point {
        let margin = self.config.placement.collision_margin;
        let step = self.spacing.max(margin);
        let obstacles = self.obstacles();
        let mut candidate = Rect::from_origin(origin, size);
        for _ in 0..=obstacles.len() {
            let Some(hit) = obstacles
                .iter()
                .find(|rect| overlaps(&candidate, rect, margin))
            else {
                break;
            };
            match axis {
                Axis::X => candidate.x = hit.right() + step,
                Axis::Y => candidate.y = hit.bottom() + step,
            }
        }
        candidate.origin()
    }
}

/// Round-robin owner of the task at `task_index`, `None` without agents.
pub fn assign_agent_index(task_index: usize, agent_count: usize) -> Option<usize> {
    if agent_count == 0 {
        return None;
    }
    Some(task_index % agent_count)
}

/// Position for the next node of `archetype`, given what is already on the canvas.
pub fn place_next(
    existing: &[PositionedNode],
    archetype: NodeArchetype,
    orientation: Orientation,
    area: &Rect,
    config: &LayoutConfig,
) -> Point {
    let placement = Placement::new(existing, *area, config);
    let point = match archetype {
        NodeArchetype::Agent => place_agent(&placement, orientation),
        NodeArchetype::Task => place_task(&placement, orientation),
        NodeArchetype::Manager => place_manager(&placement, orientation),
        NodeArchetype::FlowStep => place_flow_step(&placement, orientation),
        NodeArchetype::Other => place_other(&placement, orientation),
    };
    log::trace!("placed {archetype:?} at ({}, {})", point.x, point.y);
    point
}

fn place_agent(placement: &Placement, orientation: Orientation) -> Point {
    let agents = placement.rects(NodeArchetype::Agent);
    let size = placement.footprint(NodeArchetype::Agent);
    if agents.is_empty() {
        // A manager may already hold the anchor.
        let axis = match orientation {
            Orientation::Vertical => Axis::Y,
            Orientation::Horizontal => Axis::X,
        };
        return placement.nudge_clear(placement.anchor(), size, axis);
    }
    let task = placement.footprint(NodeArchetype::Task);
    let spacing = placement.spacing;

    match placement.orientation_for(orientation, &agents) {
        Orientation::Vertical => {
            let row_y = agents.iter().map(|r| r.y).fold(f32::INFINITY, f32::min);
            let x = agents
                .iter()
                .map(|r| r.x + r.width.max(task.width))
                .fold(f32::NEG_INFINITY, f32::max)
                + spacing;
            placement.nudge_clear(Point::new(x, row_y), size, Axis::X)
        }
        Orientation::Horizontal => {
            let column_x = agents.iter().map(|r| r.x).fold(f32::INFINITY, f32::min);
            let y = agents
                .iter()
                .map(|r| r.y + r.height.max(task.height))
                .fold(f32::NEG_INFINITY, f32::max)
                + spacing;
            placement.nudge_clear(Point::new(column_x, y), size, Axis::Y)
        }
    }
}

fn place_task(placement: &Placement, orientation: Orientation) -> Point {
    let tasks = placement.rects(NodeArchetype::Task);
    let size = placement.footprint(NodeArchetype::Task);
    let orientation =
        placement.orientation_for(orientation, &placement.rects(NodeArchetype::Agent));
    let agents = agents_in_placement_order(placement.existing, orientation);

    let Some(target) = assign_agent_index(tasks.len(), agents.len()) else {
        return place_orphan_task(placement, &tasks, size, orientation);
    };
    let agent = node_rect(agents[target], &placement.config.footprints);
    let spacing = placement.spacing;
    let tolerances = &placement.config.placement;

    match orientation {
        Orientation::Vertical => {
            let x = agent.x + (agent.width - size.width) / 2.0;
            let bottom = tasks
                .iter()
                .filter(|t| (t.x - x).abs() < tolerances.column_tolerance)
                .map(Rect::bottom)
                .fold(agent.bottom(), f32::max);
            placement.nudge_clear(Point::new(x, bottom + spacing), size, Axis::Y)
        }
        Orientation::Horizontal => {
            let y = agent.y + (agent.height - size.height) / 2.0;
            let right = tasks
                .iter()
                .filter(|t| (t.y - y).abs() < tolerances.row_tolerance)
                .map(Rect::right)
                .fold(agent.right(), f32::max);
            placement.nudge_clear(Point::new(right + spacing, y), size, Axis::X)
        }
    }
}

/// Tasks created before any agent start one agent-row below the anchor.
fn place_orphan_task(
    placement: &Placement,
    tasks: &[Rect],
    size: Size,
    orientation: Orientation,
) -> Point {
    log::debug!("no agents on canvas, placing task at the default origin");
    let anchor = placement.anchor();
    let agent = placement.footprint(NodeArchetype::Agent);
    let origin = match orientation {
        Orientation::Vertical => Point::new(anchor.x, anchor.y + agent.height + placement.spacing),
        Orientation::Horizontal => Point::new(anchor.x + agent.width + placement.spacing, anchor.y),
    };
    let point = append_adjacent(placement, tasks, size, orientation, origin);
    let axis = match orientation {
        Orientation::Vertical => Axis::X,
        Orientation::Horizontal => Axis::Y,
    };
    placement.nudge_clear(point, size, axis)
}

fn place_manager(placement: &Placement, orientation: Orientation) -> Point {
    let agents = placement.rects(NodeArchetype::Agent);
    let size = placement.footprint(NodeArchetype::Manager);
    manager_position(placement, &agents, size, orientation)
}

/// Above the agent row (vertical) or left of the agent column (horizontal).
/// Deliberately unclamped: the result may sit outside the visible area.
fn manager_position(
    placement: &Placement,
    agents: &[Rect],
    size: Size,
    orientation: Orientation,
) -> Point {
    if agents.is_empty() {
        return placement.anchor();
    }
    let lift = placement.config.placement.manager_spacing_multiplier * placement.spacing;
    let count = agents.len() as f32;
    match placement.orientation_for(orientation, agents) {
        Orientation::Vertical => {
            let top = agents.iter().map(|r| r.y).fold(f32::INFINITY, f32::min);
            let mean_x = agents.iter().map(|r| r.center().x).sum::<f32>() / count;
            Point::new(mean_x - size.width / 2.0, top - size.height - lift)
        }
        Orientation::Horizontal => {
            let left = agents.iter().map(|r| r.x).fold(f32::INFINITY, f32::min);
            let mean_y = agents.iter().map(|r| r.center().y).sum::<f32>() / count;
            Point::new(left - size.width - lift, mean_y - size.height / 2.0)
        }
    }
}

fn place_flow_step(placement: &Placement, orientation: Orientation) -> Point {
    let steps = placement.rects(NodeArchetype::FlowStep);
    let size = placement.footprint(NodeArchetype::FlowStep);
    if steps.is_empty() {
        let center = placement.area.center();
        let origin = Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0);
        return placement.nudge_clear(origin, size, Axis::Y);
    }
    let orientation = placement.orientation_for(orientation, &steps);
    let anchor = placement.anchor();
    let point = append_adjacent(placement, &steps, size, orientation, anchor);
    let axis = match orientation {
        Orientation::Vertical => Axis::X,
        Orientation::Horizontal => Axis::Y,
    };
    placement.nudge_clear(point, size, axis)
}

fn place_other(placement: &Placement, orientation: Orientation) -> Point {
    let obstacles = placement.obstacles();
    let size = placement.footprint(NodeArchetype::Other);
    let anchor = placement.anchor();
    let point = append_adjacent(placement, &obstacles, size, orientation, anchor);
    let candidate = Rect::from_origin(point, size);
    if !overlaps_any(&candidate, &obstacles, placement.config.placement.collision_margin) {
        return point;
    }
    let bottom = obstacles
        .iter()
        .map(Rect::bottom)
        .fold(f32::NEG_INFINITY, f32::max);
    log::debug!("generic placement collided, dropping below all nodes");
    Point::new(anchor.x, bottom + placement.spacing)
}

/// Appends after the last row (vertical) or column (horizontal) of `sequence`,
/// wrapping to a fresh row or column when the area overflows.
fn append_adjacent(
    placement: &Placement,
    sequence: &[Rect],
    size: Size,
    orientation: Orientation,
    anchor: Point,
) -> Point {
    if sequence.is_empty() {
        return anchor;
    }
    let spacing = placement.spacing;
    let area = placement.area;
    let min_x = sequence.iter().map(|r| r.x).fold(f32::INFINITY, f32::min);
    let min_y = sequence.iter().map(|r| r.y).fold(f32::INFINITY, f32::min);
    let max_right = sequence.iter().map(Rect::right).fold(f32::NEG_INFINITY, f32::max);
    let max_bottom = sequence.iter().map(Rect::bottom).fold(f32::NEG_INFINITY, f32::max);

    match orientation {
        Orientation::Vertical => {
            let tolerance = placement.config.placement.row_tolerance;
            let row_y = sequence.iter().map(|r| r.y).fold(f32::NEG_INFINITY, f32::max);
            let x = sequence
                .iter()
                .filter(|r| (r.y - row_y).abs() < tolerance)
                .map(Rect::right)
                .fold(f32::NEG_INFINITY, f32::max)
                + spacing;
            if x + size.width > area.right() {
                Point::new(min_x, max_bottom + spacing)
            } else {
                Point::new(x, row_y)
            }
        }
        Orientation::Horizontal => {
            let tolerance = placement.config.placement.column_tolerance;
            let column_x = sequence.iter().map(|r| r.x).fold(f32::NEG_INFINITY, f32::max);
            let y = sequence
                .iter()
                .filter(|r| (r.x - column_x).abs() < tolerance)
                .map(Rect::bottom)
                .fold(f32::NEG_INFINITY, f32::max)
                + spacing;
            if y + size.height > area.bottom() {
                Point::new(max_right + spacing, min_y)
            } else {
                Point::new(column_x, y)
            }
        }
    }
}

/// Recomputes every manager from the current agents. Other nodes are returned as-is.
pub fn reposition_manager(
    nodes: &[PositionedNode],
    orientation: Orientation,
    area: &Rect,
    config: &LayoutConfig,
) -> Vec<PositionedNode> {
    let placement = Placement::new(nodes, *area, config);
    let agents = placement.rects(NodeArchetype::Agent);
    nodes
        .iter()
        .map(|node| {
            let mut node = node.clone();
            if node.archetype == NodeArchetype::Manager {
                let size = node_size(&node, &config.footprints);
                node.position = manager_position(&placement, &agents, size, orientation);
            }
            node
        })
        .collect()
}

/// Agents ordered along the placement axis; ties fall back to the id.
pub fn agents_in_placement_order<'a>(
    nodes: &'a [PositionedNode],
    orientation: Orientation,
) -> Vec<&'a PositionedNode> {
    let mut agents: Vec<&PositionedNode> = nodes
        .iter()
        .filter(|node| node.archetype == NodeArchetype::Agent)
        .collect();
    agents.sort_by(|a, b| {
        let ordering = match orientation {
            Orientation::Vertical => a
                .position
                .x
                .total_cmp(&b.position.x)
                .then(a.position.y.total_cmp(&b.position.y)),
            Orientation::Horizontal => a
                .position
                .y
                .total_cmp(&b.position.y)
                .then(a.position.x.total_cmp(&b.position.x)),
        };
        ordering.then_with(|| a.id.cmp(&b.id))
    });
    agents
}
