use std::collections::BTreeMap;

use crate::config::LayoutConfig;
use crate::ir::{Edge, NodeArchetype, Orientation, Point, PositionedNode, Size};

use super::{Rect, node_size};

/// Maps each agent id to the indices of the task nodes it owns.
///
/// An edge is an ownership edge only when its source is an agent and its
/// target is a task. A task keeps the first owner found in edge order.
/// Owned tasks are listed in node order.
pub fn task_ownership<'a>(
    nodes: &'a [PositionedNode],
    edges: &'a [Edge],
) -> BTreeMap<&'a str, Vec<usize>> {
    let mut archetypes: BTreeMap<&str, NodeArchetype> = BTreeMap::new();
    for node in nodes {
        archetypes.entry(node.id.as_str()).or_insert(node.archetype);
    }

    let mut owner_of: BTreeMap<&str, &str> = BTreeMap::new();
    for edge in edges {
        let source = archetypes.get(edge.source.as_str());
        let target = archetypes.get(edge.target.as_str());
        if source == Some(&NodeArchetype::Agent) && target == Some(&NodeArchetype::Task) {
            owner_of
                .entry(edge.target.as_str())
                .or_insert(edge.source.as_str());
        }
    }

    let mut owned: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, node) in nodes.iter().enumerate() {
        if node.archetype != NodeArchetype::Task {
            continue;
        }
        if let Some(agent) = owner_of.get(node.id.as_str()) {
            owned.entry(*agent).or_default().push(idx);
        }
    }
    owned
}

/// Axis-neutral view of a size: `main` runs along the agent lane, `cross` across it.
#[derive(Debug, Clone, Copy)]
struct Extent {
    main: f32,
    cross: f32,
}

impl Extent {
    fn of(size: Size, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Vertical => Self {
                main: size.width,
                cross: size.height,
            },
            Orientation::Horizontal => Self {
                main: size.height,
                cross: size.width,
            },
        }
    }
}

fn to_point(main: f32, cross: f32, orientation: Orientation) -> Point {
    match orientation {
        Orientation::Vertical => Point::new(main, cross),
        Orientation::Horizontal => Point::new(cross, main),
    }
}

/// Full topology-aware relayout of agents, tasks and flow steps.
///
/// Returns the nodes in input order with new positions. Managers and
/// unrecognised nodes keep their current position.
pub fn reorganize(
    nodes: &[PositionedNode],
    edges: &[Edge],
    orientation: Orientation,
    area: &Rect,
    config: &LayoutConfig,
) -> Vec<PositionedNode> {
    if nodes.is_empty() {
        return Vec::new();
    }
    let settings = &config.reorganize;
    let footprints = &config.footprints;
    let inset = config.placement.anchor_inset;
    let (origin_main, origin_cross) = match orientation {
        Orientation::Vertical => (area.x + inset, area.y + inset),
        Orientation::Horizontal => (area.y + inset, area.x + inset),
    };
    let (group_offset, lane_gap) = match orientation {
        Orientation::Vertical => (settings.balance_offset_x, settings.row_gap),
        Orientation::Horizontal => (settings.balance_offset_y, settings.column_gap),
    };
    let pitch = |extent: Extent| (extent.main + settings.task_gap).max(settings.min_task_pitch);

    let extents: Vec<Extent> = nodes
        .iter()
        .map(|node| Extent::of(node_size(node, footprints), orientation))
        .collect();
    let agents: Vec<usize> = (0..nodes.len())
        .filter(|&idx| nodes[idx].archetype == NodeArchetype::Agent)
        .collect();
    let owned = task_ownership(nodes, edges);
    let mut positions: Vec<Point> = nodes.iter().map(|node| node.position).collect();

    let agent_lane_depth = agents
        .iter()
        .map(|&idx| extents[idx].cross)
        .fold(0.0_f32, f32::max);
    let agent_cross = origin_cross;
    let task_cross = if agents.is_empty() {
        origin_cross
    } else {
        origin_cross + agent_lane_depth + lane_gap
    };

    let mut cursor = origin_main;
    for &agent_idx in &agents {
        let agent = extents[agent_idx];
        let Some(tasks) = owned.get(nodes[agent_idx].id.as_str()) else {
            positions[agent_idx] = to_point(cursor, agent_cross, orientation);
            cursor += agent.main + settings.group_gap;
            continue;
        };

        // Lay the group out relative to 0, then shift it onto the cursor.
        let mut offsets = Vec::with_capacity(tasks.len());
        let mut run = 0.0_f32;
        for &task_idx in tasks {
            offsets.push(run);
            run += pitch(extents[task_idx]);
        }
        let first = extents[tasks[0]];
        let last_idx = tasks[tasks.len() - 1];
        let first_center = first.main / 2.0;
        let last_center = offsets[offsets.len() - 1] + extents[last_idx].main / 2.0;
        let agent_center = (first_center + last_center) / 2.0 + group_offset;
        let agent_start = agent_center - agent.main / 2.0;
        let shift = cursor - agent_start.min(0.0);

        for (&task_idx, offset) in tasks.iter().zip(&offsets) {
            positions[task_idx] = to_point(offset + shift, task_cross, orientation);
        }
        positions[agent_idx] = to_point(agent_start + shift, agent_cross, orientation);

        let tasks_end = offsets[offsets.len() - 1] + extents[last_idx].main;
        let group_end = tasks_end.max(agent_start + agent.main) + shift;
        cursor = group_end + settings.group_gap;
    }

    for (idx, node) in nodes.iter().enumerate() {
        if node.archetype != NodeArchetype::Task {
            continue;
        }
        let is_owned = owned.values().any(|tasks| tasks.contains(&idx));
        if !is_owned {
            positions[idx] = to_point(cursor, task_cross, orientation);
            cursor += pitch(extents[idx]);
        }
    }

    layout_flow_steps(nodes, &extents, &mut positions, orientation, (origin_main, origin_cross), config);

    log::debug!(
        "reorganized {} nodes ({} agents) for {orientation:?}",
        nodes.len(),
        agents.len()
    );

    nodes
        .iter()
        .zip(positions)
        .map(|(node, position)| PositionedNode {
            position,
            ..node.clone()
        })
        .collect()
}

/// Flow steps run along the agent lane, in their own lane past agents and tasks.
fn layout_flow_steps(
    nodes: &[PositionedNode],
    extents: &[Extent],
    positions: &mut [Point],
    orientation: Orientation,
    origin: (f32, f32),
    config: &LayoutConfig,
) {
    let mut steps: Vec<usize> = (0..nodes.len())
        .filter(|&idx| nodes[idx].archetype == NodeArchetype::FlowStep)
        .collect();
    if steps.is_empty() {
        return;
    }

    // Legacy steps carry no order; their spread along the cross axis still
    // reflects the order they were laid out in before a toggle.
    steps.sort_by(|&a, &b| {
        let (na, nb) = (&nodes[a], &nodes[b]);
        let (main_a, cross_a) = split_point(na.position, orientation);
        let (main_b, cross_b) = split_point(nb.position, orientation);
        na.order
            .is_none()
            .cmp(&nb.order.is_none())
            .then(na.order.cmp(&nb.order))
            .then(cross_a.total_cmp(&cross_b))
            .then(main_a.total_cmp(&main_b))
            .then(na.id.cmp(&nb.id))
    });

    let lane_end = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| matches!(node.archetype, NodeArchetype::Agent | NodeArchetype::Task))
        .map(|(idx, _)| split_point(positions[idx], orientation).1 + extents[idx].cross)
        .fold(None, |acc: Option<f32>, end| Some(acc.map_or(end, |a| a.max(end))));
    let cross = match lane_end {
        Some(end) => end + config.reorganize.lane_gap,
        None => origin.1,
    };

    let mut cursor = origin.0;
    for idx in steps {
        positions[idx] = to_point(cursor, cross, orientation);
        cursor += extents[idx].main + config.reorganize.flow_gap;
    }
}

fn split_point(point: Point, orientation: Orientation) -> (f32, f32) {
    match orientation {
        Orientation::Vertical => (point.x, point.y),
        Orientation::Horizontal => (point.y, point.x),
    }
}
