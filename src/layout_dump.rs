use crate::ir::{NodeArchetype, Orientation, Point, PositionedNode};
use crate::layout::{Alignment, LayoutEngine, Rect, Viewport, detect_alignment, node_rect};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub orientation: Orientation,
    pub area: Rect,
    pub agent_alignment: Alignment,
    pub viewport: Option<Viewport>,
    pub nodes: Vec<NodeDump>,
    pub overlaps: Vec<[String; 2]>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub archetype: NodeArchetype,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutDump {
    pub fn from_nodes(
        engine: &LayoutEngine,
        area: Rect,
        nodes: &[PositionedNode],
        viewport: Option<Viewport>,
    ) -> Self {
        let footprints = &engine.config().footprints;
        let dumped = nodes
            .iter()
            .map(|node| {
                let rect = node_rect(node, footprints);
                NodeDump {
                    id: node.id.clone(),
                    archetype: node.archetype,
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: rect.height,
                }
            })
            .collect();

        let agents: Vec<Point> = nodes
            .iter()
            .filter(|node| node.archetype == NodeArchetype::Agent)
            .map(|node| node.position)
            .collect();

        let overlaps = engine
            .collisions(nodes)
            .into_iter()
            .map(|(a, b)| [nodes[a].id.clone(), nodes[b].id.clone()])
            .collect();

        LayoutDump {
            orientation: engine.orientation(),
            area,
            agent_alignment: detect_alignment(&agents, &engine.config().placement.alignment),
            viewport,
            nodes: dumped,
            overlaps,
        }
    }
}

pub fn write_layout_dump(path: &Path, dump: &LayoutDump) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CanvasSelector;

    #[test]
    fn reports_collisions_by_id() {
        let engine = LayoutEngine::default();
        let nodes = vec![
            PositionedNode::new("a", NodeArchetype::Agent, 0.0, 0.0),
            PositionedNode::new("b", NodeArchetype::Agent, 100.0, 0.0),
            PositionedNode::new("c", NodeArchetype::Agent, 600.0, 0.0),
        ];
        let area = engine.resolve_area(CanvasSelector::Primary);
        let dump = LayoutDump::from_nodes(&engine, area, &nodes, None);
        assert_eq!(dump.overlaps, vec![["a".to_string(), "b".to_string()]]);
        assert_eq!(dump.agent_alignment, Alignment::VerticalAligned);
        assert_eq!(dump.nodes[1].width, 250.0);
    }
}
