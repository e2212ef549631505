//! JSON documents exchanged with the host: a scene is the chrome snapshot
//! plus the node and edge collections the host owns.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chrome::ChromeState;
use crate::ir::{Edge, NodeArchetype, Orientation, PositionedNode};
use crate::layout::CanvasSelector;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown canvas selector `{0}` (expected primary, secondary or full)")]
    UnknownSelector(String),
    #[error("unknown node archetype `{0}`")]
    UnknownArchetype(String),
    #[error("unknown orientation `{0}` (expected vertical or horizontal)")]
    UnknownOrientation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    #[serde(default)]
    pub chrome: ChromeState,
    #[serde(default)]
    pub nodes: Vec<PositionedNode>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Scene {
    pub fn from_json(input: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Reads a scene from `path`, or from stdin for `None` and `-`.
pub fn load_scene(path: Option<&Path>) -> Result<Scene, SceneError> {
    let input = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Scene::from_json(&input)
}

pub fn parse_selector(token: &str) -> Result<CanvasSelector, SceneError> {
    CanvasSelector::from_token(token).ok_or_else(|| SceneError::UnknownSelector(token.to_string()))
}

pub fn parse_archetype(token: &str) -> Result<NodeArchetype, SceneError> {
    NodeArchetype::from_token(token).ok_or_else(|| SceneError::UnknownArchetype(token.to_string()))
}

pub fn parse_orientation(token: &str) -> Result<Orientation, SceneError> {
    Orientation::from_token(token)
        .ok_or_else(|| SceneError::UnknownOrientation(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sparse_scene() {
        let scene = Scene::from_json(
            r#"{
                "chrome": { "orientation": "horizontal" },
                "nodes": [{ "id": "a", "archetype": "agent", "position": { "x": 0, "y": 0 } }]
            }"#,
        )
        .unwrap();
        assert_eq!(scene.chrome.orientation, Orientation::Horizontal);
        assert_eq!(scene.nodes.len(), 1);
        assert!(scene.edges.is_empty());
    }

    #[test]
    fn scene_round_trips_through_json() {
        let scene = Scene {
            nodes: vec![PositionedNode::new("t", NodeArchetype::Task, 5.0, 6.0)],
            edges: vec![Edge::new("a", "t")],
            ..Scene::default()
        };
        let json = scene.to_json().unwrap();
        assert_eq!(Scene::from_json(&json).unwrap(), scene);
    }

    #[test]
    fn reports_bad_tokens() {
        assert!(matches!(parse_selector("left"), Err(SceneError::UnknownSelector(_))));
        assert!(parse_archetype("task").is_ok());
        let err = parse_orientation("sideways").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown orientation `sideways` (expected vertical or horizontal)"
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(Scene::from_json("{ nodes: "), Err(SceneError::Json(_))));
    }
}
