use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    /// Agents in a row, tasks below them.
    #[default]
    Vertical,
    /// Agents in a column, tasks to their right.
    Horizontal,
}

impl Orientation {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "vertical" | "TD" | "TB" => Some(Self::Vertical),
            "horizontal" | "LR" => Some(Self::Horizontal),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeArchetype {
    Agent,
    Manager,
    Task,
    FlowStep,
    Other,
}

impl NodeArchetype {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "agent" => Some(Self::Agent),
            "manager" => Some(Self::Manager),
            "task" => Some(Self::Task),
            "flowStep" | "flow-step" | "flow" => Some(Self::FlowStep),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    pub id: String,
    pub archetype: NodeArchetype,
    pub position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// Explicit sequence index, only meaningful for flow steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl PositionedNode {
    pub fn new(id: impl Into<String>, archetype: NodeArchetype, x: f32, y: f32) -> Self {
        Self {
            id: id.into(),
            archetype,
            position: Point::new(x, y),
            width: None,
            height: None,
            order: None,
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub source_handle: Option<String>,
    #[serde(default)]
    pub target_handle: Option<String>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }
}
