pub mod chrome;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod scene;

pub use chrome::{ChromeState, ChromeUpdate, DockSide};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{LayoutConfig, load_config, parse_config};
pub use ir::{Edge, NodeArchetype, Orientation, Point, PositionedNode, Size};
pub use layout::{CanvasSelector, LayoutEngine, Rect, Relayout, Viewport};
pub use scene::{Scene, SceneError};
