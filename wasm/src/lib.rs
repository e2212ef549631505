use crew_layout::scene::{parse_archetype, parse_orientation, parse_selector};
use crew_layout::{CanvasSelector, LayoutConfig, LayoutEngine, Scene, parse_config};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CrewLayoutOptions {
    canvas: Option<String>,
    orientation: Option<String>,
    /// JSON5 layout config, same shape as the CLI's config file.
    config: Option<String>,
}

struct Request {
    engine: LayoutEngine,
    selector: CanvasSelector,
    scene: Scene,
}

fn build_request(scene_json: &str, options_json: Option<&str>) -> Result<Request, String> {
    let options = match options_json {
        Some(raw) => serde_json::from_str::<CrewLayoutOptions>(raw).map_err(|e| e.to_string())?,
        None => CrewLayoutOptions::default(),
    };
    let scene = Scene::from_json(scene_json).map_err(|e| e.to_string())?;
    let config = match options.config.as_deref() {
        Some(raw) => parse_config(raw).map_err(|e| e.to_string())?,
        None => LayoutConfig::default(),
    };
    let selector = match options.canvas.as_deref() {
        Some(token) => parse_selector(token).map_err(|e| e.to_string())?,
        None => CanvasSelector::Primary,
    };
    let mut engine = LayoutEngine::with_chrome(config, scene.chrome);
    if let Some(token) = options.orientation.as_deref() {
        engine.set_orientation(parse_orientation(token).map_err(|e| e.to_string())?);
    }
    Ok(Request {
        engine,
        selector,
        scene,
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn area_json(scene_json: &str, options_json: Option<&str>) -> Result<String, String> {
    let request = build_request(scene_json, options_json)?;
    to_json(&request.engine.resolve_area(request.selector))
}

fn place_json(scene_json: &str, archetype: &str, options_json: Option<&str>) -> Result<String, String> {
    let request = build_request(scene_json, options_json)?;
    let archetype = parse_archetype(archetype).map_err(|e| e.to_string())?;
    let position = request
        .engine
        .place_next(&request.scene.nodes, archetype, request.selector);
    to_json(&position)
}

fn reorganize_json(scene_json: &str, options_json: Option<&str>) -> Result<String, String> {
    let request = build_request(scene_json, options_json)?;
    let nodes = request
        .engine
        .reorganize(&request.scene.nodes, &request.scene.edges, request.selector);
    to_json(&nodes)
}

fn fit_json(scene_json: &str, options_json: Option<&str>) -> Result<String, String> {
    let request = build_request(scene_json, options_json)?;
    to_json(&request.engine.fit_nodes(&request.scene.nodes, request.selector))
}

fn toggle_json(scene_json: &str, options_json: Option<&str>) -> Result<String, String> {
    let mut request = build_request(scene_json, options_json)?;
    let relayout = request.engine.toggle_orientation(
        &request.scene.nodes,
        &request.scene.edges,
        request.selector,
    );
    to_json(&relayout)
}

#[wasm_bindgen]
pub fn resolve_area(scene_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    area_json(scene_json, options_json.as_deref()).map_err(|error| JsValue::from_str(&error))
}

#[wasm_bindgen]
pub fn place_next(
    scene_json: &str,
    archetype: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    place_json(scene_json, archetype, options_json.as_deref())
        .map_err(|error| JsValue::from_str(&error))
}

#[wasm_bindgen]
pub fn reorganize(scene_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    reorganize_json(scene_json, options_json.as_deref()).map_err(|error| JsValue::from_str(&error))
}

#[wasm_bindgen]
pub fn fit_viewport(scene_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    fit_json(scene_json, options_json.as_deref()).map_err(|error| JsValue::from_str(&error))
}

#[wasm_bindgen]
pub fn toggle_orientation(scene_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    toggle_json(scene_json, options_json.as_deref()).map_err(|error| JsValue::from_str(&error))
}

#[cfg(test)]
mod tests {
    use crate::{area_json, fit_json, place_json, reorganize_json, toggle_json};
    use crew_layout::{Point, PositionedNode, Rect, Relayout};

    const CREW: &str = r#"{
        "chrome": { "orientation": "vertical" },
        "nodes": [
            { "id": "a0", "archetype": "agent", "position": { "x": 0, "y": 0 } },
            { "id": "a1", "archetype": "agent", "position": { "x": 0, "y": 0 } },
            { "id": "t0", "archetype": "task", "position": { "x": 0, "y": 0 } }
        ],
        "edges": [{ "source": "a0", "target": "t0" }]
    }"#;

    #[test]
    fn resolves_area_with_default_chrome() {
        let area: Rect = serde_json::from_str(&area_json("{}", None).unwrap()).unwrap();
        assert_eq!(area, Rect::new(300.0, 84.0, 1600.0, 976.0));
    }

    #[test]
    fn places_first_agent_at_anchor() {
        let json = place_json("{}", "agent", Some(r#"{ "canvas": "full" }"#)).unwrap();
        let point: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(point, Point::new(320.0, 104.0));
    }

    #[test]
    fn reorganize_and_toggle_keep_every_node() {
        let nodes: Vec<PositionedNode> =
            serde_json::from_str(&reorganize_json(CREW, None).unwrap()).unwrap();
        assert_eq!(nodes.len(), 3);

        let relayout: Relayout = serde_json::from_str(&toggle_json(CREW, None).unwrap()).unwrap();
        assert_eq!(relayout.nodes.len(), 3);
        assert!(relayout.viewport.is_some());
    }

    #[test]
    fn fit_is_null_for_empty_scene() {
        assert_eq!(fit_json("{}", None).unwrap(), "null");
    }

    #[test]
    fn rejects_bad_options() {
        assert!(area_json("{}", Some(r#"{ "canvas": "left" }"#)).is_err());
        assert!(place_json("{}", "crew", None).is_err());
        assert!(area_json("{}", Some(r#"{ "config": "{ placement: " }"#)).is_err());
    }
}
