use crate::config::load_config;
use crate::ir::{NodeArchetype, Orientation, Point};
use crate::layout::{CanvasSelector, LayoutEngine};
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::scene::{Scene, load_scene, parse_archetype, parse_orientation, parse_selector};
use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "crewl", version, about = "Layout engine for crew canvases")]
pub struct Args {
    /// Scene file (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Layout config file (JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas to lay out: primary, secondary or full
    #[arg(short = 's', long = "canvas", value_parser = parse_selector, default_value = "primary")]
    pub canvas: CanvasSelector,

    /// Override the scene's orientation (vertical or horizontal)
    #[arg(long = "orientation", value_parser = parse_orientation)]
    pub orientation: Option<Orientation>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the drawing rectangle left by the chrome
    Area,
    /// Print the position of the next node of an archetype
    Place {
        #[arg(value_parser = parse_archetype)]
        archetype: NodeArchetype,
    },
    /// Relayout every node for the current orientation
    Reorganize,
    /// Print the camera transform framing all nodes
    Fit,
    /// Flip the orientation, relayout and frame the result
    Toggle,
    /// Write a diagnostic report of the scene
    Dump,
}

#[derive(Debug, Serialize)]
struct Placed {
    archetype: NodeArchetype,
    position: Point,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let scene = load_scene(args.input.as_deref())?;
    let mut engine = LayoutEngine::with_chrome(config, scene.chrome);
    if let Some(orientation) = args.orientation {
        engine.set_orientation(orientation);
    }
    let selector = args.canvas;

    let json = match args.command {
        Command::Area => serde_json::to_string_pretty(&engine.resolve_area(selector))?,
        Command::Place { archetype } => {
            let position = engine.place_next(&scene.nodes, archetype, selector);
            serde_json::to_string_pretty(&Placed {
                archetype,
                position,
            })?
        }
        Command::Reorganize => {
            let nodes = engine.reorganize(&scene.nodes, &scene.edges, selector);
            Scene {
                chrome: *engine.chrome(),
                nodes,
                edges: scene.edges,
            }
            .to_json()?
        }
        Command::Fit => serde_json::to_string_pretty(&engine.fit_nodes(&scene.nodes, selector))?,
        Command::Toggle => {
            let relayout = engine.toggle_orientation(&scene.nodes, &scene.edges, selector);
            serde_json::to_string_pretty(&relayout)?
        }
        Command::Dump => {
            let area = engine.resolve_area(selector);
            let viewport = engine.fit_nodes(&scene.nodes, selector);
            let dump = LayoutDump::from_nodes(&engine, area, &scene.nodes, viewport);
            if let Some(path) = args.output.as_deref() {
                return write_layout_dump(path, &dump);
            }
            serde_json::to_string_pretty(&dump)?
        }
    };

    write_output(&json, args.output.as_deref())
}

fn write_output(json: &str, path: Option<&Path>) -> Result<()> {
    if let Some(path) = path {
        std::fs::write(path, json)?;
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    stdout.write_all(json.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}
