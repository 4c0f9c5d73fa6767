/// Example: Render a mesh once without a terminal and list the draw calls
///
/// Usage: cargo run --example render_once -- [path/to/mesh.txt] [--wireframe]
use color_eyre::eyre::{Result, WrapErr};
use meshview_core::{
    parse_mesh, DrawCommand, Mesh, RecordingSurface, RenderMode, Scene, ViewportConfig,
};
use std::{env, fs};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args: Vec<String> = env::args().skip(1).collect();
    let mode = if args.iter().any(|a| a == "--wireframe") {
        RenderMode::Wireframe
    } else {
        RenderMode::Shaded
    };

    let mesh = match args.iter().find(|a| !a.starts_with("--")) {
        Some(path) => {
            let text = fs::read_to_string(path).wrap_err_with(|| format!("failed to read {path}"))?;
            parse_mesh(&text)?
        }
        None => {
            eprintln!("No mesh file provided, using default cube...");
            Mesh::cube(2.0)
        }
    };

    let scene = Scene::new(mesh, ViewportConfig::default(), mode)?;
    let mut surface = RecordingSurface::new();
    scene.render(&mut surface);

    for command in &surface.commands {
        match command {
            DrawCommand::Clear => println!("clear"),
            DrawCommand::Line { from, to, .. } => {
                println!("line    ({:7.2}, {:7.2}) -> ({:7.2}, {:7.2})", from.x, from.y, to.x, to.y)
            }
            DrawCommand::Polygon { points, fill, .. } => {
                let corners: Vec<String> = points
                    .iter()
                    .map(|p| format!("({:.2}, {:.2})", p.x, p.y))
                    .collect();
                println!("polygon blue={:3} {}", fill.blue, corners.join(" "));
            }
            DrawCommand::Marker { center, radius, .. } => {
                println!("marker  ({:7.2}, {:7.2}) r={radius}", center.x, center.y)
            }
        }
    }

    Ok(())
}
