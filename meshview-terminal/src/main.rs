/// Meshview Terminal - interactive mesh viewer
///
/// Loads a mesh description (or a built-in cube) and renders it in the
/// terminal. Controls:
///   - Left mouse drag: Rotate the mesh
///   - M: Toggle wireframe / shaded
///   - Q/ESC: Quit
use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use meshview_core::{interaction::DEFAULT_DRAG_THRESHOLD, parse_mesh, Mesh, RenderMode};
use meshview_terminal::TerminalApp;
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing_subscriber::EnvFilter;

/// Interactive wireframe and flat-shaded mesh viewer for the terminal
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Mesh description: a `numVertices,numFaces` header, then `id,x,y,z`
    /// vertex lines, then comma-separated face lines. Defaults to a cube.
    mesh: Option<PathBuf>,

    /// How faces are drawn
    #[arg(long, value_enum, default_value_t = Mode::Shaded, env = "MESHVIEW_MODE")]
    mode: Mode,

    /// Drag samples moving this many pixels or more on either axis are ignored
    #[arg(long, default_value_t = DEFAULT_DRAG_THRESHOLD)]
    drag_threshold: f64,

    /// Write logs here instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Wireframe,
    Shaded,
}

impl From<Mode> for RenderMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Wireframe => RenderMode::Wireframe,
            Mode::Shaded => RenderMode::Shaded,
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn load_mesh(path: &Path) -> Result<Mesh> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let mesh =
        parse_mesh(&text).wrap_err_with(|| format!("failed to parse {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        vertices = mesh.vertices().len(),
        faces = mesh.faces().len(),
        "loaded mesh"
    );
    Ok(mesh)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let mesh = match &args.mesh {
        Some(path) => load_mesh(path)?,
        None => Mesh::cube(2.0),
    };

    let mut app = TerminalApp::new(mesh, args.mode.into(), args.drag_threshold)?;
    app.run()
}
