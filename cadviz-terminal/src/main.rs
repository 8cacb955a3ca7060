/// cadviz terminal demo
///
/// Renders a demo scene on a character grid.
/// Controls:
///   - WASD / Arrow Keys / mouse drag: Rotate the view
///   - Z/C: Roll rotation
///   - +/- / mouse wheel: Zoom
///   - I: Isometric view, R: Reset rotation, P: Pause physics
///   - Q/ESC: Quit
use anyhow::Result;
use cadviz_terminal::{AppSettings, ColorMode, SceneKind, SceneOptions, TerminalApp};
use clap::Parser;
use log::info;

#[derive(Parser)]
#[command(name = "cadviz-terminal", about = "Wireframe and solid shapes in the terminal")]
struct Args {
    /// Demo scene to load
    #[arg(long, value_enum, default_value_t = SceneKind::Bounce)]
    scene: SceneKind,

    /// Target frame rate
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Projection field of view
    #[arg(long, default_value = "256")]
    fov: f64,

    /// Initial viewer distance (defaults to the scene's own)
    #[arg(long)]
    viewer_distance: Option<f64>,

    /// Downward acceleration for bouncing spheres
    #[arg(long, default_value = "0.5")]
    gravity: f64,

    /// Fraction of speed kept after each bounce
    #[arg(long, default_value = "0.7")]
    damping: f64,

    /// Hide the floor
    #[arg(long)]
    no_floor: bool,

    /// Hide the axes
    #[arg(long)]
    no_axes: bool,

    /// Plain characters instead of 24-bit color
    #[arg(long)]
    ascii: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let options = SceneOptions {
        gravity: args.gravity,
        damping: args.damping,
        floor: !args.no_floor,
        axes: !args.no_axes,
    };
    let scene = args.scene.build(&options)?;

    let mut camera = args.scene.camera();
    if let Some(distance) = args.viewer_distance {
        camera.viewer_distance = distance;
    }

    let settings = AppSettings {
        camera,
        fps: args.fps,
        fov: args.fov,
        color_mode: if args.ascii {
            ColorMode::Ascii
        } else {
            ColorMode::TrueColor
        },
    };
    info!(
        "scene {:?}: {} shapes, fov {}, viewer distance {}",
        args.scene,
        scene.shapes().len(),
        settings.fov,
        camera.viewer_distance
    );

    let mut app = TerminalApp::new(scene, settings)?;
    app.run()?;
    Ok(())
}
