/// Example: a row of spheres dropped from the same height, each losing a
/// different share of its speed per bounce
///
/// Usage: cargo run --example bouncing_balls
use cadviz_core::{BounceParams, CameraState, Rgb, Scene, Sphere, SphereParams};
use cadviz_terminal::{AppSettings, TerminalApp};
use nalgebra::Point3;

const PALETTE: [Rgb; 5] = [
    Rgb::PASTEL_RED,
    Rgb::PASTEL_ORANGE,
    Rgb::PASTEL_YELLOW,
    Rgb::PASTEL_GREEN,
    Rgb::PASTEL_BLUE,
];

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut scene = Scene::with_background()?;
    for (i, color) in PALETTE.into_iter().enumerate() {
        scene.add(Sphere::new(SphereParams {
            center: Point3::new(-16.0 + 8.0 * i as f64, 25.0, 0.0),
            radius: 1.5,
            face_color: color,
            bounce: Some(BounceParams {
                damping: 0.5 + 0.1 * i as f64,
                ..Default::default()
            }),
            ..Default::default()
        })?);
    }

    let settings = AppSettings {
        camera: CameraState::isometric(),
        ..Default::default()
    };
    let mut app = TerminalApp::new(scene, settings)?;
    app.run()?;
    Ok(())
}
