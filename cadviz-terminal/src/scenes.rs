/// Demo scenes selectable from the command line
use cadviz_core::physics::{DEFAULT_DAMPING, DEFAULT_GRAVITY};
use cadviz_core::{
    Axes, AxesParams, BounceParams, CameraState, Cube, CubeParams, Cylinder, CylinderParams,
    Floor, FloorParams, GeometryResult, Rgb, RotationState, Scene, Sphere, SphereParams, Torus,
    TorusParams,
};
use nalgebra::Point3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SceneKind {
    /// Static torus, cylinder and cube
    Showcase,
    /// Two spheres bouncing next to a cube and a torus
    #[default]
    Bounce,
}

/// Knobs shared by every demo scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneOptions {
    pub gravity: f64,
    pub damping: f64,
    pub floor: bool,
    pub axes: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            damping: DEFAULT_DAMPING,
            floor: true,
            axes: true,
        }
    }
}

impl SceneOptions {
    fn bounce(&self) -> BounceParams {
        BounceParams {
            gravity: self.gravity,
            damping: self.damping,
            ..Default::default()
        }
    }

    fn apply(&self, scene: &mut Scene) {
        if !self.floor {
            scene.set_floor(None);
        }
        if !self.axes {
            scene.set_axes(None);
        }
    }
}

impl SceneKind {
    pub fn build(self, options: &SceneOptions) -> GeometryResult<Scene> {
        let mut scene = match self {
            SceneKind::Showcase => showcase()?,
            SceneKind::Bounce => bounce(options)?,
        };
        options.apply(&mut scene);
        Ok(scene)
    }

    /// Starting camera for the scene
    pub fn camera(self) -> CameraState {
        match self {
            SceneKind::Showcase => CameraState::new(RotationState::zero(), 20.0),
            SceneKind::Bounce => CameraState::default(),
        }
    }
}

fn showcase() -> GeometryResult<Scene> {
    let mut scene = Scene::new()
        .with_floor(Floor::new(FloorParams::default())?)
        .with_axes(Axes::new(AxesParams::default())?);

    scene
        .add(Torus::new(TorusParams {
            center: Point3::new(0.0, 0.0, 10.0),
            edge_color: Rgb::PASTEL_RED,
            ..Default::default()
        })?)
        .add(Cylinder::new(CylinderParams {
            center: Point3::new(0.0, 0.0, -10.0),
            edge_color: Rgb::new(10, 128, 95),
            ..Default::default()
        })?)
        .add(Cube::new(CubeParams {
            center: Point3::new(0.0, 10.0, 0.0),
            face_color: Rgb::PASTEL_ORANGE,
            ..Default::default()
        })?);
    Ok(scene)
}

fn bounce(options: &SceneOptions) -> GeometryResult<Scene> {
    let mut scene = Scene::with_background()?;

    scene
        .add(Sphere::new(SphereParams {
            center: Point3::new(0.0, 30.0, 0.0),
            bounce: Some(options.bounce()),
            ..Default::default()
        })?)
        .add(Sphere::new(SphereParams {
            center: Point3::new(10.0, 20.0, 0.0),
            radius: 2.0,
            face_color: Rgb::RED,
            bounce: Some(options.bounce()),
            ..Default::default()
        })?)
        .add(Cube::new(CubeParams {
            center: Point3::new(10.0, 4.0, 10.0),
            ..Default::default()
        })?)
        .add(Torus::new(TorusParams {
            center: Point3::new(20.0, 30.0, 4.0),
            ..Default::default()
        })?);
    Ok(scene)
}
