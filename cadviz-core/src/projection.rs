/// Camera state and perspective projection
use log::trace;
use nalgebra::{Matrix3, Point3, Vector3};

use crate::transform::{RotationState, Transform};

/// Default perspective numerator
pub const DEFAULT_FOV: f64 = 256.0;

/// Default viewer distance
pub const DEFAULT_VIEWER_DISTANCE: f64 = 60.0;

/// Smallest magnitude the perspective denominator is allowed to reach
pub const MIN_DEPTH: f64 = 1e-6;

/// Radians of rotation per unit of pointer drag
pub const DRAG_SENSITIVITY: f64 = 0.01;

/// Integer screen coordinate (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Output surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Perspective-divide a (rotated) point onto this viewport.
    ///
    /// The denominator `viewer_distance + z` is clamped to at least
    /// [`MIN_DEPTH`] in magnitude, keeping its sign, so a point sitting exactly
    /// on the camera plane lands far off screen instead of producing a NaN.
    pub fn project(&self, point: &Point3<f64>, fov: f64, viewer_distance: f64) -> ScreenPoint {
        let mut depth = viewer_distance + point.z;
        if depth.abs() < MIN_DEPTH {
            trace!("clamping projection depth {depth} for point {point}");
            depth = MIN_DEPTH.copysign(depth);
        }

        let factor = fov / depth;
        let x = point.x * factor + self.width as f64 / 2.0;
        let y = -point.y * factor + self.height as f64 / 2.0;
        ScreenPoint::new(x.round() as i32, y.round() as i32)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200, 800)
    }
}

/// Host-owned rendering context threaded into every render call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    pub viewport: Viewport,
    pub fov: f64,
    /// Fixed world-space light direction; not rotated with the camera
    pub light_direction: Vector3<f64>,
}

impl RenderContext {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            fov: DEFAULT_FOV,
            light_direction: Vector3::new(-50.0, 50.0, 50.0),
        }
    }
}

/// Camera parameters supplied by the host every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub rotation: RotationState,
    pub viewer_distance: f64,
}

impl CameraState {
    pub fn new(rotation: RotationState, viewer_distance: f64) -> Self {
        Self {
            rotation,
            viewer_distance,
        }
    }

    /// Isometric preset: 60 units away, tilted -35.26° about x and 45° about y
    pub fn isometric() -> Self {
        Self::new(
            RotationState::new((-35.26f64).to_radians(), 45f64.to_radians(), 0.0),
            DEFAULT_VIEWER_DISTANCE,
        )
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.rotation.rotate(dx, dy, dz);
    }

    /// Apply a pointer drag; vertical motion tilts about x, horizontal about y
    pub fn drag(&mut self, dx: f64, dy: f64) {
        self.rotation
            .rotate(dy * DRAG_SENSITIVITY, dx * DRAG_SENSITIVITY, 0.0);
    }

    /// Move the viewer by `steps` units (positive moves away)
    pub fn zoom(&mut self, steps: f64) {
        self.viewer_distance += steps;
    }

    /// Front view; the viewer distance is kept
    pub fn reset_rotation(&mut self) {
        self.rotation = RotationState::zero();
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(RotationState::zero(), DEFAULT_VIEWER_DISTANCE)
    }
}

/// Everything a shape needs to draw itself for one frame.
///
/// Built once per frame so the rotation matrix is shared by every shape.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub rotation: Matrix3<f64>,
    pub viewer_distance: f64,
    pub context: RenderContext,
}

impl Frame {
    pub fn new(camera: &CameraState, context: &RenderContext) -> Self {
        Self {
            rotation: Transform::rotation_matrix(&camera.rotation),
            viewer_distance: camera.viewer_distance,
            context: *context,
        }
    }

    /// Rotate then project a world-space vertex
    pub fn project(&self, vertex: &Point3<f64>) -> ScreenPoint {
        let rotated = Transform::apply_rotation(vertex, &self.rotation);
        self.context
            .viewport
            .project(&rotated, self.context.fov, self.viewer_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_projects_to_center() {
        let viewport = Viewport::new(800, 600);
        let p = viewport.project(&Point3::origin(), DEFAULT_FOV, 60.0);
        assert_eq!(p, ScreenPoint::new(400, 300));
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let viewport = Viewport::new(800, 600);
        let up = viewport.project(&Point3::new(0.0, 1.0, 0.0), DEFAULT_FOV, 64.0);
        let right = viewport.project(&Point3::new(1.0, 0.0, 0.0), DEFAULT_FOV, 64.0);
        assert_eq!(up, ScreenPoint::new(400, 296));
        assert_eq!(right, ScreenPoint::new(404, 300));
    }

    #[test]
    fn test_degenerate_depth_is_clamped() {
        let viewport = Viewport::new(800, 600);
        // viewer_distance + z == 0
        let p = viewport.project(&Point3::new(1.0, 1.0, -20.0), DEFAULT_FOV, 20.0);
        assert!(p.x > 400);
        assert!(p.y < 300);

        // the origin on the camera plane stays at the centre
        let p = viewport.project(&Point3::new(0.0, 0.0, -20.0), DEFAULT_FOV, 20.0);
        assert_eq!(p, ScreenPoint::new(400, 300));
    }

    #[test]
    fn test_negative_depth_keeps_sign() {
        let viewport = Viewport::new(800, 600);
        let p = viewport.project(&Point3::new(1.0, 0.0, -20.0 - 1e-9), DEFAULT_FOV, 20.0);
        assert!(p.x < 400);
    }

    #[test]
    fn test_camera_controls() {
        let mut camera = CameraState::default();
        assert_eq!(camera.viewer_distance, DEFAULT_VIEWER_DISTANCE);

        camera.drag(10.0, -20.0);
        assert!((camera.rotation.x + 0.2).abs() < 1e-12);
        assert!((camera.rotation.y - 0.1).abs() < 1e-12);
        assert_eq!(camera.rotation.z, 0.0);

        camera.zoom(-5.0);
        assert_eq!(camera.viewer_distance, 55.0);

        camera.reset_rotation();
        assert_eq!(camera.rotation, RotationState::zero());
        assert_eq!(camera.viewer_distance, 55.0);
    }

    #[test]
    fn test_isometric_preset() {
        let camera = CameraState::isometric();
        assert_eq!(camera.viewer_distance, 60.0);
        assert!((camera.rotation.x.to_degrees() + 35.26).abs() < 1e-9);
        assert!((camera.rotation.y.to_degrees() - 45.0).abs() < 1e-9);
        assert_eq!(camera.rotation.z, 0.0);
    }

    #[test]
    fn test_frame_shares_rotation() {
        let camera = CameraState::new(RotationState::new(0.0, 0.0, 0.0), 20.0);
        let context = RenderContext::new(Viewport::new(800, 600));
        let frame = Frame::new(&camera, &context);
        assert_eq!(frame.rotation, Matrix3::identity());
        assert_eq!(frame.project(&Point3::origin()), ScreenPoint::new(400, 300));
    }
}
