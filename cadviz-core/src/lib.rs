/// cadviz core library - geometry, projection and bounce physics
///
/// This library holds everything that does not touch a window or terminal:
/// the rotation and perspective kernel, procedural meshes for the primitive
/// shapes, flat lighting, the bounce integrator, and scene composition.
/// Hosts supply a camera each frame and a draw surface to render onto.

pub mod color;
pub mod error;
pub mod geometry;
pub mod lighting;
pub mod physics;
pub mod projection;
pub mod scene;
pub mod shape;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use color::Rgb;
pub use error::{GeometryError, GeometryResult};
pub use geometry::{Mesh, Vertex};
pub use physics::{BounceParams, BounceState};
pub use projection::{CameraState, Frame, RenderContext, ScreenPoint, Viewport};
pub use scene::Scene;
pub use shape::{
    Axes, AxesParams, Cube, CubeParams, Cylinder, CylinderParams, Floor, FloorParams, Shape,
    Sphere, SphereParams, Torus, TorusParams,
};
pub use surface::{DrawCommand, Surface};
pub use transform::{RotationState, Transform};
