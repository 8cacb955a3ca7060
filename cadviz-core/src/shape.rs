//! Renderable shapes.
//!
//! Every shape owns its mesh, generated once at construction. Drawing
//! rotates and projects the cached vertices with the frame's shared rotation
//! and submits faces first, then edges, in mesh order. Nothing is depth
//! sorted; what is submitted later paints over what came before.
//!
//! Only a bouncing [`Sphere`] changes after construction: each
//! [`Sphere::step_physics`] moves its centre and regenerates its vertices
//! before the next draw.

use log::debug;
use nalgebra::Point3;

use crate::color::Rgb;
use crate::error::GeometryResult;
use crate::geometry::{sphere_vertices, Edge, Face, Mesh, Vertex};
use crate::lighting;
use crate::physics::{BounceParams, BounceState};
use crate::projection::{Frame, ScreenPoint};
use crate::surface::{DrawCommand, Surface, OPAQUE};

/// Line width for every edge
pub const EDGE_THICKNESS: u32 = 2;

/// Axis colors by edge index: x, y, z
pub const AXIS_COLORS: [Rgb; 3] = [Rgb::RED, Rgb::GREEN, Rgb::BLUE];

/// Floor fill opacity
pub const FLOOR_ALPHA: u8 = 128;

fn project_vertices(mesh: &Mesh, frame: &Frame) -> Vec<ScreenPoint> {
    mesh.vertices.iter().map(|v| frame.project(v)).collect()
}

fn face_points(projected: &[ScreenPoint], face: &Face) -> Vec<ScreenPoint> {
    face.iter().map(|&i| projected[i]).collect()
}

fn draw_faces<S: Surface + ?Sized>(
    projected: &[ScreenPoint],
    faces: &[Face],
    color: Rgb,
    alpha: u8,
    surface: &mut S,
) {
    for face in faces {
        surface.draw_polygon(&face_points(projected, face), color, alpha);
    }
}

fn draw_edges<S: Surface + ?Sized>(
    projected: &[ScreenPoint],
    edges: &[Edge],
    color: Rgb,
    surface: &mut S,
) {
    for &(a, b) in edges {
        surface.draw_line(projected[a], projected[b], color, EDGE_THICKNESS);
    }
}

fn log_built(kind: &str, mesh: &Mesh) {
    debug!(
        "built {kind}: {} vertices, {} edges, {} faces",
        mesh.vertices.len(),
        mesh.edges.len(),
        mesh.faces.len()
    );
}

/// Coordinate axes marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesParams {
    pub center: Vertex,
    pub side_length: f64,
}

impl Default for AxesParams {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            side_length: 10.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Axes {
    params: AxesParams,
    mesh: Mesh,
}

impl Axes {
    pub fn new(params: AxesParams) -> GeometryResult<Self> {
        let mesh = Mesh::axes(&params.center, params.side_length)?;
        log_built("axes", &mesh);
        Ok(Self { params, mesh })
    }

    pub fn params(&self) -> &AxesParams {
        &self.params
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Lines only, colored red/green/blue for x/y/z
    pub fn render<S: Surface + ?Sized>(&self, frame: &Frame, surface: &mut S) {
        let projected = project_vertices(&self.mesh, frame);
        for (&(a, b), color) in self.mesh.edges.iter().zip(AXIS_COLORS) {
            surface.draw_line(projected[a], projected[b], color, EDGE_THICKNESS);
        }
    }
}

/// Translucent ground square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorParams {
    pub center: Vertex,
    pub side_length: f64,
    pub face_color: Rgb,
    pub edge_color: Rgb,
    pub alpha: u8,
}

impl Default for FloorParams {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            side_length: 30.0,
            face_color: Rgb::PASTEL_BLUE,
            edge_color: Rgb::FLOOR,
            alpha: FLOOR_ALPHA,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Floor {
    params: FloorParams,
    mesh: Mesh,
}

impl Floor {
    pub fn new(params: FloorParams) -> GeometryResult<Self> {
        let mesh = Mesh::floor(&params.center, params.side_length)?;
        log_built("floor", &mesh);
        Ok(Self { params, mesh })
    }

    pub fn params(&self) -> &FloorParams {
        &self.params
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn render<S: Surface + ?Sized>(&self, frame: &Frame, surface: &mut S) {
        let projected = project_vertices(&self.mesh, frame);
        draw_faces(
            &projected,
            &self.mesh.faces,
            self.params.face_color,
            self.params.alpha,
            surface,
        );
        draw_edges(&projected, &self.mesh.edges, self.params.edge_color, surface);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeParams {
    pub center: Vertex,
    pub side_length: f64,
    pub edge_color: Rgb,
    pub face_color: Rgb,
}

impl Default for CubeParams {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            side_length: 4.0,
            edge_color: Rgb::BLACK,
            face_color: Rgb::GREY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cube {
    params: CubeParams,
    mesh: Mesh,
}

impl Cube {
    pub fn new(params: CubeParams) -> GeometryResult<Self> {
        let mesh = Mesh::cube(&params.center, params.side_length)?;
        log_built("cube", &mesh);
        Ok(Self { params, mesh })
    }

    pub fn params(&self) -> &CubeParams {
        &self.params
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn render<S: Surface + ?Sized>(&self, frame: &Frame, surface: &mut S) {
        let projected = project_vertices(&self.mesh, frame);
        draw_faces(
            &projected,
            &self.mesh.faces,
            self.params.face_color,
            OPAQUE,
            surface,
        );
        draw_edges(&projected, &self.mesh.edges, self.params.edge_color, surface);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderParams {
    pub center: Vertex,
    pub radius: f64,
    pub height: f64,
    pub segments: usize,
    pub edge_color: Rgb,
    pub face_color: Rgb,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            radius: 2.0,
            height: 5.0,
            segments: 20,
            edge_color: Rgb::BLACK,
            face_color: Rgb::GREY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cylinder {
    params: CylinderParams,
    mesh: Mesh,
}

impl Cylinder {
    pub fn new(params: CylinderParams) -> GeometryResult<Self> {
        let mesh = Mesh::cylinder(
            &params.center,
            params.radius,
            params.height,
            params.segments,
        )?;
        log_built("cylinder", &mesh);
        Ok(Self { params, mesh })
    }

    pub fn params(&self) -> &CylinderParams {
        &self.params
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn render<S: Surface + ?Sized>(&self, frame: &Frame, surface: &mut S) {
        let projected = project_vertices(&self.mesh, frame);
        draw_faces(
            &projected,
            &self.mesh.faces,
            self.params.face_color,
            OPAQUE,
            surface,
        );
        draw_edges(&projected, &self.mesh.edges, self.params.edge_color, surface);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusParams {
    pub center: Vertex,
    pub major_radius: f64,
    pub minor_radius: f64,
    pub segments_u: usize,
    pub segments_v: usize,
    pub edge_color: Rgb,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            major_radius: 5.0,
            minor_radius: 2.0,
            segments_u: 30,
            segments_v: 15,
            edge_color: Rgb::GREY,
        }
    }
}

/// Wireframe-only torus
#[derive(Debug, Clone)]
pub struct Torus {
    params: TorusParams,
    mesh: Mesh,
}

impl Torus {
    pub fn new(params: TorusParams) -> GeometryResult<Self> {
        let mesh = Mesh::torus(
            &params.center,
            params.major_radius,
            params.minor_radius,
            params.segments_u,
            params.segments_v,
        )?;
        log_built("torus", &mesh);
        Ok(Self { params, mesh })
    }

    pub fn params(&self) -> &TorusParams {
        &self.params
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn render<S: Surface + ?Sized>(&self, frame: &Frame, surface: &mut S) {
        let projected = project_vertices(&self.mesh, frame);
        draw_edges(&projected, &self.mesh.edges, self.params.edge_color, surface);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereParams {
    pub center: Vertex,
    pub radius: f64,
    pub segments_lat: usize,
    pub segments_lon: usize,
    pub face_color: Rgb,
    /// `None` keeps the sphere where it was placed
    pub bounce: Option<BounceParams>,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            radius: 1.0,
            segments_lat: 10,
            segments_lon: 20,
            face_color: Rgb::GREY,
            bounce: None,
        }
    }
}

/// Flat-shaded sphere, optionally bouncing on the floor plane
#[derive(Debug, Clone)]
pub struct Sphere {
    params: SphereParams,
    center: Vertex,
    bounce: Option<BounceState>,
    mesh: Mesh,
}

impl Sphere {
    pub fn new(params: SphereParams) -> GeometryResult<Self> {
        let mesh = Mesh::sphere(
            &params.center,
            params.radius,
            params.segments_lat,
            params.segments_lon,
        )?;
        log_built("sphere", &mesh);
        Ok(Self {
            center: params.center,
            bounce: params.bounce.map(BounceState::new),
            params,
            mesh,
        })
    }

    pub fn params(&self) -> &SphereParams {
        &self.params
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Current centre (moves while bouncing)
    pub fn center(&self) -> Vertex {
        self.center
    }

    pub fn bounce(&self) -> Option<&BounceState> {
        self.bounce.as_ref()
    }

    /// Advance the bounce integrator one frame and rebuild the vertices at
    /// the new centre. Static spheres are left untouched.
    ///
    /// Returns true when the sphere hit the floor this frame.
    pub fn step_physics(&mut self) -> bool {
        let Some(bounce) = self.bounce.as_mut() else {
            return false;
        };
        let bounced = bounce.step(&mut self.center, self.params.radius);
        self.mesh.vertices = sphere_vertices(
            &self.center,
            self.params.radius,
            self.params.segments_lat,
            self.params.segments_lon,
        );
        bounced
    }

    /// Faces only, each shaded by the frame's light
    pub fn render<S: Surface + ?Sized>(&self, frame: &Frame, surface: &mut S) {
        let projected = project_vertices(&self.mesh, frame);
        let vertices = &self.mesh.vertices;
        for face in &self.mesh.faces {
            let color = lighting::shade_face(
                self.params.face_color,
                [&vertices[face[0]], &vertices[face[1]], &vertices[face[2]]],
                &frame.rotation,
                &frame.context.light_direction,
            );
            surface.draw_polygon(&face_points(&projected, face), color, OPAQUE);
        }
    }
}

/// Any drawable shape
#[derive(Debug, Clone)]
pub enum Shape {
    Axes(Axes),
    Floor(Floor),
    Cube(Cube),
    Cylinder(Cylinder),
    Torus(Torus),
    Sphere(Sphere),
}

impl Shape {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Axes(_) => "axes",
            Shape::Floor(_) => "floor",
            Shape::Cube(_) => "cube",
            Shape::Cylinder(_) => "cylinder",
            Shape::Torus(_) => "torus",
            Shape::Sphere(_) => "sphere",
        }
    }

    pub fn mesh(&self) -> &Mesh {
        match self {
            Shape::Axes(s) => s.mesh(),
            Shape::Floor(s) => s.mesh(),
            Shape::Cube(s) => s.mesh(),
            Shape::Cylinder(s) => s.mesh(),
            Shape::Torus(s) => s.mesh(),
            Shape::Sphere(s) => s.mesh(),
        }
    }

    /// One physics frame; only bouncing spheres change
    pub fn step_physics(&mut self) -> bool {
        match self {
            Shape::Sphere(sphere) => sphere.step_physics(),
            _ => false,
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, frame: &Frame, surface: &mut S) {
        match self {
            Shape::Axes(s) => s.render(frame, surface),
            Shape::Floor(s) => s.render(frame, surface),
            Shape::Cube(s) => s.render(frame, surface),
            Shape::Cylinder(s) => s.render(frame, surface),
            Shape::Torus(s) => s.render(frame, surface),
            Shape::Sphere(s) => s.render(frame, surface),
        }
    }

    /// Record this shape's draw calls for one frame
    pub fn draw_commands(&self, frame: &Frame) -> Vec<DrawCommand> {
        let mut commands = Vec::new();
        self.render(frame, &mut commands);
        commands
    }
}

macro_rules! impl_from_shape {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(shape: $variant) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

impl_from_shape!(Axes, Floor, Cube, Cylinder, Torus, Sphere);
