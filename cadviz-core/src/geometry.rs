/// Indexed meshes and the procedural generators for every primitive
use std::collections::HashSet;
use std::f64::consts::PI;

use nalgebra::Point3;

use crate::error::{GeometryError, GeometryResult};

/// A vertex in world space
pub type Vertex = Point3<f64>;

/// Pair of vertex indices drawn as a line
pub type Edge = (usize, usize);

/// Ordered vertex indices of a filled polygon; winding defines the normal
pub type Face = Vec<usize>;

/// Vertices plus the index lists that reference them
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, edges: Vec<Edge>, faces: Vec<Face>) -> Self {
        Self {
            vertices,
            edges,
            faces,
        }
    }

    /// Number of distinct undirected edges
    pub fn unique_edge_count(&self) -> usize {
        self.edges
            .iter()
            .map(|&(a, b)| (a.min(b), a.max(b)))
            .collect::<HashSet<_>>()
            .len()
    }

    /// True when every edge and face references an existing vertex
    pub fn indices_in_bounds(&self) -> bool {
        let n = self.vertices.len();
        self.edges.iter().all(|&(a, b)| a < n && b < n)
            && self.faces.iter().flatten().all(|&i| i < n)
    }

    /// Three coordinate axes from `center`: origin/tip pairs along +x, +y, +z
    pub fn axes(center: &Vertex, side_length: f64) -> GeometryResult<Self> {
        check_center("axes", center)?;
        check_dimension("axes", "side_length", side_length)?;

        let tip = |dx: f64, dy: f64, dz: f64| {
            Point3::new(center.x + dx, center.y + dy, center.z + dz)
        };
        let vertices = vec![
            *center,
            tip(side_length, 0.0, 0.0),
            *center,
            tip(0.0, side_length, 0.0),
            *center,
            tip(0.0, 0.0, side_length),
        ];

        Ok(Self::new(vertices, vec![(0, 1), (2, 3), (4, 5)], Vec::new()))
    }

    /// Horizontal square on the x-z plane at `center.y`
    pub fn floor(center: &Vertex, side_length: f64) -> GeometryResult<Self> {
        check_center("floor", center)?;
        check_dimension("floor", "side_length", side_length)?;

        let half = side_length / 2.0;
        let vertices = vec![
            Point3::new(center.x - half, center.y, center.z - half),
            Point3::new(center.x + half, center.y, center.z - half),
            Point3::new(center.x + half, center.y, center.z + half),
            Point3::new(center.x - half, center.y, center.z + half),
        ];
        let edges = vec![(0, 1), (1, 2), (2, 3), (3, 0)];

        Ok(Self::new(vertices, edges, vec![vec![0, 1, 2, 3]]))
    }

    /// Axis-aligned cube.
    ///
    /// Vertex order is fixed: 0..4 is the `-z` square counter-clockwise from
    /// `(-,-)`, 4..8 the same square at `+z`.
    pub fn cube(center: &Vertex, side_length: f64) -> GeometryResult<Self> {
        check_center("cube", center)?;
        check_dimension("cube", "side_length", side_length)?;

        let h = side_length / 2.0;
        let (cx, cy, cz) = (center.x, center.y, center.z);
        let vertices = vec![
            Point3::new(cx - h, cy - h, cz - h),
            Point3::new(cx + h, cy - h, cz - h),
            Point3::new(cx + h, cy + h, cz - h),
            Point3::new(cx - h, cy + h, cz - h),
            Point3::new(cx - h, cy - h, cz + h),
            Point3::new(cx + h, cy - h, cz + h),
            Point3::new(cx + h, cy + h, cz + h),
            Point3::new(cx - h, cy + h, cz + h),
        ];

        let edges = vec![
            // Front
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            // Back
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            // Connecting
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ];

        let faces = vec![
            vec![0, 1, 2, 3], // front
            vec![4, 5, 6, 7], // back
            vec![0, 1, 5, 4], // bottom
            vec![2, 3, 7, 6], // top
            vec![0, 3, 7, 4], // left
            vec![1, 2, 6, 5], // right
        ];

        Ok(Self::new(vertices, edges, faces))
    }

    /// Cylinder whose rings lie in the x-y plane, rising `height` along +z.
    ///
    /// Vertices are interleaved: `2i` on the bottom ring, `2i + 1` above it.
    pub fn cylinder(
        center: &Vertex,
        radius: f64,
        height: f64,
        segments: usize,
    ) -> GeometryResult<Self> {
        check_center("cylinder", center)?;
        check_dimension("cylinder", "radius", radius)?;
        check_dimension("cylinder", "height", height)?;
        check_segments("cylinder", "segments", segments, 3)?;

        let mut vertices = Vec::with_capacity(segments * 2);
        for i in 0..segments {
            let angle = 2.0 * PI * i as f64 / segments as f64;
            let x = center.x + radius * angle.cos();
            let y = center.y + radius * angle.sin();
            vertices.push(Point3::new(x, y, center.z));
            vertices.push(Point3::new(x, y, center.z + height));
        }

        let mut edges = Vec::with_capacity(segments * 3);
        edges.extend((0..segments).map(|i| (i * 2, ((i + 1) % segments) * 2)));
        edges.extend((0..segments).map(|i| (i * 2 + 1, ((i + 1) % segments) * 2 + 1)));
        edges.extend((0..segments).map(|i| (i * 2, i * 2 + 1)));

        let mut faces: Vec<Face> = Vec::with_capacity(segments + 2);
        faces.push((0..segments).map(|i| i * 2 + 1).collect());
        faces.push((0..segments).map(|i| i * 2).collect());
        for i in 0..segments {
            let next = (i + 1) % segments;
            faces.push(vec![i * 2, next * 2, next * 2 + 1, i * 2 + 1]);
        }

        Ok(Self::new(vertices, edges, faces))
    }

    /// Wireframe torus around the z axis.
    ///
    /// `major_radius` is the distance from the centre to the middle of the
    /// tube, `minor_radius` the tube radius. Vertex `i * segments_v + j`
    /// sits at step `i` around the hole and step `j` around the tube.
    pub fn torus(
        center: &Vertex,
        major_radius: f64,
        minor_radius: f64,
        segments_u: usize,
        segments_v: usize,
    ) -> GeometryResult<Self> {
        check_center("torus", center)?;
        check_dimension("torus", "major_radius", major_radius)?;
        check_dimension("torus", "minor_radius", minor_radius)?;
        check_segments("torus", "segments_u", segments_u, 3)?;
        check_segments("torus", "segments_v", segments_v, 3)?;

        let mut vertices = Vec::with_capacity(segments_u * segments_v);
        for i in 0..segments_u {
            let u = 2.0 * PI * i as f64 / segments_u as f64;
            for j in 0..segments_v {
                let v = 2.0 * PI * j as f64 / segments_v as f64;
                let ring = major_radius + minor_radius * v.cos();
                vertices.push(Point3::new(
                    center.x + ring * u.cos(),
                    center.y + ring * u.sin(),
                    center.z + minor_radius * v.sin(),
                ));
            }
        }

        let mut edges = Vec::with_capacity(segments_u * segments_v * 2);
        for i in 0..segments_u {
            for j in 0..segments_v {
                let current = i * segments_v + j;
                edges.push((current, ((i + 1) % segments_u) * segments_v + j));
                edges.push((current, i * segments_v + (j + 1) % segments_v));
            }
        }

        Ok(Self::new(vertices, edges, Vec::new()))
    }

    /// UV sphere with the poles on the y axis.
    ///
    /// Faces are quads between neighbouring latitude rings; the quads
    /// touching a pole collapse to triangles and are kept as they are.
    pub fn sphere(
        center: &Vertex,
        radius: f64,
        segments_lat: usize,
        segments_lon: usize,
    ) -> GeometryResult<Self> {
        check_center("sphere", center)?;
        check_dimension("sphere", "radius", radius)?;
        check_segments("sphere", "segments_lat", segments_lat, 2)?;
        check_segments("sphere", "segments_lon", segments_lon, 3)?;

        let vertices = sphere_vertices(center, radius, segments_lat, segments_lon);

        let mut faces = Vec::with_capacity(segments_lat * segments_lon);
        for i in 0..segments_lat {
            for j in 0..segments_lon {
                let next_j = (j + 1) % segments_lon;
                faces.push(vec![
                    i * segments_lon + j,
                    i * segments_lon + next_j,
                    (i + 1) * segments_lon + next_j,
                    (i + 1) * segments_lon + j,
                ]);
            }
        }

        Ok(Self::new(vertices, Vec::new(), faces))
    }
}

/// Vertex positions of a UV sphere, ring by ring from `+y` to `-y`.
///
/// Parameters are not validated; [`Mesh::sphere`] is the checked entry point.
pub fn sphere_vertices(
    center: &Vertex,
    radius: f64,
    segments_lat: usize,
    segments_lon: usize,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments_lat + 1) * segments_lon);
    for i in 0..=segments_lat {
        let theta = PI * i as f64 / segments_lat as f64;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for j in 0..segments_lon {
            let phi = 2.0 * PI * j as f64 / segments_lon as f64;
            let (sin_phi, cos_phi) = phi.sin_cos();
            vertices.push(Point3::new(
                center.x + radius * sin_theta * cos_phi,
                center.y + radius * cos_theta,
                center.z + radius * sin_theta * sin_phi,
            ));
        }
    }
    vertices
}

pub(crate) fn check_center(shape: &'static str, center: &Vertex) -> GeometryResult<()> {
    if center.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(GeometryError::NonFiniteCenter {
            shape,
            x: center.x,
            y: center.y,
            z: center.z,
        })
    }
}

pub(crate) fn check_dimension(
    shape: &'static str,
    parameter: &'static str,
    value: f64,
) -> GeometryResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidDimension {
            shape,
            parameter,
            value,
        })
    }
}

pub(crate) fn check_segments(
    shape: &'static str,
    parameter: &'static str,
    value: usize,
    min: usize,
) -> GeometryResult<()> {
    if value >= min {
        Ok(())
    } else {
        Err(GeometryError::TooFewSegments {
            shape,
            parameter,
            value,
            min,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Vertex {
        Point3::origin()
    }

    #[test]
    fn test_axes() {
        let mesh = Mesh::axes(&Point3::new(1.0, 2.0, 3.0), 10.0).unwrap();
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.edges, vec![(0, 1), (2, 3), (4, 5)]);
        assert!(mesh.faces.is_empty());
        assert_eq!(mesh.vertices[1], Point3::new(11.0, 2.0, 3.0));
        assert_eq!(mesh.vertices[3], Point3::new(1.0, 12.0, 3.0));
        assert_eq!(mesh.vertices[5], Point3::new(1.0, 2.0, 13.0));
    }

    #[test]
    fn test_floor_is_flat_at_center_height() {
        let mesh = Mesh::floor(&Point3::new(0.0, -3.0, 5.0), 30.0).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.edges.len(), 4);
        assert_eq!(mesh.faces, vec![vec![0, 1, 2, 3]]);
        assert!(mesh.vertices.iter().all(|v| v.y == -3.0));
        assert_eq!(mesh.vertices[0], Point3::new(-15.0, -3.0, -10.0));
        assert_eq!(mesh.vertices[2], Point3::new(15.0, -3.0, 20.0));
    }

    #[test]
    fn test_cube() {
        let mesh = Mesh::cube(&origin(), 4.0).unwrap();
        assert_eq!(mesh.vertices.len(), 8);
        for v in &mesh.vertices {
            for c in v.iter() {
                assert!(*c == -2.0 || *c == 2.0);
            }
        }
        assert_eq!(mesh.edges.len(), 12);
        assert_eq!(mesh.unique_edge_count(), 12);
        assert_eq!(mesh.faces.len(), 6);
        assert_eq!(mesh.faces[0], vec![0, 1, 2, 3]);
        assert!(mesh.indices_in_bounds());

        // every vertex is distinct
        let distinct: HashSet<_> = mesh
            .vertices
            .iter()
            .map(|v| (v.x as i64, v.y as i64, v.z as i64))
            .collect();
        assert_eq!(distinct.len(), 8);
    }

    #[test]
    fn test_cylinder_counts() {
        let mesh = Mesh::cylinder(&origin(), 2.0, 5.0, 20).unwrap();
        assert_eq!(mesh.vertices.len(), 40);
        assert_eq!(mesh.edges.len(), 60);
        assert_eq!(mesh.unique_edge_count(), 60);
        assert_eq!(mesh.faces.len(), 22);
        assert_eq!(mesh.faces[0].len(), 20);
        assert_eq!(mesh.faces[1].len(), 20);
        assert_eq!(mesh.faces[2], vec![0, 2, 3, 1]);
        assert_eq!(mesh.faces[21], vec![38, 0, 1, 39]);
        assert!(mesh.indices_in_bounds());
    }

    #[test]
    fn test_cylinder_interleaves_bottom_and_top() {
        let mesh = Mesh::cylinder(&Point3::new(0.0, 0.0, -10.0), 2.0, 5.0, 8).unwrap();
        for (i, v) in mesh.vertices.iter().enumerate() {
            let expected_z = if i % 2 == 0 { -10.0 } else { -5.0 };
            assert_eq!(v.z, expected_z);
            assert!(((v.x * v.x + v.y * v.y).sqrt() - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_torus_vertices_within_tube() {
        let (major, minor) = (5.0, 2.0);
        let center = Point3::new(0.0, 0.0, 10.0);
        let mesh = Mesh::torus(&center, major, minor, 30, 15).unwrap();
        assert_eq!(mesh.vertices.len(), 30 * 15);
        assert_eq!(mesh.edges.len(), 2 * 30 * 15);
        assert!(mesh.faces.is_empty());
        assert!(mesh.indices_in_bounds());

        for v in &mesh.vertices {
            let axis_distance = ((v.x - center.x).powi(2) + (v.y - center.y).powi(2)).sqrt();
            assert!(axis_distance >= major - minor - 1e-9);
            assert!(axis_distance <= major + minor + 1e-9);
        }
    }

    #[test]
    fn test_torus_index_layout() {
        let mesh = Mesh::torus(&origin(), 5.0, 2.0, 4, 3).unwrap();
        // vertex 0: u = 0, v = 0 -> (R + r, 0, 0)
        assert!((mesh.vertices[0] - Point3::new(7.0, 0.0, 0.0)).norm() < 1e-9);
        // the last u step wraps back to the first ring
        assert!(mesh.edges.contains(&(9, 0)));
        // the last v step wraps within its ring
        assert!(mesh.edges.contains(&(2, 0)));
    }

    #[test]
    fn test_sphere() {
        let center = Point3::new(0.0, 30.0, 0.0);
        let mesh = Mesh::sphere(&center, 2.0, 10, 20).unwrap();
        assert_eq!(mesh.vertices.len(), 11 * 20);
        assert_eq!(mesh.faces.len(), 10 * 20);
        assert!(mesh.edges.is_empty());
        assert!(mesh.indices_in_bounds());
        for v in &mesh.vertices {
            assert!(((v - center).norm() - 2.0).abs() < 1e-9);
        }
        // first and last ring collapse onto the poles
        assert!((mesh.vertices[0] - Point3::new(0.0, 32.0, 0.0)).norm() < 1e-9);
        assert!((mesh.vertices[10 * 20 + 5] - Point3::new(0.0, 28.0, 0.0)).norm() < 1e-9);
        // longitude wraps
        assert_eq!(mesh.faces[19], vec![19, 0, 20, 39]);
    }

    #[test]
    fn test_generators_are_idempotent() {
        let c = Point3::new(1.5, -2.0, 0.25);
        assert_eq!(Mesh::cube(&c, 3.0), Mesh::cube(&c, 3.0));
        assert_eq!(
            Mesh::cylinder(&c, 2.0, 5.0, 17),
            Mesh::cylinder(&c, 2.0, 5.0, 17)
        );
        assert_eq!(
            Mesh::torus(&c, 5.0, 2.0, 30, 15),
            Mesh::torus(&c, 5.0, 2.0, 30, 15)
        );
        assert_eq!(Mesh::sphere(&c, 1.0, 8, 12), Mesh::sphere(&c, 1.0, 8, 12));
        assert_eq!(Mesh::floor(&c, 50.0), Mesh::floor(&c, 50.0));
        assert_eq!(Mesh::axes(&c, 5.0), Mesh::axes(&c, 5.0));
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        let c = origin();
        assert_eq!(
            Mesh::cylinder(&c, 2.0, 5.0, 0),
            Err(GeometryError::TooFewSegments {
                shape: "cylinder",
                parameter: "segments",
                value: 0,
                min: 3,
            })
        );
        assert!(matches!(
            Mesh::sphere(&c, -1.0, 10, 20),
            Err(GeometryError::InvalidDimension {
                parameter: "radius",
                ..
            })
        ));
        assert!(Mesh::sphere(&c, 1.0, 1, 20).is_err());
        assert!(Mesh::torus(&c, 5.0, 2.0, 30, 2).is_err());
        assert!(Mesh::cube(&c, 0.0).is_err());
        assert!(Mesh::cube(&c, f64::NAN).is_err());
        assert!(matches!(
            Mesh::floor(&Point3::new(f64::INFINITY, 0.0, 0.0), 1.0),
            Err(GeometryError::NonFiniteCenter { shape: "floor", .. })
        ));
    }
}
