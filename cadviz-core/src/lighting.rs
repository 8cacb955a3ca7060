//! Flat per-face shading against a fixed directional light.
//!
//! The light lives in world space and does not follow the camera: rotating
//! the view turns the object under the light, so its shading changes as it
//! spins.

use nalgebra::{Matrix3, Vector3};

use crate::color::Rgb;
use crate::geometry::Vertex;

/// Unit normal of the face spanned by `v0 -> v1` and `v0 -> v2`.
///
/// Degenerate faces (collapsed pole quads, coincident vertices) give the
/// zero vector.
pub fn face_normal(v0: &Vertex, v1: &Vertex, v2: &Vertex) -> Vector3<f64> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    edge1
        .cross(&edge2)
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector3::zeros)
}

/// Lambert term of a face normal after rotation, in [0, 1].
///
/// A zero normal or zero light direction yields 0 (fully unlit).
pub fn brightness(
    normal: &Vector3<f64>,
    rotation: &Matrix3<f64>,
    light_direction: &Vector3<f64>,
) -> f64 {
    let rotated = rotation * normal;
    match (
        rotated.try_normalize(f64::EPSILON),
        light_direction.try_normalize(f64::EPSILON),
    ) {
        (Some(n), Some(l)) => n.dot(&l).max(0.0),
        _ => 0.0,
    }
}

/// Shade a face given its first three vertices in winding order
pub fn shade_face(
    base: Rgb,
    corners: [&Vertex; 3],
    rotation: &Matrix3<f64>,
    light_direction: &Vector3<f64>,
) -> Rgb {
    let normal = face_normal(corners[0], corners[1], corners[2]);
    base.scaled(brightness(&normal, rotation, light_direction))
}
