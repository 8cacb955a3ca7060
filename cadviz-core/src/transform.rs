/// Rotation state and the rotation kernel shared by every shape
use nalgebra::{Matrix3, Point3};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Rotation kernel
pub struct Transform;

impl Transform {
    /// Combined rotation for intrinsic turns about x, then y, then z,
    /// expanded in closed form.
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix3<f64> {
        let (sin_x, cos_x) = rotation.x.sin_cos();
        let (sin_y, cos_y) = rotation.y.sin_cos();
        let (sin_z, cos_z) = rotation.z.sin_cos();

        Matrix3::new(
            cos_y * cos_z,
            -cos_y * sin_z,
            sin_y,
            sin_x * sin_y * cos_z + cos_x * sin_z,
            -sin_x * sin_y * sin_z + cos_x * cos_z,
            -sin_x * cos_y,
            -cos_x * sin_y * cos_z + sin_x * sin_z,
            cos_x * sin_y * sin_z + sin_x * cos_z,
            cos_x * cos_y,
        )
    }

    /// Rotate a vertex; the input is left untouched
    pub fn apply_rotation(vertex: &Point3<f64>, rotation: &Matrix3<f64>) -> Point3<f64> {
        rotation * vertex
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Rotation3, Vector3};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < EPS);
        assert!((state.y - 0.2).abs() < EPS);
        assert!((state.z - 0.3).abs() < EPS);
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation_matrix(&RotationState::zero());
        assert!((matrix - Matrix3::identity()).norm() < EPS);

        let vertex = Point3::new(3.5, -2.0, 7.25);
        let rotated = Transform::apply_rotation(&vertex, &matrix);
        assert!((rotated - vertex).norm() < EPS);
    }

    #[test]
    fn test_rotation_is_orthonormal() {
        let samples = [
            (0.3, -1.2, 2.5),
            (10.0, 0.0, -7.0),
            (std::f64::consts::PI, std::f64::consts::FRAC_PI_2, 1.0),
            (-123.4, 56.7, 0.001),
        ];
        for (x, y, z) in samples {
            let r = Transform::rotation_matrix(&RotationState::new(x, y, z));
            assert!((r * r.transpose() - Matrix3::identity()).norm() < 1e-9);
            assert!((r.determinant() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_matches_intrinsic_axis_composition() {
        let state = RotationState::new(0.4, -0.9, 1.7);
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), state.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), state.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), state.z);
        let expected = (rx * ry * rz).into_inner();

        assert!((Transform::rotation_matrix(&state) - expected).norm() < 1e-9);
    }

    #[test]
    fn test_apply_rotation_leaves_input() {
        let vertex = Point3::new(1.0, 0.0, 0.0);
        let r = Transform::rotation_matrix(&RotationState::new(0.0, 0.0, std::f64::consts::FRAC_PI_2));
        let rotated = Transform::apply_rotation(&vertex, &r);
        assert_eq!(vertex, Point3::new(1.0, 0.0, 0.0));
        assert!(rotated.x.abs() < EPS);
        assert!((rotated.y - 1.0).abs() < EPS);
        assert!(rotated.z.abs() < EPS);
    }
}
