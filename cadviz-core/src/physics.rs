/// Per-sphere bounce integrator
use log::trace;
use nalgebra::{Point3, Vector3};

/// Default downward acceleration per frame
pub const DEFAULT_GRAVITY: f64 = 0.5;

/// Default fraction of vertical speed kept after a floor hit
pub const DEFAULT_DAMPING: f64 = 0.7;

/// Bounce configuration for a sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceParams {
    /// Subtracted from the vertical velocity every frame; negative values are allowed
    pub gravity: f64,
    /// Restitution applied on impact; values at or above 1 are accepted
    pub damping: f64,
    /// Height of the collision plane
    pub floor_y: f64,
}

impl Default for BounceParams {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            damping: DEFAULT_DAMPING,
            floor_y: 0.0,
        }
    }
}

/// Integrator state owned by one sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceState {
    pub velocity: Vector3<f64>,
    pub params: BounceParams,
}

impl BounceState {
    pub fn new(params: BounceParams) -> Self {
        Self {
            velocity: Vector3::zeros(),
            params,
        }
    }

    /// Advance one frame: apply gravity, move, then resolve the floor hit.
    ///
    /// Returns true when the sphere touched the floor this frame.
    pub fn step(&mut self, center: &mut Point3<f64>, radius: f64) -> bool {
        self.velocity.y -= self.params.gravity;
        center.y += self.velocity.y;

        if center.y - radius < self.params.floor_y {
            center.y = self.params.floor_y + radius;
            self.velocity.y = -self.velocity.y * self.params.damping;
            trace!(
                "bounce at x={} z={}, rebound speed {}",
                center.x,
                center.z,
                self.velocity.y
            );
            return true;
        }
        false
    }
}

impl Default for BounceState {
    fn default() -> Self {
        Self::new(BounceParams::default())
    }
}
